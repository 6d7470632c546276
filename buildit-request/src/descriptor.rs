//! Finished request descriptors.

use crate::{HttpMethod, RequestError, Result};
use bytes::Bytes;
use http::{HeaderName, HeaderValue};

/// An immutable, fully resolved HTTP request.
///
/// Produced by [`RequestBuilder::build`](crate::RequestBuilder::build).
/// Sending it is up to the caller's transport; [`into_http`](Self::into_http)
/// converts it into an `http::Request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    url: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl RequestDescriptor {
    pub(crate) fn new(
        url: String,
        method: HttpMethod,
        headers: Vec<(String, String)>,
        body: Option<Bytes>,
    ) -> Self {
        Self {
            url,
            method,
            headers,
            body,
        }
    }

    /// Absolute URL, query string included.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parse the URL.
    pub fn parsed_url(&self) -> Result<url::Url> {
        url::Url::parse(&self.url).map_err(|e| RequestError::MalformedRequest(e.to_string()))
    }

    /// HTTP method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Headers in the order they were first set.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Value of a header. Names are matched exactly.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Body payload, if one was set.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Convert into an `http::Request` for a transport.
    pub fn into_http(self) -> Result<http::Request<Bytes>> {
        let mut builder = http::Request::builder()
            .method(http::Method::from(self.method))
            .uri(self.url.as_str());

        for (name, value) in &self.headers {
            let header_name =
                HeaderName::try_from(name.as_str()).map_err(|e| RequestError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            let header_value =
                HeaderValue::try_from(value.as_str()).map_err(|e| RequestError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            builder = builder.header(header_name, header_value);
        }

        Ok(builder.body(self.body.unwrap_or_default())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> RequestDescriptor {
        RequestDescriptor::new(
            "https://api.example.com/users?page=2".to_string(),
            HttpMethod::Post,
            vec![
                ("Accept".to_string(), "text/html,application/json".to_string()),
                ("X-Trace".to_string(), "abc".to_string()),
            ],
            Some(Bytes::from_static(b"{}")),
        )
    }

    #[test]
    fn test_header_lookup_is_exact() {
        let request = descriptor();
        assert_eq!(request.header("Accept"), Some("text/html,application/json"));
        assert_eq!(request.header("accept"), None);
    }

    #[test]
    fn test_parsed_url() {
        let url = descriptor().parsed_url().unwrap();
        assert_eq!(url.host_str(), Some("api.example.com"));
        assert_eq!(url.query(), Some("page=2"));
    }

    #[test]
    fn test_into_http() {
        let request = descriptor().into_http().unwrap();
        assert_eq!(request.method(), http::Method::POST);
        assert_eq!(request.uri(), "https://api.example.com/users?page=2");
        assert_eq!(request.headers()["x-trace"], "abc");
        assert_eq!(&request.body()[..], b"{}");
    }

    #[test]
    fn test_into_http_rejects_bad_header_name() {
        let request = RequestDescriptor::new(
            "https://example.com".to_string(),
            HttpMethod::Get,
            vec![("Bad Header".to_string(), "x".to_string())],
            None,
        );
        assert!(matches!(
            request.into_http(),
            Err(RequestError::InvalidHeader { .. })
        ));
    }
}
