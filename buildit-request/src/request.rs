//! Request builder.

use crate::compose::{StandardComposer, UrlComposer, UrlParts};
use crate::{HttpMethod, RequestDescriptor, RequestError, Result};
use bytes::Bytes;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Scheme used until one is configured.
pub const DEFAULT_SCHEME: &str = "https";

/// Fluent builder for [`RequestDescriptor`]s.
///
/// Configuration calls only record state; nothing is validated until
/// [`build`](Self::build). A URL given with [`url`](Self::url) takes
/// precedence over [`host`](Self::host) and [`path`](Self::path).
#[derive(Clone)]
pub struct RequestBuilder {
    pub(crate) url: Option<String>,
    pub(crate) scheme: String,
    pub(crate) host: Option<String>,
    pub(crate) path: Option<String>,
    pub(crate) method: HttpMethod,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Bytes>,
    composer: Arc<dyn UrlComposer>,
}

impl RequestBuilder {
    /// Create an empty builder: GET over https, no URL or host.
    pub fn new() -> Self {
        Self {
            url: None,
            scheme: DEFAULT_SCHEME.to_string(),
            host: None,
            path: None,
            method: HttpMethod::default(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            composer: Arc::new(StandardComposer),
        }
    }

    /// Use a different URL composer.
    pub fn with_composer(mut self, composer: impl UrlComposer + 'static) -> Self {
        self.composer = Arc::new(composer);
        self
    }

    /// Set a complete URL. It is not checked until `build`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// HTTP GET.
    pub fn get(self) -> Self {
        self.method(HttpMethod::Get)
    }

    /// HTTP POST.
    pub fn post(self) -> Self {
        self.method(HttpMethod::Post)
    }

    /// HTTP PUT.
    pub fn put(self) -> Self {
        self.method(HttpMethod::Put)
    }

    /// HTTP DELETE.
    pub fn delete(self) -> Self {
        self.method(HttpMethod::Delete)
    }

    /// Set the URL scheme. Any string is accepted and embedded verbatim.
    ///
    /// The scheme also replaces the scheme of a URL set with `url`.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Plain http.
    pub fn http(self) -> Self {
        self.scheme("http")
    }

    /// Secure http.
    pub fn https(self) -> Self {
        self.scheme("https")
    }

    /// Set the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the path. A leading `/` is added at build time if missing.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a header value.
    ///
    /// A second value for the same field is appended to the first with a
    /// `,` separator.
    pub fn header(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.append_header(field.into(), value.into());
        self
    }

    /// Overwrite a header, or remove it when `value` is `None`.
    pub fn set_header(mut self, field: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        let field = field.into();
        match value {
            Some(value) => self.replace_header(field, value.into()),
            None => self.headers.retain(|(key, _)| *key != field),
        }
        self
    }

    /// Add a query parameter. Duplicate names are kept.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append every `(name, value)` pair to the query list, keeping order.
    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in params {
            self.query.push((k.into(), v.into()));
        }
        self
    }

    /// Replace the body payload.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Use UTF-8 text as the body and mark the descriptor `text/plain`.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.replace_header("Content-Type".to_string(), "text/plain; charset=utf-8".to_string());
        self.body = Some(Bytes::from(text.into()));
        self
    }

    /// Serialize `json` into the body and mark the descriptor
    /// `application/json`. On failure the builder is left as it was.
    pub fn json<T: Serialize>(mut self, json: &T) -> Self {
        match serde_json::to_vec(json) {
            Ok(bytes) => {
                self.replace_header("Content-Type".to_string(), "application/json".to_string());
                self.body = Some(Bytes::from(bytes));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize JSON body");
            }
        }
        self
    }

    /// Url-encode `form` into the body and mark the descriptor as a form
    /// submission. On failure the builder is left as it was.
    pub fn form<T: Serialize>(mut self, form: &T) -> Self {
        match serde_urlencoded::to_string(form) {
            Ok(encoded) => {
                self.replace_header(
                    "Content-Type".to_string(),
                    "application/x-www-form-urlencoded".to_string(),
                );
                self.body = Some(Bytes::from(encoded));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode form data");
            }
        }
        self
    }

    /// Write `Authorization: Bearer <token>`, replacing any earlier value.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.replace_header(
            "Authorization".to_string(),
            format!("Bearer {}", token.into()),
        );
        self
    }

    /// Write `Authorization: Basic <base64 user:password>`, replacing any
    /// earlier value.
    pub fn basic_auth(
        mut self,
        username: impl Into<String>,
        password: Option<impl Into<String>>,
    ) -> Self {
        use base64::Engine;
        let credentials = match password {
            Some(p) => format!("{}:{}", username.into(), p.into()),
            None => format!("{}:", username.into()),
        };
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        self.replace_header("Authorization".to_string(), format!("Basic {}", encoded));
        self
    }

    /// Resolve the accumulated state into a request descriptor.
    ///
    /// The builder is left untouched and can be built again. Fails with
    /// [`RequestError::MalformedRequest`] when neither a URL nor a host was
    /// set, or when the parts do not compose into an absolute URL.
    pub fn build(&self) -> Result<RequestDescriptor> {
        let url = match self.resolve_url() {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "Request build failed");
                return Err(e);
            }
        };

        debug!(method = %self.method, url = %url, headers = self.headers.len(), "Built request");

        Ok(RequestDescriptor::new(
            url,
            self.method,
            self.headers.clone(),
            self.body.clone(),
        ))
    }

    fn resolve_url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return self
                .composer
                .rebase(url, &self.scheme, &self.query)
                .ok_or_else(|| RequestError::MalformedRequest(format!("invalid URL: {}", url)));
        }

        let host = self.host.as_deref().ok_or_else(|| {
            RequestError::MalformedRequest("neither a URL nor a host was set".to_string())
        })?;
        let path = self.path.as_deref().map(normalize_path);

        self.composer
            .compose(&UrlParts {
                scheme: &self.scheme,
                host,
                path: path.as_deref(),
                query: &self.query,
            })
            .ok_or_else(|| {
                RequestError::MalformedRequest(format!(
                    "cannot compose URL from scheme {:?} and host {:?}",
                    self.scheme, host
                ))
            })
    }

    pub(crate) fn append_header(&mut self, field: String, value: String) {
        match self.headers.iter_mut().find(|(key, _)| *key == field) {
            Some((_, existing)) => {
                existing.push(',');
                existing.push_str(&value);
            }
            None => self.headers.push((field, value)),
        }
    }

    fn replace_header(&mut self, field: String, value: String) {
        match self.headers.iter_mut().find(|(key, _)| *key == field) {
            Some((_, existing)) => *existing = value,
            None => self.headers.push((field, value)),
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("url", &self.url)
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("path", &self.path)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("query", &self.query)
            .field("body", &self.body.as_ref().map(Bytes::len))
            .finish()
    }
}

/// Prefix a path with `/` unless it already starts with one.
fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{}", path))
    }
}
