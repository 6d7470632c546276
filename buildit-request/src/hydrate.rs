//! Request templates from configuration documents.
//!
//! A document carries a common layer of recognized keys at the top level,
//! plus named sections that override the common layer for one request:
//!
//! ```json
//! {
//!   "host": "api.example.com",
//!   "headers": { "Accept": "application/json" },
//!   "queries": [ { "page": "2" }, { "per_page": "100" } ],
//!   "ReposPOST": { "httpMethod": "POST", "path": "user/repos" }
//! }
//! ```
//!
//! Keys that are missing or have an unexpected shape are skipped.

use crate::document::Document;
use crate::request::DEFAULT_SCHEME;
use crate::{HttpMethod, RequestBuilder};
use serde_json::Value;
use tracing::debug;

/// Keys read from each layer of a request document.
pub const RECOGNIZED_KEYS: [&str; 6] = ["host", "scheme", "path", "headers", "queries", "httpMethod"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Common,
    Named,
}

impl RequestBuilder {
    /// Apply the common layer of `document`, then the section called `name`.
    ///
    /// Headers from both layers are appended to the builder's headers.
    /// Queries from the last layer that declares them replace the
    /// builder's queries. A missing section leaves only the common layer
    /// applied.
    pub fn request(mut self, name: &str, document: &Value) -> Self {
        let Some(common) = Document::new(document) else {
            debug!("Request document is not an object, ignoring");
            return self;
        };

        self.apply_layer(common, Layer::Common);

        match common.object(name) {
            Some(section) => self.apply_layer(section, Layer::Named),
            None => debug!(section = name, "No request section in document"),
        }

        self
    }

    /// Apply only the common layer of `document`.
    pub fn defaults(mut self, document: &Value) -> Self {
        match Document::new(document) {
            Some(common) => self.apply_layer(common, Layer::Common),
            None => debug!("Request document is not an object, ignoring"),
        }
        self
    }

    fn apply_layer(&mut self, doc: Document<'_>, layer: Layer) {
        match doc.string("scheme") {
            Some(scheme) => self.scheme = scheme.to_string(),
            None if layer == Layer::Common => self.scheme = DEFAULT_SCHEME.to_string(),
            None => {}
        }

        match doc.string("httpMethod").map(str::parse::<HttpMethod>) {
            Some(Ok(method)) => self.method = method,
            Some(Err(e)) => {
                debug!(error = %e, "Ignoring httpMethod");
                if layer == Layer::Common {
                    self.method = HttpMethod::default();
                }
            }
            None if layer == Layer::Common => self.method = HttpMethod::default(),
            None => {}
        }

        if let Some(host) = doc.string("host") {
            self.host = Some(host.to_string());
        }

        if let Some(path) = doc.string("path") {
            self.path = Some(path.to_string());
        }

        match doc.scalar_map("headers") {
            Some(headers) => {
                for (field, value) in headers {
                    self.append_header(field.to_string(), value);
                }
            }
            None if doc.contains("headers") => debug!("Ignoring malformed headers"),
            None => {}
        }

        match doc.pair_list("queries") {
            Some(queries) => {
                self.query = queries
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .collect();
            }
            None if doc.contains("queries") => debug!("Ignoring malformed queries"),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "host": "api.somehost.com",
            "path": "some/path",
            "headers": {"Accept": "text/html"},
            "RequestGET": {
                "headers": {"Accept-Language": "en-IE"}
            },
            "RequestPOST": {
                "httpMethod": "POST",
                "path": "someResource",
                "queries": [{"query": 5}, {"someOtherQuery": "queryValue"}]
            }
        })
    }

    #[test]
    fn test_named_section_adds_headers() {
        let request = RequestBuilder::new()
            .request("RequestGET", &document())
            .build()
            .unwrap();

        assert_eq!(request.url(), "https://api.somehost.com/some/path");
        assert_eq!(request.header("Accept"), Some("text/html"));
        assert_eq!(request.header("Accept-Language"), Some("en-IE"));
    }

    #[test]
    fn test_direct_header_composes_with_document() {
        let request = RequestBuilder::new()
            .header("Accept", "application/xhtml+xml")
            .request("RequestGET", &document())
            .build()
            .unwrap();

        assert_eq!(request.header("Accept"), Some("application/xhtml+xml,text/html"));
    }

    #[test]
    fn test_named_section_overrides_method_path_and_queries() {
        let request = RequestBuilder::new()
            .request("RequestPOST", &document())
            .build()
            .unwrap();

        assert_eq!(request.method(), HttpMethod::Post);
        assert_eq!(
            request.url(),
            "https://api.somehost.com/someResource?query=5&someOtherQuery=queryValue"
        );
    }

    #[test]
    fn test_missing_section_keeps_common_layer() {
        let request = RequestBuilder::new()
            .request("Unknown", &document())
            .build()
            .unwrap();

        assert_eq!(request.url(), "https://api.somehost.com/some/path");
        assert_eq!(request.headers().len(), 1);
    }

    #[test]
    fn test_common_layer_resets_scheme_and_method() {
        let request = RequestBuilder::new()
            .http()
            .delete()
            .defaults(&document())
            .build()
            .unwrap();

        assert_eq!(request.method(), HttpMethod::Get);
        assert!(request.url().starts_with("https://"));
    }

    #[test]
    fn test_named_layer_keeps_common_method() {
        let document = json!({
            "host": "example.com",
            "httpMethod": "PUT",
            "scheme": "http",
            "Update": {"path": "items/1"}
        });
        let request = RequestBuilder::new()
            .request("Update", &document)
            .build()
            .unwrap();

        assert_eq!(request.method(), HttpMethod::Put);
        assert_eq!(request.url(), "http://example.com/items/1");
    }

    #[test]
    fn test_named_section_overrides_host_and_scheme() {
        let document = json!({
            "host": "a.com",
            "scheme": "http",
            "N": {"host": "b.com", "scheme": "https"}
        });
        let request = RequestBuilder::new()
            .request("N", &document)
            .build()
            .unwrap();

        assert_eq!(request.url(), "https://b.com");
    }

    #[test]
    fn test_document_queries_replace_then_direct_queries_append() {
        let document = json!({
            "host": "example.com",
            "queries": [{"page": "2"}, {"per_page": "100"}]
        });
        let request = RequestBuilder::new()
            .query("dropped", "1")
            .defaults(&document)
            .query("sort", "asc")
            .build()
            .unwrap();

        assert_eq!(
            request.url(),
            "https://example.com?page=2&per_page=100&sort=asc"
        );
    }

    #[test]
    fn test_malformed_shapes_are_ignored() {
        let document = json!({
            "host": "example.com",
            "headers": ["not", "a", "map"],
            "queries": {"page": "2"},
            "Named": "not an object"
        });
        let request = RequestBuilder::new()
            .query("kept", "1")
            .header("X-Kept", "yes")
            .request("Named", &document)
            .build()
            .unwrap();

        assert_eq!(request.url(), "https://example.com?kept=1");
        assert_eq!(request.header("X-Kept"), Some("yes"));
    }

    #[test]
    fn test_non_object_document_is_noop() {
        let builder = RequestBuilder::new().http().request("Any", &json!([1, 2, 3]));
        assert!(builder.build().is_err());

        let request = builder.host("example.com").build().unwrap();
        assert_eq!(request.url(), "http://example.com");
    }

    #[test]
    fn test_unrecognized_method_falls_back_to_get() {
        let document = json!({"host": "example.com", "httpMethod": "PATCH"});
        let request = RequestBuilder::new()
            .post()
            .defaults(&document)
            .build()
            .unwrap();

        assert_eq!(request.method(), HttpMethod::Get);
    }
}
