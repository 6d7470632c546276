//! # Buildit Request
//!
//! A fluent builder for HTTP request descriptors. Method, scheme, host,
//! path, queries, headers and body are collected through chained calls and
//! resolved into an immutable [`RequestDescriptor`] by
//! [`RequestBuilder::build`]. Nothing is sent; the descriptor is handed to
//! whatever transport the caller uses.
//!
//! ## Features
//!
//! - **Order-independent configuration**: setters only record state
//! - **Explicit URL or host + path**: an explicit URL always wins
//! - **Multi-value headers**: repeated headers are joined with `,`
//! - **Ordered queries**: duplicates kept, percent-encoded on build
//! - **JSON templates**: common defaults plus named overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use buildit_request::{HttpMethod, RequestBuilder};
//!
//! let request = RequestBuilder::new()
//!     .host("api.github.com")
//!     .path("user/repos")
//!     .header("Accept", "application/vnd.github.v3+json")
//!     .query("page", "2")
//!     .query("per_page", "100")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(request.method(), HttpMethod::Get);
//! assert_eq!(request.url(), "https://api.github.com/user/repos?page=2&per_page=100");
//! ```
//!
//! ## From a JSON Template
//!
//! ```rust
//! use buildit_request::RequestBuilder;
//!
//! let document = serde_json::json!({
//!     "host": "api.github.com",
//!     "headers": { "User-Agent": "buildit" },
//!     "ReposPOST": { "httpMethod": "POST", "path": "user/repos" }
//! });
//!
//! let request = RequestBuilder::new()
//!     .request("ReposPOST", &document)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(request.url(), "https://api.github.com/user/repos");
//! assert_eq!(request.header("User-Agent"), Some("buildit"));
//! ```

mod compose;
mod descriptor;
mod document;
mod error;
mod hydrate;
mod method;
mod request;

pub use compose::{StandardComposer, UrlComposer, UrlParts, encode_query};
pub use descriptor::RequestDescriptor;
pub use document::Document;
pub use error::{RequestError, Result};
pub use hydrate::RECOGNIZED_KEYS;
pub use method::HttpMethod;
pub use request::{DEFAULT_SCHEME, RequestBuilder};

// Re-export common types
pub use bytes::Bytes;
pub use serde_json::Value;
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use buildit_request::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compose::{StandardComposer, UrlComposer, UrlParts};
    pub use crate::descriptor::RequestDescriptor;
    pub use crate::error::{RequestError, Result};
    pub use crate::method::HttpMethod;
    pub use crate::request::RequestBuilder;
}
