// Buildit - fluent HTTP request descriptors
//
// This library assembles HTTP requests from chained builder calls or from
// JSON/TOML request templates. Sending them is left to the caller.

// Re-export the request builder
pub use buildit_request::*;

// Re-export optional crates
#[cfg(feature = "config")]
pub use buildit_config;

#[cfg(feature = "config")]
pub use buildit_config::{RequestCatalog, Validate};
