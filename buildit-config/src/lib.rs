// Request template catalogs for Buildit
//
// Loads request documents from JSON or TOML and hands their named sections
// to the request builder.

pub mod catalog;
pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use catalog::{DEFAULT_ENV_PREFIX, RequestCatalog};
pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::Validate;
