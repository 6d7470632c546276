// Request catalogs - named request templates backed by one document

use crate::{ConfigError, ConfigLoader, EnvLoader, FileFormat, Result, Validate};
use buildit_request::{Document, RECOGNIZED_KEYS, RequestBuilder, RequestDescriptor};
use serde_json::Value;
use std::path::Path;

/// Environment prefix used by [`RequestCatalog::from_default_env`]
pub const DEFAULT_ENV_PREFIX: &str = "BUILDIT";

/// A parsed request document: common defaults plus named request sections
#[derive(Debug, Clone)]
pub struct RequestCatalog {
    document: Value,
}

impl RequestCatalog {
    /// Wrap an already parsed document. The top level must be an object.
    pub fn from_value(document: Value) -> Result<Self> {
        if !document.is_object() {
            return Err(ConfigError::ParseError(
                "request document must be an object".to_string(),
            ));
        }
        Ok(Self { document })
    }

    /// Parse a document from a string
    pub fn from_str(content: &str, format: FileFormat) -> Result<Self> {
        Self::from_value(ConfigLoader::new(format).parse(content)?)
    }

    /// Load a document from file, detecting the format from its extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::from_value(ConfigLoader::auto(path)?.load_file(path)?)
    }

    /// Load the file named by `{prefix}_REQUESTS`, reading `.env` first if present
    pub fn from_env(prefix: &str) -> Result<Self> {
        dotenvy::dotenv().ok(); // Ignore if .env doesn't exist

        let path = EnvLoader::new(Some(prefix.to_string())).load_var("REQUESTS")?;
        Self::from_file(path)
    }

    /// Load the file named by `BUILDIT_REQUESTS`
    pub fn from_default_env() -> Result<Self> {
        Self::from_env(DEFAULT_ENV_PREFIX)
    }

    /// The underlying document
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Names of the request sections, in document order
    pub fn names(&self) -> Vec<&str> {
        Document::new(&self.document)
            .map(|doc| {
                doc.object_keys()
                    .filter(|key| !RECOGNIZED_KEYS.iter().any(|k| k == key))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check if a request section exists
    pub fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|n| *n == name)
    }

    /// A builder with only the common layer applied
    pub fn common(&self) -> RequestBuilder {
        RequestBuilder::new().defaults(&self.document)
    }

    /// A builder with the common layer and the `name` section applied
    pub fn request(&self, name: &str) -> Result<RequestBuilder> {
        if !self.contains(name) {
            return Err(ConfigError::RequestNotFound(name.to_string()));
        }
        Ok(RequestBuilder::new().request(name, &self.document))
    }

    /// Build the `name` request as configured
    pub fn build(&self, name: &str) -> Result<RequestDescriptor> {
        Ok(self.request(name)?.build()?)
    }
}

impl Validate for RequestCatalog {
    /// Every request section must build
    fn validate(&self) -> Result<()> {
        let failed: Vec<&str> = self
            .names()
            .into_iter()
            .filter(|name| self.build(name).is_err())
            .collect();

        if failed.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(format!(
                "requests failed to build: {}",
                failed.join(", ")
            )))
        }
    }
}
