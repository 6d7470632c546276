// Request catalog validation

use crate::Result;

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
