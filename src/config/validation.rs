//! Configuration validation

use super::{AnalysisConfig, Config, RegistryConfig};

/// Post-load validation for configuration sections.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// A configuration value that failed validation
#[derive(Debug, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.registry.validate()?;
        self.analysis.validate()
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::new(
                "registry.url",
                "must be an http(s) URL",
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ValidationError::new(
                "registry.timeout_seconds",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.unmaintained_after_months == 0 {
            return Err(ValidationError::new(
                "analysis.unmaintained_after_months",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
