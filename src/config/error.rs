//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error:\n{}", .0.join("\n"))]
    Validation(Vec<String>),
}

/// Collects validation errors so a broken config reports everything at once.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<String>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a config field.
    pub fn error(&mut self, field: &str, message: impl AsRef<str>) {
        self.errors.push(format!("- {}: {}", field, message.as_ref()));
    }

    /// Record an error with a fix hint.
    pub fn error_with_hint(
        &mut self,
        field: &str,
        message: impl AsRef<str>,
        hint: impl AsRef<str>,
    ) {
        self.errors.push(format!(
            "- {}: {}\n  hint: {}",
            field,
            message.as_ref(),
            hint.as_ref()
        ));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), ConfigError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(self.errors))
        }
    }
}
