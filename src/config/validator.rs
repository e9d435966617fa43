use thiserror::Error;

use crate::config::{Settings, StorageBackend, StorageConfig};

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_storage(&settings.storage) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_log_level(&settings.logging.level) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_storage(storage: &StorageConfig) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if storage.backend == StorageBackend::File && storage.path.trim().is_empty() {
            errors.push(ValidationError::MissingField("storage.path".to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_log_level(level: &str) -> Result<(), Vec<ValidationError>> {
        if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            Ok(())
        } else {
            Err(vec![ValidationError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("'{}' is not one of {}", level, LOG_LEVELS.join(", ")),
            }])
        }
    }
}
