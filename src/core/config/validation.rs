#![allow(clippy::result_large_err)]

use super::MigrateConfig;
use crate::core::error::AppError;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &MigrateConfig) -> Result<(), AppError> {
        if config.settings.file.as_os_str().is_empty() {
            return Err(AppError::new(
                crate::core::types::ErrorCategory::ValidationError,
                "settings.file cannot be empty",
            )
            .with_code("CONFIG-001"));
        }

        Ok(())
    }
}
