//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod sections;


use crate::schema::NxrpcConfig;
use nxrpc_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &NxrpcConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_console(&mut errors, config);
    sections::validate_discord(&mut errors, config);
    sections::validate_artwork(&mut errors, config);
    sections::validate_classification(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
