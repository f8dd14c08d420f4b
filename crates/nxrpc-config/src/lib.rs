//! nxrpc configuration system.
//!
//! TOML-based configuration with validation. All config sections use
//! defaults so partial configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::NxrpcConfig;
pub use validation::validate;

use nxrpc_common::ConfigError;
use std::path::Path;

/// Load config from `path`, or from the platform default path when `None`.
///
/// An explicit path must exist; the default path is created from the
/// template on first run.
pub fn load_config(path: Option<&Path>) -> Result<NxrpcConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}
