//! Configuration schema types for nxrpc.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults the bridge ships with.

mod artwork;
mod classification;
mod console;
mod discord;
mod logging;

pub use artwork::*;
pub use classification::*;
pub use console::*;
pub use discord::*;
pub use logging::*;

use serde::{Deserialize, Serialize};

/// Root configuration for nxrpc.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NxrpcConfig {
    pub console: ConsoleConfig,
    pub discord: DiscordConfig,
    pub artwork: ArtworkConfig,
    /// Ordered `(pattern, kind)` rules; first match wins.
    pub classification: Vec<ClassificationRule>,
    pub logging: LoggingConfig,
}

impl Default for NxrpcConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            discord: DiscordConfig::default(),
            artwork: ArtworkConfig::default(),
            classification: default_classification(),
            logging: LoggingConfig::default(),
        }
    }
}
