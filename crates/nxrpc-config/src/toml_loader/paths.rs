//! Where the bridge keeps its config file, and first-run file creation.

use nxrpc_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "nxrpc";
const CONFIG_FILE: &str = "config.toml";

/// `<config_dir>/nxrpc/config.toml`, e.g. `~/.config/nxrpc/config.toml` on Linux.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        ConfigError::ParseError("no per-user config directory on this platform; pass --config".into())
    })?;
    Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Write the commented template (console host left blank) to `path`,
/// creating parent directories as needed.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!(path = %path.display(), "Created default config; set [console] host before the next run");
    Ok(())
}
