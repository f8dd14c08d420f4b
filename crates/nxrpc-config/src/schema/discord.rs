//! Remote presence session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Application id registered with the presence service.
    pub client_id: String,
    /// Login attempts before startup is abandoned (valid range: 1-100).
    pub login_attempts: u32,
    /// Fixed pause between login attempts in seconds (valid range: 0-60).
    pub login_backoff_secs: u64,
    /// Secondary line shown under the title.
    pub status_text: String,
    /// Seconds between republishing the current activity (valid range: 1-600).
    pub refresh_interval_secs: u64,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            client_id: "831528990439243806".into(),
            login_attempts: 10,
            login_backoff_secs: 3,
            status_text: "on Nintendo Switch".into(),
            refresh_interval_secs: 15,
        }
    }
}

impl DiscordConfig {
    pub fn login_backoff(&self) -> Duration {
        Duration::from_secs(self.login_backoff_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}
