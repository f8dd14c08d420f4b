//! Console connection configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default port of the on-console presence sysmodule (0xCAFE).
pub const DEFAULT_CONSOLE_PORT: u16 = 0xCAFE;

/// Where the console listens and how the link treats silence and failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Console IP address or hostname. Must be set here or on the command line.
    pub host: String,
    pub port: u16,
    /// Seconds before an unanswered connect counts as timed out (valid range: 1-120).
    pub connect_timeout_secs: u64,
    /// Seconds without inbound data before the link reconnects (valid range: 1-300).
    pub heartbeat_timeout_secs: u64,
    /// Seconds to wait after a refused/reset/timed-out connection (valid range: 1-300).
    pub retry_delay_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_CONSOLE_PORT,
            connect_timeout_secs: 10,
            heartbeat_timeout_secs: 10,
            retry_delay_secs: 5,
        }
    }
}

impl ConsoleConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(self.heartbeat_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}
