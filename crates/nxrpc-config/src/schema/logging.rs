use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive scoped to this workspace's crates.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "nxrpc=trace",
            LogLevel::Debug => "nxrpc=debug",
            LogLevel::Info => "nxrpc=info",
            LogLevel::Warn => "nxrpc=warn",
            LogLevel::Error => "nxrpc=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
