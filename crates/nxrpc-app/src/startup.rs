//! Config resolution and logging setup done before the runtime starts.

use nxrpc_common::ConfigError;
use nxrpc_config::schema::LogLevel;
use nxrpc_config::NxrpcConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

const DEFAULT_DIRECTIVE: &str = "nxrpc=info";

/// Pick the log filter: CLI flag, then `RUST_LOG`, then the config file.
pub fn log_filter(cli: Option<&str>, config_level: Option<LogLevel>) -> EnvFilter {
    if let Some(value) = cli {
        let directive = if value.contains('=') {
            value.to_string()
        } else {
            format!("nxrpc={value}")
        };
        match EnvFilter::try_new(&directive) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("Ignoring invalid --log-level '{value}': {e}"),
        }
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let directive = config_level.map_or(DEFAULT_DIRECTIVE, LogLevel::directive);
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Apply CLI overrides on top of the loaded file and validate the result.
pub fn resolve_config(mut config: NxrpcConfig, args: &Args) -> Result<NxrpcConfig, ConfigError> {
    if let Some(host) = &args.host {
        config.console.host = host.clone();
    }
    if let Some(port) = args.port {
        config.console.port = port;
    }
    if let Some(client_id) = &args.client_id {
        config.discord.client_id = client_id.clone();
    }

    nxrpc_config::validate(&config)?;

    if config.console.host.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "console host is not set; pass --host or set [console] host in the config file".into(),
        ));
    }
    Ok(config)
}
