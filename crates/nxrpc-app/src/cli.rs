use std::path::PathBuf;

use clap::Parser;

/// nxrpc: mirror what a Nintendo Switch is running as Discord rich presence.
#[derive(Parser, Debug, Default)]
#[command(name = "nxrpc", version, about)]
pub struct Args {
    /// Console IP address or host name.
    #[arg(long)]
    pub host: Option<String>,

    /// Console port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Discord application client id.
    #[arg(long)]
    pub client_id: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (debug, info, nxrpc_core=trace, ...).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
