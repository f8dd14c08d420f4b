mod cli;
mod startup;

use std::process::ExitCode;
use std::sync::Arc;

use nxrpc_common::{NxrpcError, Result};
use nxrpc_config::NxrpcConfig;
use nxrpc_core::{HttpArtworkProbe, SessionController, SessionError, TcpConnector};
use nxrpc_discord::DiscordIpc;
use tokio_util::sync::CancellationToken;

const ISSUES_URL: &str = concat!(env!("CARGO_PKG_REPOSITORY"), "/issues");

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- nxrpc crashed ---");
        eprintln!("Please report this issue at: {ISSUES_URL}");
        eprintln!("---------------------\n");
        default_hook(info);
    }));
}

fn main() -> ExitCode {
    install_panic_hook();

    let args = cli::parse();
    let loaded = nxrpc_config::load_config(args.config.as_deref());

    let config_level = loaded.as_ref().ok().map(|c| c.logging.level);
    tracing_subscriber::fmt()
        .with_env_filter(startup::log_filter(args.log_level.as_deref(), config_level))
        .init();

    tracing::info!("nxrpc v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match loaded.and_then(|file| startup::resolve_config(file, &args)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: NxrpcConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let shutdown = CancellationToken::new();
        let on_ctrl_c = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Ctrl-C received, shutting down");
                    on_ctrl_c.cancel();
                }
                Err(e) => tracing::warn!("Failed to listen for Ctrl-C: {e}"),
            }
        });

        let probe = HttpArtworkProbe::new(config.artwork.probe_timeout())
            .map_err(|e| NxrpcError::Other(format!("failed to build HTTP client: {e}")))?;

        tracing::info!(
            host = %config.console.host,
            port = config.console.port,
            "Bridging console to Discord"
        );
        let controller = SessionController::new(
            config,
            Box::new(DiscordIpc::new()),
            TcpConnector,
            Arc::new(probe),
        );

        match controller.run(shutdown).await {
            Ok(()) => Ok(()),
            Err(SessionError::Abandoned { attempts, last_error }) => Err(NxrpcError::Transport(
                format!("could not reach Discord after {attempts} attempts ({last_error})"),
            )),
            Err(SessionError::Link(e)) => {
                tracing::error!("If this keeps happening, please report it at: {ISSUES_URL}");
                Err(NxrpcError::Link(e.to_string()))
            }
        }
    })
}
