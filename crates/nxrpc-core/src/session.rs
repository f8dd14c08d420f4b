//! Top-level lifecycle: log in, run the link, tear everything down.

use std::sync::Arc;
use std::time::Duration;

use nxrpc_config::schema::DiscordConfig;
use nxrpc_config::NxrpcConfig;
use nxrpc_discord::PresenceTransport;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::artwork::ArtworkProbe;
use crate::link::{ConsoleLink, Connector, LinkConfig, LinkError};
use crate::normalizer::ActivityNormalizer;
use crate::publisher::PresencePublisher;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("gave up on the presence session after {attempts} attempts: {last_error}")]
    Abandoned { attempts: u32, last_error: String },

    #[error(transparent)]
    Link(#[from] LinkError),
}

/// How long teardown waits for in-flight presence updates.
const CLOSE_GRACE: Duration = Duration::from_secs(5);

/// Fixed-delay retry: no jitter, no growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl From<&DiscordConfig> for RetryPolicy {
    fn from(config: &DiscordConfig) -> Self {
        Self {
            max_attempts: config.login_attempts,
            backoff: config.login_backoff(),
        }
    }
}

/// Log in, retrying per `policy`. Exhaustion is final.
pub async fn establish_session(
    transport: &mut dyn PresenceTransport,
    client_id: &str,
    policy: &RetryPolicy,
) -> Result<(), SessionError> {
    let mut last_error = String::from("no attempt made");

    for attempt in 1..=policy.max_attempts {
        match transport.login(client_id).await {
            Ok(()) => {
                info!(attempt, "Presence session established");
                return Ok(());
            }
            Err(e) => {
                warn!(attempt, max = policy.max_attempts, error = %e, "Presence login failed");
                last_error = e.to_string();
            }
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.backoff).await;
        }
    }

    error!(attempts = policy.max_attempts, "Could not establish a presence session");
    error!("Make sure the Discord desktop app is installed and running.");
    error!("Check that activity sharing is enabled in Discord's privacy settings.");
    error!("If Discord runs sandboxed or as another user, its IPC socket may be unreachable.");

    Err(SessionError::Abandoned {
        attempts: policy.max_attempts,
        last_error,
    })
}

/// Owns every long-lived resource for one bridge run.
pub struct SessionController<C: Connector> {
    config: NxrpcConfig,
    transport: Box<dyn PresenceTransport>,
    connector: C,
    probe: Arc<dyn ArtworkProbe>,
}

impl<C: Connector> SessionController<C> {
    pub fn new(
        config: NxrpcConfig,
        transport: Box<dyn PresenceTransport>,
        connector: C,
        probe: Arc<dyn ArtworkProbe>,
    ) -> Self {
        Self {
            config,
            transport,
            connector,
            probe,
        }
    }

    /// Run until `shutdown` fires or the link hits an unrecoverable error.
    ///
    /// Teardown order: refresh tick and link timers, then the presence
    /// session, then the console socket. Each step runs regardless of how
    /// the previous one went, and the presence step is bounded by
    /// `CLOSE_GRACE`.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), SessionError> {
        let Self {
            config,
            mut transport,
            connector,
            probe,
        } = self;

        let policy = RetryPolicy::from(&config.discord);
        let logged_in = tokio::select! {
            _ = shutdown.cancelled() => false,
            result = establish_session(transport.as_mut(), &config.discord.client_id, &policy) => {
                result?;
                true
            }
        };
        if !logged_in {
            info!("Shutdown requested during login");
            if let Err(e) = transport.destroy().await {
                warn!(error = %e, "Failed to close presence session");
            }
            return Ok(());
        }

        let normalizer = Arc::new(ActivityNormalizer::from_config(&config, probe));
        let mut publisher = PresencePublisher::spawn(
            transport,
            Arc::clone(&normalizer),
            config.discord.status_text.clone(),
        );
        publisher.start_refresh(config.discord.refresh_interval());

        let mut link = ConsoleLink::new(
            connector,
            LinkConfig::from(&config.console),
            normalizer,
            publisher.handle(),
        );
        let outcome = link.run(&shutdown).await;

        publisher.stop_refresh();
        link.cancel_timers();
        if let Err(e) = publisher.close(CLOSE_GRACE).await {
            warn!(error = %e, "Failed to close presence session");
        }
        link.close().await;
        info!("Session closed");

        outcome.map_err(SessionError::from)
    }
}
