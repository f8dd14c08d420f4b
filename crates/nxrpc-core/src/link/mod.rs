//! Reconnecting client for the console's title feed.
//!
//! ```text
//!   Disconnected ──connect──▶ Connecting ──ok──▶ Connected ──data──▶ Connected
//!        ▲                        │                  │
//!        │  retry delay           │ transient        │ heartbeat lost: reconnect now
//!        └────────────────────────┴──────────────────┤ transient: retry after delay
//!                                                    │ anything else
//!                                                    ▼
//!                                                FatalError
//! ```
//!
//! The link owns the socket, the heartbeat deadline and the retry deadline.
//! Each lives in a single slot, so replacing one always drops its
//! predecessor and a stale socket can never deliver events.

mod connector;


pub use connector::{is_transient, Connector, TcpConnector};

use std::io;
use std::sync::Arc;
use std::time::Duration;

use nxrpc_common::TitleId;
use nxrpc_config::schema::ConsoleConfig;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::frame::{self, FRAME_LEN};
use crate::normalizer::ActivityNormalizer;
use crate::publisher::PublishHandle;
use crate::slot::TimerSlot;

/// Room for a frame plus whatever trails it in the same read.
const READ_BUF_LEN: usize = FRAME_LEN * 4;

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("unrecoverable socket error: {0}")]
    Fatal(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
    FatalError,
}

#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout: Duration,
    pub heartbeat_timeout: Duration,
    pub retry_delay: Duration,
}

impl From<&ConsoleConfig> for LinkConfig {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            connect_timeout: config.connect_timeout(),
            heartbeat_timeout: config.heartbeat_timeout(),
            retry_delay: config.retry_delay(),
        }
    }
}

enum Event {
    Shutdown,
    RetryDue,
    HeartbeatLost,
    Read(io::Result<usize>),
}

pub struct ConsoleLink<C: Connector> {
    connector: C,
    config: LinkConfig,
    normalizer: Arc<ActivityNormalizer>,
    publisher: PublishHandle,
    state: LinkState,
    socket: Option<C::Stream>,
    heartbeat: TimerSlot,
    retry: TimerSlot,
    current: Option<TitleId>,
}

impl<C: Connector> ConsoleLink<C> {
    pub fn new(
        connector: C,
        config: LinkConfig,
        normalizer: Arc<ActivityNormalizer>,
        publisher: PublishHandle,
    ) -> Self {
        Self {
            connector,
            config,
            normalizer,
            publisher,
            state: LinkState::Disconnected,
            socket: None,
            heartbeat: TimerSlot::new(),
            retry: TimerSlot::new(),
            current: None,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// The title last forwarded downstream.
    pub fn current_title(&self) -> Option<TitleId> {
        self.current
    }

    /// Drive the link until `shutdown` fires (`Ok`) or an unrecoverable
    /// socket error occurs (`Err`). Transient failures never return.
    pub async fn run(&mut self, shutdown: &CancellationToken) -> Result<(), LinkError> {
        let mut buf = vec![0u8; READ_BUF_LEN];

        loop {
            if self.socket.is_none() && !self.retry.is_armed() {
                tokio::select! {
                    _ = shutdown.cancelled() => return Ok(()),
                    result = self.connect() => result?,
                }
                continue;
            }

            let Self {
                socket,
                heartbeat,
                retry,
                ..
            } = &mut *self;

            let event = tokio::select! {
                _ = shutdown.cancelled() => Event::Shutdown,
                _ = retry.fired() => Event::RetryDue,
                _ = heartbeat.fired() => Event::HeartbeatLost,
                read = read_some(socket, &mut buf) => Event::Read(read),
            };

            match event {
                Event::Shutdown => return Ok(()),
                Event::RetryDue => debug!("Retry delay elapsed"),
                Event::HeartbeatLost => {
                    warn!(
                        timeout_secs = self.config.heartbeat_timeout.as_secs(),
                        "No data from console, reconnecting"
                    );
                    self.release_socket();
                }
                Event::Read(Ok(0)) => {
                    let closed = io::Error::new(
                        io::ErrorKind::ConnectionReset,
                        "console closed the connection",
                    );
                    self.on_error(closed)?;
                }
                Event::Read(Ok(n)) => {
                    self.heartbeat.arm(self.config.heartbeat_timeout);
                    self.on_data(&buf[..n]);
                }
                Event::Read(Err(e)) => self.on_error(e)?,
            }
        }
    }

    async fn connect(&mut self) -> Result<(), LinkError> {
        self.release_socket();
        self.state = LinkState::Connecting;
        info!(host = %self.config.host, port = self.config.port, "Connecting to console");

        let attempt = self.connector.connect(&self.config.host, self.config.port);
        let result = match tokio::time::timeout(self.config.connect_timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(io::ErrorKind::TimedOut, "connect timed out")),
        };

        match result {
            Ok(stream) => {
                self.socket = Some(stream);
                self.state = LinkState::Connected;
                self.heartbeat.arm(self.config.heartbeat_timeout);
                info!(host = %self.config.host, "Connected to console");
                Ok(())
            }
            Err(e) => self.on_error(e),
        }
    }

    fn on_data(&mut self, bytes: &[u8]) {
        let message = match frame::decode(bytes) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, "Discarding malformed frame");
                return;
            }
        };

        let title = message.title_id.or_home_menu();
        if self.current == Some(title) {
            trace!(title = %title, "Title unchanged");
            return;
        }

        let record = self.normalizer.normalize(message.title_id, &message.name);
        info!(
            title = %title,
            name = %record.display_name,
            kind = %record.kind,
            "Title changed"
        );
        self.current = Some(title);
        self.publisher.publish(record);
    }

    fn on_error(&mut self, error: io::Error) -> Result<(), LinkError> {
        self.release_socket();

        if is_transient(error.kind()) {
            warn!(
                error = %error,
                retry_in_secs = self.config.retry_delay.as_secs(),
                "Console connection lost"
            );
            self.state = LinkState::Disconnected;
            self.retry.arm(self.config.retry_delay);
            return Ok(());
        }

        error!(error = %error, kind = ?error.kind(), "Unrecoverable console connection error");
        self.retry.disarm();
        self.state = LinkState::FatalError;
        Err(LinkError::Fatal(error))
    }

    /// Drop the socket and its heartbeat together.
    fn release_socket(&mut self) {
        self.heartbeat.disarm();
        if self.socket.take().is_some() {
            debug!("Released console socket");
        }
        if self.state == LinkState::Connected {
            self.state = LinkState::Disconnected;
        }
    }

    pub fn cancel_timers(&mut self) {
        self.heartbeat.disarm();
        self.retry.disarm();
    }

    /// Shut the socket down gracefully, if one is open.
    pub async fn close(&mut self) {
        self.cancel_timers();
        if let Some(mut socket) = self.socket.take() {
            if let Err(e) = socket.shutdown().await {
                debug!(error = %e, "Socket shutdown failed");
            }
        }
        if self.state != LinkState::FatalError {
            self.state = LinkState::Disconnected;
        }
    }
}

/// Read from the socket; never resolves while there is none.
async fn read_some<S: AsyncRead + Unpin>(socket: &mut Option<S>, buf: &mut [u8]) -> io::Result<usize> {
    match socket {
        Some(socket) => socket.read(buf).await,
        None => std::future::pending().await,
    }
}
