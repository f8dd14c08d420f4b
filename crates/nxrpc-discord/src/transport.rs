//! The seam between the synchronization core and the presence service.

use std::time::Duration;

use async_trait::async_trait;

use crate::payload::ActivityPayload;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no presence endpoint accepted a connection")]
    NoEndpoint,
    #[error("not connected")]
    NotConnected,
    #[error("connection closed by peer: {0}")]
    Closed(String),
    #[error("handshake rejected: {0}")]
    Handshake(String),
    #[error("no reply within {0:?}")]
    Timeout(Duration),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A session-oriented remote presence service.
///
/// Implementations are driven from a single task at a time; calls are
/// never issued concurrently on the same instance.
#[async_trait]
pub trait PresenceTransport: Send {
    /// Open the session for `client_id`.
    async fn login(&mut self, client_id: &str) -> Result<(), TransportError>;

    /// Replace the displayed activity.
    async fn set_activity(&mut self, payload: &ActivityPayload) -> Result<(), TransportError>;

    /// Remove any displayed activity.
    async fn clear_activity(&mut self) -> Result<(), TransportError>;

    /// Close the session. Safe to call more than once.
    async fn destroy(&mut self) -> Result<(), TransportError>;
}
