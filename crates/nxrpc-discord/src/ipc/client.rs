//! Desktop IPC implementation of [`PresenceTransport`].

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, info};

use super::codec::{read_frame, write_frame, Opcode};
use super::endpoint::{connect_any, IpcStream};
use crate::payload::{clear_activity_command, ActivityPayload};
use crate::transport::{PresenceTransport, TransportError};

/// Handshake protocol version.
const RPC_VERSION: u32 = 1;

/// How long the handshake, a command, or the closing frame may take.
const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Presence transport speaking the desktop client's local IPC protocol.
pub struct DiscordIpc {
    stream: Option<Box<dyn IpcStream>>,
    pid: u32,
    reply_timeout: Duration,
}

impl DiscordIpc {
    pub fn new() -> Self {
        Self {
            stream: None,
            pid: std::process::id(),
            reply_timeout: REPLY_TIMEOUT,
        }
    }

    /// Use an already-open stream instead of probing the local endpoints.
    pub fn with_stream(stream: Box<dyn IpcStream>) -> Self {
        Self {
            stream: Some(stream),
            ..Self::new()
        }
    }

    pub fn with_reply_timeout(mut self, reply_timeout: Duration) -> Self {
        self.reply_timeout = reply_timeout;
        self
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn handshake(&mut self, client_id: &str) -> Result<(), TransportError> {
        let limit = self.reply_timeout;
        let stream = self.stream.as_mut().ok_or(TransportError::NotConnected)?;
        timeout(limit, greet(stream, client_id))
            .await
            .unwrap_or(Err(TransportError::Timeout(limit)))
    }

    /// Send a command and wait for the reply carrying the same nonce.
    ///
    /// A broken, closed, or silent pipe drops the stream: a half-read
    /// frame cannot be resynchronized.
    async fn request(&mut self, command: serde_json::Value) -> Result<serde_json::Value, TransportError> {
        let limit = self.reply_timeout;
        let stream = self.stream.as_mut().ok_or(TransportError::NotConnected)?;
        let result = timeout(limit, exchange(stream, &command))
            .await
            .unwrap_or(Err(TransportError::Timeout(limit)));

        if let Err(
            e @ (TransportError::Io(_) | TransportError::Closed(_) | TransportError::Timeout(_)),
        ) = &result
        {
            debug!(error = %e, "Dropping presence IPC stream");
            self.stream = None;
        }
        result
    }
}

impl Default for DiscordIpc {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresenceTransport for DiscordIpc {
    async fn login(&mut self, client_id: &str) -> Result<(), TransportError> {
        if self.stream.is_none() {
            self.stream = Some(connect_any().await?);
        }

        match self.handshake(client_id).await {
            Ok(()) => {
                info!("Presence IPC session ready");
                Ok(())
            }
            Err(e) => {
                // Next attempt starts from a fresh endpoint.
                self.stream = None;
                Err(e)
            }
        }
    }

    async fn set_activity(&mut self, payload: &ActivityPayload) -> Result<(), TransportError> {
        self.request(payload.to_command()).await.map(|_| ())
    }

    async fn clear_activity(&mut self) -> Result<(), TransportError> {
        self.request(clear_activity_command(self.pid)).await.map(|_| ())
    }

    async fn destroy(&mut self) -> Result<(), TransportError> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };
        let limit = self.reply_timeout;
        let farewell = async {
            let result = write_frame(&mut stream, Opcode::Close, &serde_json::json!({})).await;
            let _ = tokio::io::AsyncWriteExt::shutdown(&mut stream).await;
            result
        };
        timeout(limit, farewell)
            .await
            .unwrap_or(Err(TransportError::Timeout(limit)))
    }
}

async fn greet<S: IpcStream>(stream: &mut S, client_id: &str) -> Result<(), TransportError> {
    let hello = serde_json::json!({ "v": RPC_VERSION, "client_id": client_id });
    write_frame(stream, Opcode::Handshake, &hello).await?;

    loop {
        let (opcode, payload) = read_frame(stream).await?;
        match opcode {
            Opcode::Ping => write_frame(stream, Opcode::Pong, &payload).await?,
            Opcode::Close => return Err(TransportError::Handshake(close_reason(&payload))),
            Opcode::Frame if payload["evt"] == "READY" => return Ok(()),
            Opcode::Frame if payload["evt"] == "ERROR" => {
                return Err(TransportError::Handshake(error_message(&payload)))
            }
            _ => debug!(?opcode, "Ignoring frame during handshake"),
        }
    }
}

async fn exchange<S: IpcStream>(
    stream: &mut S,
    command: &serde_json::Value,
) -> Result<serde_json::Value, TransportError> {
    let nonce = &command["nonce"];
    write_frame(stream, Opcode::Frame, command).await?;

    loop {
        let (opcode, payload) = read_frame(stream).await?;
        match opcode {
            Opcode::Ping => write_frame(stream, Opcode::Pong, &payload).await?,
            Opcode::Close => return Err(TransportError::Closed(close_reason(&payload))),
            Opcode::Frame if payload["nonce"] == *nonce => {
                if payload["evt"] == "ERROR" {
                    return Err(TransportError::Protocol(error_message(&payload)));
                }
                return Ok(payload);
            }
            _ => debug!(?opcode, "Ignoring unrelated frame"),
        }
    }
}

fn close_reason(payload: &serde_json::Value) -> String {
    payload["message"]
        .as_str()
        .map(String::from)
        .unwrap_or_else(|| payload.to_string())
}

fn error_message(payload: &serde_json::Value) -> String {
    payload["data"]["message"]
        .as_str()
        .map(String::from)
        .unwrap_or_else(|| payload["data"].to_string())
}
