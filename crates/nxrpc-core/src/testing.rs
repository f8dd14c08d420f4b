//! In-memory doubles for the transport, artwork and connector seams.

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use async_trait::async_trait;
use nxrpc_discord::{ActivityPayload, PresenceTransport, TransportError};
use tokio::io::{AsyncRead, AsyncWrite, DuplexStream, ReadBuf};
use tokio::time::Instant;

use crate::artwork::{ArtworkProbe, ProbeError};
use crate::link::Connector;

// ---------------------------------------------------------------------------
// Artwork probe
// ---------------------------------------------------------------------------

/// Answers every probe with the same status, or fails.
pub struct StaticProbe {
    status: Option<u16>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl StaticProbe {
    pub fn status(status: u16) -> Arc<Self> {
        Arc::new(Self {
            status: Some(status),
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            status: None,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtworkProbe for StaticProbe {
    async fn probe(&self, url: &str) -> Result<u16, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());
        self.status
            .ok_or_else(|| ProbeError::Other("simulated network failure".into()))
    }
}

// ---------------------------------------------------------------------------
// Presence transport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    Login(String),
    SetActivity(ActivityPayload),
    ClearActivity,
    Destroy,
}

#[derive(Default)]
struct TransportState {
    calls: Vec<TransportCall>,
    login_failures_left: usize,
    fail_next_activity: bool,
    stall_activities: bool,
}

/// Records every call; clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    state: Arc<Mutex<TransportState>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the first `n` login attempts.
    pub fn failing_logins(n: usize) -> Self {
        let transport = Self::new();
        transport.state.lock().unwrap().login_failures_left = n;
        transport
    }

    pub fn fail_next_activity(&self) {
        self.state.lock().unwrap().fail_next_activity = true;
    }

    /// Make every later `set_activity` record the call and then never return.
    pub fn stall_activities(&self) {
        self.state.lock().unwrap().stall_activities = true;
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn activities(&self) -> Vec<ActivityPayload> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                TransportCall::SetActivity(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn login_attempts(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, TransportCall::Login(_)))
            .count()
    }
}

#[async_trait]
impl PresenceTransport for RecordingTransport {
    async fn login(&mut self, client_id: &str) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(TransportCall::Login(client_id.to_string()));
        if state.login_failures_left > 0 {
            state.login_failures_left -= 1;
            return Err(TransportError::NoEndpoint);
        }
        Ok(())
    }

    async fn set_activity(&mut self, payload: &ActivityPayload) -> Result<(), TransportError> {
        let stall = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(TransportCall::SetActivity(payload.clone()));
            if std::mem::take(&mut state.fail_next_activity) {
                return Err(TransportError::NotConnected);
            }
            state.stall_activities
        };
        if stall {
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    async fn clear_activity(&mut self) -> Result<(), TransportError> {
        self.state.lock().unwrap().calls.push(TransportCall::ClearActivity);
        Ok(())
    }

    async fn destroy(&mut self) -> Result<(), TransportError> {
        self.state.lock().unwrap().calls.push(TransportCall::Destroy);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Console connector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub enum ConnectOutcome {
    /// Hand out one end of an in-memory pipe; the other end becomes a peer.
    Accept,
    /// Accept, but every read on the link's end fails with this kind.
    AcceptFailingReads(io::ErrorKind),
    Fail(io::ErrorKind),
    /// Never complete; the caller's timeout has to fire.
    Hang,
}

#[derive(Default)]
struct ConnectorState {
    script: VecDeque<ConnectOutcome>,
    attempts: Vec<Instant>,
    peers: VecDeque<DuplexStream>,
}

/// Link-side end of a scripted connection.
pub struct ScriptedStream {
    inner: DuplexStream,
    read_error: Option<io::ErrorKind>,
}

impl AsyncRead for ScriptedStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        match this.read_error {
            Some(kind) => Poll::Ready(Err(io::Error::new(kind, "scripted read failure"))),
            None => Pin::new(&mut this.inner).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for ScriptedStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().inner).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}

/// Plays back a queue of connect outcomes. An exhausted script refuses.
#[derive(Clone, Default)]
pub struct ScriptedConnector {
    state: Arc<Mutex<ConnectorState>>,
}

impl ScriptedConnector {
    pub fn new(script: impl IntoIterator<Item = ConnectOutcome>) -> Self {
        let connector = Self::default();
        connector.state.lock().unwrap().script = script.into_iter().collect();
        connector
    }

    pub fn attempts(&self) -> usize {
        self.state.lock().unwrap().attempts.len()
    }

    pub fn attempt_times(&self) -> Vec<Instant> {
        self.state.lock().unwrap().attempts.clone()
    }

    /// Console side of the oldest accepted connection not yet claimed.
    pub fn take_peer(&self) -> Option<DuplexStream> {
        self.state.lock().unwrap().peers.pop_front()
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    type Stream = ScriptedStream;

    async fn connect(&self, _host: &str, _port: u16) -> io::Result<ScriptedStream> {
        let outcome = {
            let mut state = self.state.lock().unwrap();
            state.attempts.push(Instant::now());
            state
                .script
                .pop_front()
                .unwrap_or(ConnectOutcome::Fail(io::ErrorKind::ConnectionRefused))
        };

        let read_error = match outcome {
            ConnectOutcome::Accept => None,
            ConnectOutcome::AcceptFailingReads(kind) => Some(kind),
            ConnectOutcome::Fail(kind) => return Err(io::Error::new(kind, "scripted failure")),
            ConnectOutcome::Hang => std::future::pending().await,
        };

        let (local, remote) = tokio::io::duplex(4096);
        self.state.lock().unwrap().peers.push_back(remote);
        Ok(ScriptedStream {
            inner: local,
            read_error,
        })
    }
}
