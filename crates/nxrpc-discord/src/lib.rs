//! Remote presence transport for nxrpc.
//!
//! Defines the [`PresenceTransport`] seam the synchronization core talks
//! to, the `SET_ACTIVITY` payload model, and a desktop IPC implementation.

pub mod ipc;
pub mod payload;
pub mod transport;

pub use ipc::DiscordIpc;
pub use payload::ActivityPayload;
pub use transport::{PresenceTransport, TransportError};
