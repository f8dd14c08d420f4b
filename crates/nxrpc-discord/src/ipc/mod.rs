//! Local desktop IPC transport.
//!
//! Connects to the desktop client over a Unix socket (or a named pipe on
//! Windows), performs the version handshake, and exchanges JSON command
//! frames correlated by nonce.

mod client;
mod codec;
mod endpoint;

pub use client::DiscordIpc;
pub use codec::Opcode;
pub use endpoint::IpcStream;
