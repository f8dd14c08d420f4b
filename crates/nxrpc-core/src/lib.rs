//! Synchronization core for nxrpc.
//!
//! Reads title notifications from the console, turns them into activity
//! records and keeps the remote presence in step with them.

pub mod artwork;
pub mod frame;
pub mod link;
pub mod normalizer;
pub mod publisher;
pub mod session;
pub mod slot;

#[cfg(test)]
mod testing;

pub use artwork::{ArtworkProbe, HttpArtworkProbe, ProbeError};
pub use frame::{decode, DecodeError, RawMessage, FRAME_LEN};
pub use link::{ConsoleLink, Connector, LinkConfig, LinkError, LinkState, TcpConnector};
pub use normalizer::ActivityNormalizer;
pub use publisher::{PresencePublisher, PublishHandle};
pub use session::{establish_session, RetryPolicy, SessionController, SessionError};
