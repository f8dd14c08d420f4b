//! Locating and opening the desktop client's IPC endpoint.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::transport::TransportError;

/// Number of numbered endpoints the desktop client may listen on.
const ENDPOINT_SLOTS: u8 = 10;

/// Any duplex byte stream the IPC client can speak over.
pub trait IpcStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> IpcStream for T {}

/// Candidate socket paths, in probe order.
#[cfg(unix)]
pub(crate) fn candidate_paths() -> Vec<std::path::PathBuf> {
    let base = ["XDG_RUNTIME_DIR", "TMPDIR", "TMP", "TEMP"]
        .iter()
        .find_map(|key| std::env::var_os(key))
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from("/tmp"));

    (0..ENDPOINT_SLOTS)
        .map(|i| base.join(format!("discord-ipc-{i}")))
        .collect()
}

#[cfg(windows)]
pub(crate) fn candidate_paths() -> Vec<std::path::PathBuf> {
    (0..ENDPOINT_SLOTS)
        .map(|i| std::path::PathBuf::from(format!(r"\\?\pipe\discord-ipc-{i}")))
        .collect()
}

/// Open the first endpoint that accepts a connection.
pub(crate) async fn connect_any() -> Result<Box<dyn IpcStream>, TransportError> {
    for path in candidate_paths() {
        match open(&path).await {
            Ok(stream) => {
                debug!(path = %path.display(), "Opened presence IPC endpoint");
                return Ok(stream);
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "IPC endpoint unavailable");
            }
        }
    }
    Err(TransportError::NoEndpoint)
}

#[cfg(unix)]
async fn open(path: &std::path::Path) -> std::io::Result<Box<dyn IpcStream>> {
    let stream = tokio::net::UnixStream::connect(path).await?;
    Ok(Box::new(stream))
}

#[cfg(windows)]
async fn open(path: &std::path::Path) -> std::io::Result<Box<dyn IpcStream>> {
    let pipe = tokio::net::windows::named_pipe::ClientOptions::new().open(path)?;
    Ok(Box::new(pipe))
}
