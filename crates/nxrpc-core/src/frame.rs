//! Fixed-layout title notification frames sent by the console.
//!
//! ```text
//! ┌────────────────┬──────────────────┬───────────────────────────────┐
//! │ Magic (8 B)    │ Title id (8 B)   │ Name (612 B, NUL padded)      │
//! │ ignored        │ u64 little-endian│ UTF-8, ends at first NUL      │
//! └────────────────┴──────────────────┴───────────────────────────────┘
//! ```
//!
//! Frames carry no length prefix. Each read from the socket is decoded on
//! its own; bytes past the fixed layout are ignored and short reads are
//! rejected.

use nxrpc_common::TitleId;

pub const MAGIC_LEN: usize = 8;
pub const TITLE_ID_LEN: usize = 8;
pub const NAME_LEN: usize = 612;
pub const FRAME_LEN: usize = MAGIC_LEN + TITLE_ID_LEN + NAME_LEN;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("frame too short: {len} bytes, need {FRAME_LEN}")]
    TooShort { len: usize },
}

/// One decoded frame. Lives only as long as the read that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub magic: u64,
    pub title_id: TitleId,
    pub name: String,
}

/// Decode the fixed layout at the start of `buf`.
pub fn decode(buf: &[u8]) -> Result<RawMessage, DecodeError> {
    if buf.len() < FRAME_LEN {
        return Err(DecodeError::TooShort { len: buf.len() });
    }

    let (magic, rest) = buf.split_at(MAGIC_LEN);
    let (title_id, rest) = rest.split_at(TITLE_ID_LEN);
    let block = &rest[..NAME_LEN];
    let end = block.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);

    Ok(RawMessage {
        magic: u64::from_le_bytes(to_array(magic)),
        title_id: TitleId(u64::from_le_bytes(to_array(title_id))),
        name: String::from_utf8_lossy(&block[..end]).into_owned(),
    })
}

fn to_array(bytes: &[u8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(bytes);
    out
}

#[cfg(test)]
pub(crate) fn encode(title_id: u64, name: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; FRAME_LEN];
    buf[..MAGIC_LEN].copy_from_slice(&0xFFAA_EEFF_u64.to_le_bytes());
    buf[MAGIC_LEN..MAGIC_LEN + TITLE_ID_LEN].copy_from_slice(&title_id.to_le_bytes());
    let len = name.len().min(NAME_LEN);
    buf[MAGIC_LEN + TITLE_ID_LEN..MAGIC_LEN + TITLE_ID_LEN + len].copy_from_slice(&name[..len]);
    buf
}
