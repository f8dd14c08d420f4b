//! Length-prefixed opcode framing used by the desktop IPC socket.
//!
//! ```text
//! ┌──────────────────┬──────────────────┬──────────────────────┐
//! │ Opcode (4 bytes) │ Length (4 bytes) │ Payload (variable)   │
//! │ Little-endian    │ Little-endian    │ UTF-8 JSON           │
//! └──────────────────┴──────────────────┴──────────────────────┘
//! ```

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::transport::TransportError;

/// Upper bound on an inbound payload; larger frames are rejected.
pub(crate) const MAX_PAYLOAD_LEN: u32 = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Handshake = 0,
    Frame = 1,
    Close = 2,
    Ping = 3,
    Pong = 4,
}

impl TryFrom<u32> for Opcode {
    type Error = TransportError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Opcode::Handshake),
            1 => Ok(Opcode::Frame),
            2 => Ok(Opcode::Close),
            3 => Ok(Opcode::Ping),
            4 => Ok(Opcode::Pong),
            other => Err(TransportError::Protocol(format!("unknown opcode {other}"))),
        }
    }
}

/// Encode one frame.
pub(crate) fn encode_frame(opcode: Opcode, payload: &serde_json::Value) -> Result<Vec<u8>, TransportError> {
    let body = serde_json::to_vec(payload)?;
    let mut buf = Vec::with_capacity(8 + body.len());
    buf.extend_from_slice(&(opcode as u32).to_le_bytes());
    buf.extend_from_slice(&(body.len() as u32).to_le_bytes());
    buf.extend_from_slice(&body);
    Ok(buf)
}

pub(crate) async fn write_frame<W>(
    writer: &mut W,
    opcode: Opcode,
    payload: &serde_json::Value,
) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    let buf = encode_frame(opcode, payload)?;
    writer.write_all(&buf).await?;
    writer.flush().await?;
    Ok(())
}

pub(crate) async fn read_frame<R>(reader: &mut R) -> Result<(Opcode, serde_json::Value), TransportError>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; 8];
    reader.read_exact(&mut header).await?;
    let opcode = Opcode::try_from(u32::from_le_bytes([header[0], header[1], header[2], header[3]]))?;
    let len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if len > MAX_PAYLOAD_LEN {
        return Err(TransportError::Protocol(format!(
            "frame of {len} bytes exceeds {MAX_PAYLOAD_LEN}"
        )));
    }

    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await?;
    let payload = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| TransportError::Protocol(format!("invalid frame payload: {e}")))?
    };
    Ok((opcode, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_little_endian() {
        let buf = encode_frame(Opcode::Close, &serde_json::json!({})).unwrap();
        assert_eq!(&buf[0..4], &[2, 0, 0, 0]);
        assert_eq!(&buf[4..8], &[2, 0, 0, 0]);
        assert_eq!(&buf[8..], b"{}");
    }

    #[tokio::test]
    async fn reads_back_written_frame() {
        let (mut a, mut b) = tokio::io::duplex(1024);
        let payload = serde_json::json!({"cmd": "DISPATCH", "evt": "READY"});
        write_frame(&mut a, Opcode::Frame, &payload).await.unwrap();

        let (opcode, read) = read_frame(&mut b).await.unwrap();
        assert_eq!(opcode, Opcode::Frame);
        assert_eq!(read, payload);
    }

    #[tokio::test]
    async fn rejects_unknown_opcode() {
        let (mut a, mut b) = tokio::io::duplex(64);
        a.write_all(&[9, 0, 0, 0, 0, 0, 0, 0]).await.unwrap();
        let err = read_frame(&mut b).await.unwrap_err();
        assert!(matches!(err, TransportError::Protocol(_)));
    }

    #[tokio::test]
    async fn rejects_oversized_frame() {
        let (mut a, mut b) = tokio::io::duplex(64);
        let mut header = vec![1, 0, 0, 0];
        header.extend_from_slice(&(MAX_PAYLOAD_LEN + 1).to_le_bytes());
        a.write_all(&header).await.unwrap();
        let err = read_frame(&mut b).await.unwrap_err();
        assert!(matches!(err, TransportError::Protocol(_)));
    }

    #[tokio::test]
    async fn truncated_frame_is_io_error() {
        let (mut a, mut b) = tokio::io::duplex(64);
        a.write_all(&[1, 0, 0, 0]).await.unwrap();
        drop(a);
        let err = read_frame(&mut b).await.unwrap_err();
        assert!(matches!(err, TransportError::Io(_)));
    }
}
