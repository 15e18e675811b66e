// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Length-prefixed JSON framing over a byte stream.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::{Response, UiEvent};

/// Refuse frames larger than this (4 MiB).
const MAX_FRAME_LEN: u32 = 4 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection closed")]
    ConnectionClosed,

    #[error("timed out")]
    Timeout,

    #[error("frame of {0} bytes exceeds limit")]
    FrameTooLarge(u32),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize `msg` into a single length-prefixed frame.
pub fn encode<T: Serialize>(msg: &T) -> Result<Vec<u8>, ProtocolError> {
    let body = serde_json::to_vec(msg)?;
    let mut frame = Vec::with_capacity(4 + body.len());
    #[allow(clippy::cast_possible_truncation)]
    frame.extend_from_slice(&(body.len() as u32).to_be_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Read one frame and return its raw JSON body.
pub async fn read_message<R>(reader: &mut R) -> Result<Vec<u8>, ProtocolError>
where
    R: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 4];
    if let Err(e) = reader.read_exact(&mut len_buf).await {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            return Err(ProtocolError::ConnectionClosed);
        }
        return Err(e.into());
    }
    let len = u32::from_be_bytes(len_buf);
    if len > MAX_FRAME_LEN {
        return Err(ProtocolError::FrameTooLarge(len));
    }
    let mut body = vec![0u8; len as usize];
    if let Err(e) = reader.read_exact(&mut body).await {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            return Err(ProtocolError::ConnectionClosed);
        }
        return Err(e.into());
    }
    Ok(body)
}

/// Write one already-encoded message as a frame.
pub async fn write_message<W>(writer: &mut W, msg: &[u8]) -> Result<(), ProtocolError>
where
    W: AsyncWriteExt + Unpin,
{
    #[allow(clippy::cast_possible_truncation)]
    writer.write_all(&(msg.len() as u32).to_be_bytes()).await?;
    writer.write_all(msg).await?;
    writer.flush().await?;
    Ok(())
}

/// Read the next frame as untyped JSON, bounded by `timeout`.
///
/// Commands are read untyped first so the dispatcher can tell an unknown
/// command apart from a known command with a bad payload.
pub async fn read_value<R>(
    reader: &mut R,
    timeout: Duration,
) -> Result<serde_json::Value, ProtocolError>
where
    R: AsyncReadExt + Unpin,
{
    let body = tokio::time::timeout(timeout, read_message(reader))
        .await
        .map_err(|_| ProtocolError::Timeout)??;
    Ok(serde_json::from_slice(&body)?)
}

/// Write a response frame, bounded by `timeout`.
pub async fn write_response<W>(
    writer: &mut W,
    response: &Response,
    timeout: Duration,
) -> Result<(), ProtocolError>
where
    W: AsyncWriteExt + Unpin,
{
    let frame = serde_json::to_vec(response)?;
    tokio::time::timeout(timeout, write_message(writer, &frame))
        .await
        .map_err(|_| ProtocolError::Timeout)?
}

/// Write a broadcast event frame, bounded by `timeout`.
pub async fn write_event<W>(
    writer: &mut W,
    event: &UiEvent,
    timeout: Duration,
) -> Result<(), ProtocolError>
where
    W: AsyncWriteExt + Unpin,
{
    let frame = serde_json::to_vec(event)?;
    tokio::time::timeout(timeout, write_message(writer, &frame))
        .await
        .map_err(|_| ProtocolError::Timeout)?
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
