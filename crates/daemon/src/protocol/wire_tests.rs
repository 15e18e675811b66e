// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::protocol::{Request, UiEvent};
use paylens_core::scope::Scope;
use std::io::Cursor;
use std::time::Duration;

const TEST_TIMEOUT: Duration = Duration::from_secs(1);

#[test]
fn encode_prefixes_body_with_big_endian_length() {
    let frame = encode(&Request::Subscribe).expect("encode failed");
    let body = serde_json::to_vec(&Request::Subscribe).expect("serialize failed");
    assert_eq!(&frame[..4], (body.len() as u32).to_be_bytes());
    assert_eq!(&frame[4..], &body[..]);
}

#[tokio::test]
async fn read_message_returns_body_of_written_frame() {
    let frame = encode(&Request::GetCachedData).expect("encode failed");
    let mut reader = Cursor::new(frame);

    let body = read_message(&mut reader).await.expect("read failed");
    let decoded: Request = serde_json::from_slice(&body).expect("deserialize failed");
    assert_eq!(decoded, Request::GetCachedData);
}

#[tokio::test]
async fn read_message_reports_closed_connection_on_eof() {
    let mut reader = Cursor::new(Vec::new());
    let err = read_message(&mut reader).await.unwrap_err();
    assert!(matches!(err, ProtocolError::ConnectionClosed));
}

#[tokio::test]
async fn read_message_reports_closed_connection_on_truncated_body() {
    // Prefix claims 100 bytes but only 3 follow.
    let mut frame = 100u32.to_be_bytes().to_vec();
    frame.extend_from_slice(b"abc");
    let mut reader = Cursor::new(frame);

    let err = read_message(&mut reader).await.unwrap_err();
    assert!(matches!(err, ProtocolError::ConnectionClosed));
}

#[tokio::test]
async fn read_message_rejects_oversized_frame() {
    let mut reader = Cursor::new((u32::MAX).to_be_bytes().to_vec());
    let err = read_message(&mut reader).await.unwrap_err();
    assert!(matches!(err, ProtocolError::FrameTooLarge(_)));
}

#[tokio::test]
async fn write_then_read_round_trips_over_duplex() {
    let (mut client, mut server) = tokio::io::duplex(1024);

    let frame = serde_json::to_vec(&Request::Subscribe).expect("serialize failed");
    write_message(&mut client, &frame).await.expect("write failed");

    let body = read_message(&mut server).await.expect("read failed");
    let decoded: Request = serde_json::from_slice(&body).expect("deserialize failed");
    assert_eq!(decoded, Request::Subscribe);
}

#[tokio::test]
async fn read_value_yields_untyped_json() {
    let (mut client, mut server) = tokio::io::duplex(1024);
    let frame = encode(&serde_json::json!({"type": "BOGUS_COMMAND"})).expect("encode failed");
    client.write_all(&frame).await.expect("write failed");

    let value = read_value(&mut server, TEST_TIMEOUT).await.expect("read failed");
    assert_eq!(value["type"], "BOGUS_COMMAND");
}

#[tokio::test]
async fn read_value_times_out_on_silence() {
    let (_client, mut server) = tokio::io::duplex(1024);
    let err = read_value(&mut server, Duration::from_millis(20)).await.unwrap_err();
    assert!(matches!(err, ProtocolError::Timeout));
}

#[tokio::test]
async fn write_response_and_write_event_frame_correctly() {
    let (mut client, mut server) = tokio::io::duplex(1024);

    write_response(&mut client, &Response::Ack, TEST_TIMEOUT).await.expect("write failed");
    write_event(&mut client, &UiEvent::progress(Scope::Vacations, "m"), TEST_TIMEOUT)
        .await
        .expect("write failed");

    let body = read_message(&mut server).await.expect("read failed");
    let response: Response = serde_json::from_slice(&body).expect("deserialize failed");
    assert_eq!(response, Response::Ack);

    let body = read_message(&mut server).await.expect("read failed");
    let event: UiEvent = serde_json::from_slice(&body).expect("deserialize failed");
    assert_eq!(event.progress.as_deref(), Some("m"));
}
