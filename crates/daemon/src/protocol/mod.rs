// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! IPC Protocol for daemon communication.
//!
//! Wire format: 4-byte length prefix (big-endian) + JSON payload

mod event;
mod request;
mod response;
mod wire;

pub use event::{EventKind, EventPhase, UiEvent};
pub use request::Request;
pub use response::Response;
pub use wire::{
    encode, read_message, read_value, write_event, write_message, write_response, ProtocolError,
};
