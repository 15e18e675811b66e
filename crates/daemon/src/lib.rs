// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Paylens daemon library
//!
//! The background request-orchestration core: receives typed commands
//! from UI clients, runs multi-page/multi-month aggregations against the
//! remote API, tracks durable operation state, and broadcasts progress
//! and terminal events to whichever client is currently listening.
//!
//! This module also exposes the IPC protocol types for use by UI clients.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod broadcast;
pub mod ctx;
pub mod env;
pub mod listener;
pub mod protocol;
pub mod requests;
pub mod scopes;

pub use broadcast::Broadcaster;
pub use ctx::Ctx;
pub use listener::Listener;
pub use protocol::{EventKind, EventPhase, Request, Response, UiEvent};
pub use scopes::ScopeController;
