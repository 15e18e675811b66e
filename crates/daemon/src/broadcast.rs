// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort event fan-out to attached UI listeners.
//!
//! Fire-and-forget, at-most-once. A publish with nobody listening is not
//! an error and is never retried or queued; durable outcome lives in the
//! store, which a reattaching UI re-reads.

use tokio::sync::broadcast;
use tracing::trace;

use crate::protocol::UiEvent;

#[derive(Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<UiEvent>,
}

impl Broadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Deliver `event` to current subscribers, if any.
    pub fn publish(&self, event: UiEvent) {
        let kind = event.kind;
        match self.tx.send(event) {
            Ok(listeners) => trace!(%kind, listeners, "event delivered"),
            Err(_) => trace!(%kind, "no listener attached; event dropped"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
#[path = "broadcast_tests.rs"]
mod tests;
