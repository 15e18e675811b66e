// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine test harness: a real context wired to fakes.

use std::sync::Arc;

use tempfile::TempDir;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;

use paylens_core::clock::FakeClock;
use paylens_gateway::FakeGateway;
use paylens_storage::Store;

use crate::ctx::Ctx;
use crate::protocol::{EventPhase, UiEvent};

pub(crate) struct Harness {
    pub ctx: Arc<Ctx>,
    pub gateway: Arc<FakeGateway>,
    pub clock: FakeClock,
    pub events: Receiver<UiEvent>,
    _dir: TempDir,
}

pub(crate) fn harness() -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(Store::open(dir.path().join("state.json")).expect("open store"));
    let gateway = Arc::new(FakeGateway::new());
    let clock = FakeClock::new();
    let gateway_dyn: Arc<dyn paylens_gateway::ApiGateway> = Arc::clone(&gateway) as _;
    let ctx = Ctx::new(gateway_dyn, store, Arc::new(clock.clone()));
    let events = ctx.broadcaster.subscribe();
    Harness { ctx, gateway, clock, events, _dir: dir }
}

/// Yield until the scope registers as active (the spawned engine has
/// passed its duplicate-start guard).
pub(crate) async fn wait_active(ctx: &Ctx, scope: paylens_core::scope::Scope) {
    for _ in 0..100 {
        if ctx.scopes.has_active(scope) {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("operation never registered for {scope}");
}

impl Harness {
    /// Every event published so far, without blocking.
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                Err(TryRecvError::Lagged(_)) => continue,
            }
        }
        events
    }

    /// The single terminal event among those drained; panics when there
    /// is not exactly one.
    pub fn terminal_event(&mut self) -> UiEvent {
        let terminals: Vec<UiEvent> = self
            .drain_events()
            .into_iter()
            .filter(|e| e.kind.phase != EventPhase::Progress)
            .collect();
        assert_eq!(terminals.len(), 1, "expected exactly one terminal event, got {terminals:?}");
        terminals.into_iter().next().expect("one terminal event")
    }
}
