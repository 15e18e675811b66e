// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scope controller: at most one live cancellation handle per request
//! scope.
//!
//! Handles carry a generation id. A finishing engine clears only its own
//! registration, so an abort followed by an immediate restart cannot be
//! clobbered by the old engine's cleanup racing in after the new
//! operation registered.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use paylens_core::scope::{ClearScope, Scope};

struct Active {
    token: CancellationToken,
    id: u64,
}

/// Registration for one running operation.
pub struct OperationHandle {
    scope: Scope,
    id: u64,
    token: CancellationToken,
}

impl OperationHandle {
    /// The cancellation token fanned out to every network call belonging
    /// to this operation.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// Per-scope cancellation-handle table.
#[derive(Default)]
pub struct ScopeController {
    active: Mutex<HashMap<Scope, Active>>,
    next_id: AtomicU64,
}

impl ScopeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_active(&self, scope: Scope) -> bool {
        self.active.lock().contains_key(&scope)
    }

    /// Register a new operation for `scope`. Returns `None` when one is
    /// already active — the caller must not start any network work.
    pub fn begin(&self, scope: Scope) -> Option<OperationHandle> {
        let mut active = self.active.lock();
        if active.contains_key(&scope) {
            return None;
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        active.insert(scope, Active { token: token.clone(), id });
        Some(OperationHandle { scope, id, token })
    }

    /// Remove the registration if it still belongs to `handle`.
    pub fn finish(&self, handle: &OperationHandle) {
        let mut active = self.active.lock();
        if active.get(&handle.scope).is_some_and(|a| a.id == handle.id) {
            active.remove(&handle.scope);
        }
    }

    /// Cancel and discard the handle(s) for the selected scope(s).
    ///
    /// Only cancels: terminal events are the running engine's job, which
    /// keeps the one-terminal-event-per-operation rule intact. Returns
    /// the scopes that actually had an active operation.
    pub fn abort(&self, clear: ClearScope) -> Vec<Scope> {
        let mut active = self.active.lock();
        let mut aborted = Vec::new();
        for scope in clear.scopes() {
            if let Some(entry) = active.remove(&scope) {
                debug!(%scope, "aborting active operation");
                entry.token.cancel();
                aborted.push(scope);
            }
        }
        aborted
    }
}

#[cfg(test)]
#[path = "scopes_tests.rs"]
mod tests;
