// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared daemon context for the dispatcher and aggregation engines.
//!
//! All shared mutable state lives here as an explicit injected object —
//! never as ambient module-level state — so tests can instantiate
//! independent instances per case.

use std::sync::Arc;

use paylens_core::clock::Clock;
use paylens_gateway::ApiGateway;
use paylens_storage::Store;

use crate::broadcast::Broadcaster;
use crate::scopes::ScopeController;

/// Everything an engine or request handler needs.
pub struct Ctx {
    pub gateway: Arc<dyn ApiGateway>,
    pub store: Arc<Store>,
    pub scopes: ScopeController,
    pub broadcaster: Broadcaster,
    pub clock: Arc<dyn Clock>,
}

impl Ctx {
    pub fn new(gateway: Arc<dyn ApiGateway>, store: Arc<Store>, clock: Arc<dyn Clock>) -> Arc<Self> {
        Arc::new(Self {
            gateway,
            store,
            scopes: ScopeController::new(),
            broadcaster: Broadcaster::new(64),
            clock,
        })
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.epoch_ms()
    }
}
