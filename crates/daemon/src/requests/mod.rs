// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregation engines: one spawned task per started operation.
//!
//! Each engine owns the full lifecycle of its operation: the duplicate-
//! start guard, the cached-result fast path, the operation descriptor,
//! the network sequence, and exactly one terminal event (success, error
//! or cancelled). The dispatcher only spawns; it never sees engine
//! failures.

mod project_income;
mod vacations;
mod work_logs;

pub use project_income::fetch_project_income;
pub use vacations::fetch_vacations;
pub use work_logs::fetch_work_logs;

use serde::Serialize;
use tracing::{error, info, warn};

use paylens_core::records::OperationDescriptor;
use paylens_core::scope::Scope;
use paylens_gateway::GatewayError;
use paylens_storage::StoreError;

use crate::ctx::Ctx;
use crate::protocol::UiEvent;
use crate::scopes::OperationHandle;

/// Soft notification for a duplicate start; the original run is left
/// untouched.
pub(crate) const ALREADY_IN_PROGRESS: &str = "A request is already in progress...";

/// Engine-internal failure, collapsed to one of the two terminal phases.
#[derive(Debug)]
enum FetchError {
    Cancelled,
    Failed(String),
}

impl From<GatewayError> for FetchError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Cancelled => FetchError::Cancelled,
            other => FetchError::Failed(other.to_string()),
        }
    }
}

impl From<StoreError> for FetchError {
    fn from(e: StoreError) -> Self {
        FetchError::Failed(e.to_string())
    }
}

/// Persist a progress line to the descriptor slot and broadcast it.
///
/// The descriptor timestamp is refreshed on every write, so a live
/// operation never trips the staleness rule mid-run.
fn set_progress(ctx: &Ctx, scope: Scope, message: &str) -> Result<(), FetchError> {
    ctx.store.set_request_state(OperationDescriptor::running(scope, message, ctx.now_ms()))?;
    ctx.broadcaster.publish(UiEvent::progress(scope, message));
    Ok(())
}

/// Serialize a finished aggregate for the success event.
fn to_event_data<T: Serialize>(result: &T) -> Result<serde_json::Value, FetchError> {
    serde_json::to_value(result).map_err(|e| FetchError::Failed(e.to_string()))
}

/// Common tail of every engine: release the scope registration, clear
/// the descriptor, emit the single terminal event.
fn conclude(
    ctx: &Ctx,
    handle: &OperationHandle,
    scope: Scope,
    failure_message: &str,
    outcome: Result<serde_json::Value, FetchError>,
) {
    ctx.scopes.finish(handle);
    if let Err(e) = ctx.store.clear_request_state() {
        error!(%scope, error = %e, "failed to clear operation descriptor");
    }
    match outcome {
        Ok(data) => {
            info!(%scope, "aggregation completed");
            ctx.broadcaster.publish(UiEvent::success(scope, data));
        }
        Err(FetchError::Cancelled) => {
            info!(%scope, "aggregation cancelled");
            ctx.broadcaster.publish(UiEvent::cancelled(scope));
        }
        Err(FetchError::Failed(detail)) => {
            error!(%scope, detail, "aggregation failed");
            ctx.broadcaster.publish(UiEvent::error(scope, failure_message));
        }
    }
}

/// Cached-result fast path: broadcast success straight from the store,
/// no descriptor, no network.
fn publish_cached<T: Serialize>(ctx: &Ctx, scope: Scope, cached: &T) {
    match to_event_data(cached) {
        Ok(data) => ctx.broadcaster.publish(UiEvent::success(scope, data)),
        Err(e) => error!(%scope, error = ?e, "cached result did not serialize"),
    }
}

/// Duplicate-start guard: a scope with an active operation gets a single
/// soft progress event and no new work.
fn notify_duplicate_start(ctx: &Ctx, scope: Scope) {
    warn!(%scope, "rejecting duplicate start");
    ctx.broadcaster.publish(UiEvent::progress(scope, ALREADY_IN_PROGRESS));
}

#[cfg(test)]
pub(crate) mod test_support;
