// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot persistence with atomic replace.
//!
//! Every mutation rewrites the snapshot through a temp file + rename so
//! a crash never leaves a half-written state file. A snapshot that fails
//! to parse is moved aside to `.bak` and replaced with empty state.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use paylens_core::records::{
    OperationDescriptor, ProjectIncomeResult, VacationsResult, WorkLogsResult,
};
use paylens_core::scope::{ClearScope, Scope};

/// Errors from snapshot persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The complete persisted state: three cached results plus the single
/// operation-descriptor slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_income: Option<ProjectIncomeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_logs: Option<WorkLogsResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacations: Option<VacationsResult>,
    pub request_state: Option<OperationDescriptor>,
}

/// Durable key-value store backed by a single JSON snapshot.
pub struct Store {
    path: PathBuf,
    data: Mutex<StoredData>,
}

impl Store {
    /// Open the snapshot at `path`, creating empty state if absent.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let data = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(data) => data,
                Err(e) => {
                    let bak = path.with_extension("bak");
                    warn!(path = %path.display(), error = %e, bak = %bak.display(),
                        "snapshot is corrupt; moving aside and starting empty");
                    let _ = fs::rename(&path, &bak);
                    StoredData::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => StoredData::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, data: Mutex::new(data) })
    }

    /// Current state, no recovery applied.
    pub fn snapshot(&self) -> StoredData {
        self.data.lock().clone()
    }

    /// Current state with the orphaned-descriptor recovery rule applied:
    /// a running descriptor older than the staleness threshold is cleared
    /// (and the clear persisted) before the snapshot is returned.
    pub fn snapshot_recovered(&self, now_ms: u64) -> Result<StoredData, StoreError> {
        let mut guard = self.data.lock();
        if guard.request_state.as_ref().is_some_and(|desc| desc.is_stale(now_ms)) {
            info!("clearing orphaned operation descriptor");
            guard.request_state = None;
            self.persist(&guard)?;
        }
        Ok(guard.clone())
    }

    pub fn set_request_state(&self, descriptor: OperationDescriptor) -> Result<(), StoreError> {
        self.mutate(|data| data.request_state = Some(descriptor))
    }

    pub fn clear_request_state(&self) -> Result<(), StoreError> {
        self.mutate(|data| data.request_state = None)
    }

    pub fn cached_project_income(&self) -> Option<ProjectIncomeResult> {
        self.data.lock().project_income.clone()
    }

    pub fn cached_work_logs(&self) -> Option<WorkLogsResult> {
        self.data.lock().work_logs.clone()
    }

    pub fn cached_vacations(&self) -> Option<VacationsResult> {
        self.data.lock().vacations.clone()
    }

    pub fn cache_project_income(&self, result: ProjectIncomeResult) -> Result<(), StoreError> {
        self.mutate(|data| data.project_income = Some(result))
    }

    pub fn cache_work_logs(&self, result: WorkLogsResult) -> Result<(), StoreError> {
        self.mutate(|data| data.work_logs = Some(result))
    }

    pub fn cache_vacations(&self, result: VacationsResult) -> Result<(), StoreError> {
        self.mutate(|data| data.vacations = Some(result))
    }

    /// Drop cached result(s) for the selected scope(s). The operation
    /// descriptor is always cleared.
    pub fn clear_scope_data(&self, scope: ClearScope) -> Result<(), StoreError> {
        self.mutate(|data| {
            for s in scope.scopes() {
                match s {
                    Scope::ProjectIncome => data.project_income = None,
                    Scope::WorkLogs => data.work_logs = None,
                    Scope::Vacations => data.vacations = None,
                }
            }
            data.request_state = None;
        })
    }

    fn mutate(&self, apply: impl FnOnce(&mut StoredData)) -> Result<(), StoreError> {
        let mut guard = self.data.lock();
        apply(&mut guard);
        self.persist(&guard)
    }

    fn persist(&self, data: &StoredData) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(data)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
