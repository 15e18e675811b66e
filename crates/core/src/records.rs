// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable records: cached aggregation results and the in-flight
//! operation descriptor.
//!
//! A cached result is reusable only when its stored query parameters
//! exactly match the requested ones; the `matches` methods encode that
//! rule. The descriptor is a single process-wide slot, not one per
//! scope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{CalendarEvent, CalendarFilter, TrackedEmployee};
use crate::scope::Scope;

/// Staleness threshold for orphaned operation descriptors (5 minutes).
///
/// A reader that finds a running descriptor older than this treats it as
/// left over from a crashed run and clears it. Display recovery only —
/// never a cancellation mechanism.
pub const STALE_OPERATION_MS: u64 = 5 * 60 * 1000;

/// The single in-flight long-running fetch, if any.
///
/// Created when an aggregation engine begins work, overwritten as
/// progress advances, cleared on completion, error, or cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    pub kind: Scope,
    pub is_running: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_message: Option<String>,
    /// Milliseconds since epoch; refreshed on every progress update.
    pub started_at: u64,
}

impl OperationDescriptor {
    pub fn running(kind: Scope, progress: impl Into<String>, now_ms: u64) -> Self {
        Self {
            kind,
            is_running: true,
            progress_message: Some(progress.into()),
            started_at: now_ms,
        }
    }

    /// Orphan check: running but last touched more than the staleness
    /// threshold ago.
    pub fn is_stale(&self, now_ms: u64) -> bool {
        self.is_running && now_ms.saturating_sub(self.started_at) > STALE_OPERATION_MS
    }
}

/// Last successfully completed project-income aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIncomeResult {
    /// Sum of `Income` across every fetched page.
    pub income: f64,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub fetched_at: u64,
}

impl ProjectIncomeResult {
    pub fn matches(&self, from_date: NaiveDate, to_date: NaiveDate) -> bool {
        self.from_date == from_date && self.to_date == to_date
    }
}

/// A tracking record joined with its employment-type classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLogEmployee {
    #[serde(flatten)]
    pub record: TrackedEmployee,
    #[serde(rename = "isFreelancer", default)]
    pub is_freelancer: bool,
}

/// Last successfully completed work-logs aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogsResult {
    pub employees: Vec<WorkLogEmployee>,
    pub team_id: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    /// Display-only flag; persisted with the result, never alters the fetch.
    pub hide_freelancers: bool,
    pub fetched_at: u64,
}

impl WorkLogsResult {
    pub fn matches(&self, team_id: &str, from_date: NaiveDate, to_date: NaiveDate) -> bool {
        self.team_id == team_id && self.from_date == from_date && self.to_date == to_date
    }
}

/// Last successfully completed vacations aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationsResult {
    pub vacations: Vec<CalendarEvent>,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub filter_type: CalendarFilter,
    pub fetched_at: u64,
}

impl VacationsResult {
    pub fn matches(
        &self,
        from_date: NaiveDate,
        to_date: NaiveDate,
        filter_type: CalendarFilter,
    ) -> bool {
        self.from_date == from_date && self.to_date == to_date && self.filter_type == filter_type
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
