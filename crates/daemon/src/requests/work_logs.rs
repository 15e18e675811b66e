// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work-logs aggregation: a two-call join.
//!
//! Tracking records and agreements are fetched concurrently and joined
//! on employee id. Unlike project income there is no partial tolerance:
//! either call failing fails the whole operation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use paylens_core::records::{WorkLogEmployee, WorkLogsResult};
use paylens_core::scope::Scope;

use crate::ctx::Ctx;
use crate::scopes::OperationHandle;

use super::{
    conclude, notify_duplicate_start, publish_cached, set_progress, to_event_data, FetchError,
};

const SCOPE: Scope = Scope::WorkLogs;
const FAILURE_MESSAGE: &str = "Failed to fetch work logs";
const FREELANCER_USER_TYPE: &str = "freelancer";

pub async fn fetch_work_logs(
    ctx: Arc<Ctx>,
    token: String,
    team_id: String,
    from: NaiveDate,
    to: NaiveDate,
    hide_freelancers: bool,
) {
    let Some(handle) = ctx.scopes.begin(SCOPE) else {
        notify_duplicate_start(&ctx, SCOPE);
        return;
    };
    if let Some(cached) = ctx.store.cached_work_logs() {
        if cached.matches(&team_id, from, to) {
            debug!(team_id, %from, %to, "serving work logs from cache");
            ctx.scopes.finish(&handle);
            publish_cached(&ctx, SCOPE, &cached);
            return;
        }
    }
    let outcome = run(&ctx, &handle, &token, &team_id, from, to, hide_freelancers).await;
    conclude(&ctx, &handle, SCOPE, FAILURE_MESSAGE, outcome);
}

async fn run(
    ctx: &Arc<Ctx>,
    handle: &OperationHandle,
    token: &str,
    team_id: &str,
    from: NaiveDate,
    to: NaiveDate,
    hide_freelancers: bool,
) -> Result<serde_json::Value, FetchError> {
    let cancel = handle.token();
    set_progress(ctx, SCOPE, "Fetching work logs...")?;

    let (tracking, agreements) = tokio::try_join!(
        ctx.gateway.team_tracking(token, team_id, from, to, cancel),
        ctx.gateway.team_agreements(token, team_id, from, to, cancel),
    )?;

    // Employment-type lookup; an id with no agreement is not a
    // freelancer.
    let freelancers: HashMap<String, bool> = agreements
        .data
        .iter()
        .map(|a| (a.id.to_string(), a.user_type == FREELANCER_USER_TYPE))
        .collect();

    let employees: Vec<WorkLogEmployee> = tracking
        .into_iter()
        .map(|record| {
            let is_freelancer = freelancers.get(&record.id.to_string()).copied().unwrap_or(false);
            WorkLogEmployee { record, is_freelancer }
        })
        .collect();

    let result = WorkLogsResult {
        employees,
        team_id: team_id.to_owned(),
        from_date: from,
        to_date: to,
        hide_freelancers,
        fetched_at: ctx.now_ms(),
    };
    ctx.store.cache_work_logs(result.clone())?;
    to_event_data(&result)
}

#[cfg(test)]
#[path = "work_logs_tests.rs"]
mod tests;
