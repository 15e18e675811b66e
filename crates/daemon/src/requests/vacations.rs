// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vacations aggregation: sequential month fetches with dedupe.
//!
//! The calendar endpoint serves one month per call, so the requested
//! range expands into first-of-month anchors fetched in order. An event
//! spanning a month boundary appears in each covered month's response
//! and must collapse to one entry: dedupe key `(RefId, StartDate,
//! EndDate)`, last seen wins, insertion order preserved.

use std::sync::Arc;

use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::debug;

use paylens_core::api::{CalendarEvent, CalendarFilter};
use paylens_core::dates::{month_anchors, ranges_overlap};
use paylens_core::records::VacationsResult;
use paylens_core::scope::Scope;

use crate::ctx::Ctx;
use crate::scopes::OperationHandle;

use super::{
    conclude, notify_duplicate_start, publish_cached, set_progress, to_event_data, FetchError,
};

const SCOPE: Scope = Scope::Vacations;
const FAILURE_MESSAGE: &str = "Failed to fetch vacation data";

pub async fn fetch_vacations(
    ctx: Arc<Ctx>,
    token: String,
    from: NaiveDate,
    to: NaiveDate,
    filter: CalendarFilter,
) {
    let Some(handle) = ctx.scopes.begin(SCOPE) else {
        notify_duplicate_start(&ctx, SCOPE);
        return;
    };
    if let Some(cached) = ctx.store.cached_vacations() {
        if cached.matches(from, to, filter) {
            debug!(%from, %to, filter = filter.as_str(), "serving vacations from cache");
            ctx.scopes.finish(&handle);
            publish_cached(&ctx, SCOPE, &cached);
            return;
        }
    }
    let outcome = run(&ctx, &handle, &token, from, to, filter).await;
    conclude(&ctx, &handle, SCOPE, FAILURE_MESSAGE, outcome);
}

async fn run(
    ctx: &Arc<Ctx>,
    handle: &OperationHandle,
    token: &str,
    from: NaiveDate,
    to: NaiveDate,
    filter: CalendarFilter,
) -> Result<serde_json::Value, FetchError> {
    let cancel = handle.token();
    set_progress(ctx, SCOPE, "Fetching vacations...")?;

    let anchors = month_anchors(from, to);
    let total_months = anchors.len();

    let mut deduped: IndexMap<(String, NaiveDate, NaiveDate), CalendarEvent> = IndexMap::new();
    for (index, anchor) in anchors.into_iter().enumerate() {
        // Any month failing fails the whole operation.
        let events = ctx.gateway.calendar_month(token, anchor, filter, cancel).await?;
        for event in events {
            if event.event_type.is_time_off()
                && ranges_overlap(event.start_date, event.end_date, from, to)
            {
                deduped.insert(event.dedupe_key(), event);
            }
        }
        set_progress(
            ctx,
            SCOPE,
            &format!("Fetched {} of {} months...", index + 1, total_months),
        )?;
    }

    let result = VacationsResult {
        vacations: deduped.into_values().collect(),
        from_date: from,
        to_date: to,
        filter_type: filter,
        fetched_at: ctx.now_ms(),
    };
    ctx.store.cache_vacations(result.clone())?;
    to_event_data(&result)
}

#[cfg(test)]
#[path = "vacations_tests.rs"]
mod tests;
