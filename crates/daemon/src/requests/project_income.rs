// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project-income aggregation: fan-out pagination with a total-count
//! race.
//!
//! Pages 1 and 2 are launched concurrently. Whichever settles first
//! supplies `Count` (its failure is fatal); the loser joins pages
//! 3..=total in an order-agnostic drain where per-page failures are
//! tolerated and cancellation short-circuits.

use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::NaiveDate;
use futures_util::future::{self, Either};
use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use paylens_core::api::ProjectsPage;
use paylens_core::records::ProjectIncomeResult;
use paylens_core::scope::Scope;
use paylens_gateway::GatewayError;

use crate::ctx::Ctx;
use crate::scopes::OperationHandle;

use super::{
    conclude, notify_duplicate_start, publish_cached, set_progress, to_event_data, FetchError,
};

const SCOPE: Scope = Scope::ProjectIncome;
const FAILURE_MESSAGE: &str = "An error occurred while fetching data.";
const PAGE_SIZE: u64 = 25;

type PageFetch = Pin<Box<dyn Future<Output = (u32, Result<ProjectsPage, GatewayError>)> + Send>>;

pub async fn fetch_project_income(ctx: Arc<Ctx>, token: String, from: NaiveDate, to: NaiveDate) {
    let Some(handle) = ctx.scopes.begin(SCOPE) else {
        notify_duplicate_start(&ctx, SCOPE);
        return;
    };
    if let Some(cached) = ctx.store.cached_project_income() {
        if cached.matches(from, to) {
            debug!(%from, %to, "serving project income from cache");
            ctx.scopes.finish(&handle);
            publish_cached(&ctx, SCOPE, &cached);
            return;
        }
    }
    let outcome = run(&ctx, &handle, &token, from, to).await;
    conclude(&ctx, &handle, SCOPE, FAILURE_MESSAGE, outcome);
}

/// Running tally over merged pages, idempotent per page number.
struct Tally {
    income: f64,
    received: BTreeSet<u32>,
    total_pages: u32,
}

impl Tally {
    /// Merge a page at most once; returns the progress line to publish
    /// when the page was new.
    fn absorb(&mut self, page: u32, body: &ProjectsPage) -> Option<String> {
        if !self.received.insert(page) {
            return None;
        }
        self.income += body.projects.iter().map(|p| p.income).sum::<f64>();
        Some(format!("Fetched {} of {} pages...", self.received.len(), self.total_pages))
    }
}

fn fetch_page(
    ctx: &Ctx,
    token: &str,
    page: u32,
    from: NaiveDate,
    to: NaiveDate,
    cancel: &CancellationToken,
) -> PageFetch {
    let gateway = Arc::clone(&ctx.gateway);
    let token = token.to_owned();
    let cancel = cancel.clone();
    Box::pin(async move {
        let result = gateway.projects_summary(&token, page, from, to, &cancel).await;
        (page, result)
    })
}

async fn run(
    ctx: &Arc<Ctx>,
    handle: &OperationHandle,
    token: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<serde_json::Value, FetchError> {
    let cancel = handle.token();
    set_progress(ctx, SCOPE, "Fetching the first page results...")?;

    let first = fetch_page(ctx, token, 1, from, to, cancel);
    let second = fetch_page(ctx, token, 2, from, to, cancel);

    // First settled supplies the total count; the loser keeps running.
    let ((won_page, won_result), loser) = match future::select(first, second).await {
        Either::Left((settled, other)) | Either::Right((settled, other)) => (settled, other),
    };
    let won = won_result?;

    #[allow(clippy::cast_possible_truncation)]
    let total_pages = won.count.div_ceil(PAGE_SIZE) as u32;
    set_progress(
        ctx,
        SCOPE,
        &format!("Determined total pages: {total_pages}. Collecting results..."),
    )?;

    let mut tally = Tally { income: 0.0, received: BTreeSet::new(), total_pages };
    if let Some(message) = tally.absorb(won_page, &won) {
        set_progress(ctx, SCOPE, &message)?;
    }

    let mut pending: FuturesUnordered<PageFetch> = FuturesUnordered::new();
    pending.push(loser);
    for page in 3..=total_pages {
        pending.push(fetch_page(ctx, token, page, from, to, cancel));
    }

    while let Some((page, result)) = pending.next().await {
        match result {
            Ok(body) => {
                if let Some(message) = tally.absorb(page, &body) {
                    set_progress(ctx, SCOPE, &message)?;
                }
            }
            Err(GatewayError::Cancelled) => return Err(FetchError::Cancelled),
            // Partial tolerance: a failed page costs its items, nothing
            // else.
            Err(e) => warn!(page, error = %e, "page fetch failed; continuing"),
        }
    }

    set_progress(
        ctx,
        SCOPE,
        &format!("Completed! Fetched {} pages of {} total.", tally.received.len(), total_pages),
    )?;

    let result = ProjectIncomeResult {
        income: tally.income,
        from_date: from,
        to_date: to,
        fetched_at: ctx.now_ms(),
    };
    ctx.store.cache_project_income(result.clone())?;
    to_event_data(&result)
}

#[cfg(test)]
#[path = "project_income_tests.rs"]
mod tests;
