// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable in-memory gateway for tests.
//!
//! Each route is scripted with a success body, an HTTP status failure, or
//! `Hold` (resolves only when the call's cancellation token fires, which
//! lets tests abort an operation at a deterministic point). Calls are
//! recorded so tests can assert on network activity.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use paylens_core::api::{
    AgreementsPage, CalendarEvent, CalendarFilter, EventType, ProjectLine, ProjectsPage, Team,
    TrackedEmployee,
};

use crate::{ApiGateway, GatewayError};

#[derive(Clone)]
enum Outcome<T> {
    Ok(T),
    Status(u16),
    /// Never resolves; rejects with `Cancelled` when the token fires.
    Hold,
}

#[derive(Clone)]
struct Scripted<T> {
    outcome: Outcome<T>,
    delay: Option<Duration>,
}

impl<T> Scripted<T> {
    fn ok(value: T) -> Self {
        Self { outcome: Outcome::Ok(value), delay: None }
    }

    fn status(code: u16) -> Self {
        Self { outcome: Outcome::Status(code), delay: None }
    }

    fn hold() -> Self {
        Self { outcome: Outcome::Hold, delay: None }
    }
}

#[derive(Default)]
struct Inner {
    pages: HashMap<u32, Scripted<ProjectsPage>>,
    tracking: Option<Scripted<Vec<TrackedEmployee>>>,
    agreements: Option<Scripted<AgreementsPage>>,
    teams: Option<Scripted<Vec<Team>>>,
    months: HashMap<NaiveDate, Scripted<Vec<CalendarEvent>>>,
}

/// In-memory [`ApiGateway`] with scripted responses.
#[derive(Default)]
pub struct FakeGateway {
    inner: Mutex<Inner>,
    calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_page(&self, page: u32, body: ProjectsPage) {
        self.inner.lock().pages.insert(page, Scripted::ok(body));
    }

    pub fn set_page_delayed(&self, page: u32, body: ProjectsPage, delay: Duration) {
        self.inner
            .lock()
            .pages
            .insert(page, Scripted { outcome: Outcome::Ok(body), delay: Some(delay) });
    }

    pub fn fail_page(&self, page: u32, status: u16) {
        self.inner.lock().pages.insert(page, Scripted::status(status));
    }

    pub fn fail_page_delayed(&self, page: u32, status: u16, delay: Duration) {
        self.inner
            .lock()
            .pages
            .insert(page, Scripted { outcome: Outcome::Status(status), delay: Some(delay) });
    }

    pub fn hold_page(&self, page: u32) {
        self.inner.lock().pages.insert(page, Scripted::hold());
    }

    pub fn set_tracking(&self, records: Vec<TrackedEmployee>) {
        self.inner.lock().tracking = Some(Scripted::ok(records));
    }

    pub fn hold_tracking(&self) {
        self.inner.lock().tracking = Some(Scripted::hold());
    }

    pub fn set_agreements(&self, page: AgreementsPage) {
        self.inner.lock().agreements = Some(Scripted::ok(page));
    }

    pub fn fail_agreements(&self, status: u16) {
        self.inner.lock().agreements = Some(Scripted::status(status));
    }

    pub fn set_teams(&self, teams: Vec<Team>) {
        self.inner.lock().teams = Some(Scripted::ok(teams));
    }

    pub fn set_month(&self, month: NaiveDate, events: Vec<CalendarEvent>) {
        self.inner.lock().months.insert(month, Scripted::ok(events));
    }

    pub fn fail_month(&self, month: NaiveDate, status: u16) {
        self.inner.lock().months.insert(month, Scripted::status(status));
    }

    pub fn hold_month(&self, month: NaiveDate) {
        self.inner.lock().months.insert(month, Scripted::hold());
    }

    /// Every route invocation so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, route: String) {
        self.calls.lock().push(route);
    }

    async fn resolve<T>(
        &self,
        scripted: Option<Scripted<T>>,
        route: &str,
        cancel: &CancellationToken,
    ) -> Result<T, GatewayError> {
        let Some(scripted) = scripted else {
            return Err(GatewayError::Transport(format!("no fake response scripted for {route}")));
        };
        if let Some(delay) = scripted.delay {
            tokio::select! {
                () = cancel.cancelled() => return Err(GatewayError::Cancelled),
                () = tokio::time::sleep(delay) => {}
            }
        } else if cancel.is_cancelled() {
            return Err(GatewayError::Cancelled);
        }
        match scripted.outcome {
            Outcome::Ok(value) => Ok(value),
            Outcome::Status(code) => Err(GatewayError::Status(code)),
            Outcome::Hold => {
                cancel.cancelled().await;
                Err(GatewayError::Cancelled)
            }
        }
    }
}

/// Build a projects page with the given total count and line incomes.
pub fn projects_page(count: u64, incomes: &[f64]) -> ProjectsPage {
    ProjectsPage {
        projects: incomes
            .iter()
            .map(|income| ProjectLine { income: *income, ..ProjectLine::default() })
            .collect(),
        count,
        days_in_period: None,
    }
}

/// Build a calendar event with the fields the engines interpret.
pub fn calendar_event(
    event_type: EventType,
    ref_id: u64,
    start: NaiveDate,
    end: NaiveDate,
) -> CalendarEvent {
    CalendarEvent {
        event_type,
        start_date: start,
        end_date: end,
        ref_id: serde_json::json!(ref_id),
        extra: serde_json::Map::new(),
    }
}

#[async_trait]
impl ApiGateway for FakeGateway {
    async fn projects_summary(
        &self,
        _token: &str,
        page: u32,
        _from: NaiveDate,
        _to: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<ProjectsPage, GatewayError> {
        let route = format!("projects-summary?page={page}");
        self.record(route.clone());
        let scripted = self.inner.lock().pages.get(&page).cloned();
        self.resolve(scripted, &route, cancel).await
    }

    async fn team_tracking(
        &self,
        _token: &str,
        team_id: &str,
        _from: NaiveDate,
        _to: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<Vec<TrackedEmployee>, GatewayError> {
        let route = format!("teams/{team_id}/tracking");
        self.record(route.clone());
        let scripted = self.inner.lock().tracking.clone();
        self.resolve(scripted, &route, cancel).await
    }

    async fn team_agreements(
        &self,
        _token: &str,
        team_id: &str,
        _from: NaiveDate,
        _to: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<AgreementsPage, GatewayError> {
        let route = format!("teams/{team_id}/agreements");
        self.record(route.clone());
        let scripted = self.inner.lock().agreements.clone();
        self.resolve(scripted, &route, cancel).await
    }

    async fn my_teams(
        &self,
        _token: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Team>, GatewayError> {
        self.record("teams/my".to_string());
        let scripted = self.inner.lock().teams.clone();
        self.resolve(scripted, "teams/my", cancel).await
    }

    async fn calendar_month(
        &self,
        _token: &str,
        month: NaiveDate,
        filter: CalendarFilter,
        cancel: &CancellationToken,
    ) -> Result<Vec<CalendarEvent>, GatewayError> {
        let route = format!("calendar/{month}?{}", filter.as_str());
        self.record(route.clone());
        let scripted = self.inner.lock().months.get(&month).cloned();
        self.resolve(scripted, &route, cancel).await
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
