// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote data gateway: a thin authenticated GET capability over the
//! HR/finance REST API.
//!
//! One trait method per remote route. Every call takes the caller's
//! bearer token and a `CancellationToken`; a fired token surfaces as the
//! distinguished [`GatewayError::Cancelled`], never as a generic error.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod http;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use http::HttpGateway;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{calendar_event, projects_page, FakeGateway};

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use paylens_core::api::{
    AgreementsPage, CalendarEvent, CalendarFilter, ProjectsPage, Team, TrackedEmployee,
};

/// Errors from remote API calls.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The operation's cancellation token fired mid-call.
    #[error("request cancelled")]
    Cancelled,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid base URL: {0}")]
    BadUrl(String),
}

impl GatewayError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GatewayError::Cancelled)
    }
}

/// Authenticated GET access to the remote API, one method per route.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// `GET /tracking/projects-summary?page=N&filter[from]=D&filter[to]=D`
    async fn projects_summary(
        &self,
        token: &str,
        page: u32,
        from: NaiveDate,
        to: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<ProjectsPage, GatewayError>;

    /// `GET /teams/{team_id}/tracking?filter[from]=D&filter[to]=D`
    async fn team_tracking(
        &self,
        token: &str,
        team_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<Vec<TrackedEmployee>, GatewayError>;

    /// `GET /teams/{team_id}/agreements?filter[from]=D&filter[to]=D`
    async fn team_agreements(
        &self,
        token: &str,
        team_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<AgreementsPage, GatewayError>;

    /// `GET /teams/my`
    async fn my_teams(
        &self,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Team>, GatewayError>;

    /// `GET /calendar?date=YYYY-MM-01&filter[type]=company|team`
    async fn calendar_month(
        &self,
        token: &str,
        month: NaiveDate,
        filter: CalendarFilter,
        cancel: &CancellationToken,
    ) -> Result<Vec<CalendarEvent>, GatewayError>;
}
