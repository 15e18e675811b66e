// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! reqwest-backed gateway implementation.
//!
//! Query values are percent-encoded by the URL builder. Some routes wrap
//! their payload as `{"data": ...}`; the wrapper is stripped before
//! decoding.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use paylens_core::api::{
    AgreementsPage, CalendarEvent, CalendarFilter, ProjectsPage, Team, TrackedEmployee,
};

use crate::{ApiGateway, GatewayError};

/// Gateway speaking JSON-over-HTTPS to the remote API.
pub struct HttpGateway {
    client: reqwest::Client,
    base: Url,
}

impl HttpGateway {
    /// Build a gateway rooted at `base`, e.g. `https://host/api/v1`.
    pub fn new(base: &str) -> Result<Self, GatewayError> {
        // A trailing slash makes Url::join treat the last segment as a
        // directory rather than replacing it.
        let normalized =
            if base.ends_with('/') { base.to_string() } else { format!("{base}/") };
        let base = Url::parse(&normalized).map_err(|e| GatewayError::BadUrl(e.to_string()))?;
        Ok(Self { client: reqwest::Client::new(), base })
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, GatewayError> {
        let mut url = self.base.join(path).map_err(|e| GatewayError::BadUrl(e.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<T, GatewayError> {
        debug!(%url, "GET");
        let send = self.client.get(url).bearer_auth(token).send();
        let response = tokio::select! {
            () = cancel.cancelled() => return Err(GatewayError::Cancelled),
            result = send => result.map_err(|e| GatewayError::Transport(e.to_string()))?,
        };

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let body = tokio::select! {
            () = cancel.cancelled() => return Err(GatewayError::Cancelled),
            result = response.json::<Value>() => {
                result.map_err(|e| GatewayError::Decode(e.to_string()))?
            }
        };

        serde_json::from_value(unwrap_data(body)).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Strip the `{"data": ...}` envelope some routes wrap their payload in.
fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn date_range_query(from: NaiveDate, to: NaiveDate) -> [(&'static str, String); 2] {
    [("filter[from]", from.to_string()), ("filter[to]", to.to_string())]
}

#[async_trait]
impl ApiGateway for HttpGateway {
    async fn projects_summary(
        &self,
        token: &str,
        page: u32,
        from: NaiveDate,
        to: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<ProjectsPage, GatewayError> {
        let [q_from, q_to] = date_range_query(from, to);
        let url = self.url(
            "tracking/projects-summary",
            &[("page", page.to_string()), q_from, q_to],
        )?;
        self.get_json(url, token, cancel).await
    }

    async fn team_tracking(
        &self,
        token: &str,
        team_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<Vec<TrackedEmployee>, GatewayError> {
        let url = self.url(&format!("teams/{team_id}/tracking"), &date_range_query(from, to))?;
        self.get_json(url, token, cancel).await
    }

    async fn team_agreements(
        &self,
        token: &str,
        team_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<AgreementsPage, GatewayError> {
        let url = self.url(&format!("teams/{team_id}/agreements"), &date_range_query(from, to))?;
        self.get_json(url, token, cancel).await
    }

    async fn my_teams(
        &self,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Team>, GatewayError> {
        let url = self.url("teams/my", &[])?;
        self.get_json(url, token, cancel).await
    }

    async fn calendar_month(
        &self,
        token: &str,
        month: NaiveDate,
        filter: CalendarFilter,
        cancel: &CancellationToken,
    ) -> Result<Vec<CalendarEvent>, GatewayError> {
        let url = self.url(
            "calendar",
            &[("date", month.to_string()), ("filter[type]", filter.as_str().to_string())],
        )?;
        self.get_json(url, token, cancel).await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
