// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use paylens_core::api::CalendarFilter;
use paylens_core::scope::ClearScope;

/// Command from a UI client to the daemon.
///
/// Fetch commands are acknowledged immediately; the real result arrives
/// asynchronously as broadcast events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    /// Start the project-income aggregation.
    #[serde(rename_all = "camelCase")]
    FetchProjectIncome {
        token: String,
        from_date: NaiveDate,
        to_date: NaiveDate,
    },

    /// Start the work-logs aggregation for a team.
    #[serde(rename_all = "camelCase")]
    FetchWorkLogs {
        token: String,
        team_id: String,
        from_date: NaiveDate,
        to_date: NaiveDate,
        /// Display-only; persisted with the result, never alters the fetch.
        #[serde(default)]
        hide_freelancers: bool,
    },

    /// Start the vacations aggregation.
    #[serde(rename_all = "camelCase")]
    FetchVacations {
        token: String,
        from_date: NaiveDate,
        to_date: NaiveDate,
        filter_type: CalendarFilter,
    },

    /// Read everything the store holds (cached results + descriptor).
    GetCachedData,

    /// Clear only the operation descriptor.
    ClearRequestState,

    /// Abort active operation(s) for the scope and drop its cached data.
    #[serde(rename_all = "camelCase")]
    ClearAllData {
        #[serde(default)]
        scope: ClearScope,
    },

    /// One-shot passthrough to `GET /teams/my`.
    #[serde(rename_all = "camelCase")]
    GetMyTeams { token: String },

    /// Upgrade this connection to a live event stream.
    Subscribe,
}

impl Request {
    /// Recognized command names, used to distinguish an unknown command
    /// from a known command with a malformed payload.
    pub const KNOWN_TYPES: [&'static str; 8] = [
        "FETCH_PROJECT_INCOME",
        "FETCH_WORK_LOGS",
        "FETCH_VACATIONS",
        "GET_CACHED_DATA",
        "CLEAR_REQUEST_STATE",
        "CLEAR_ALL_DATA",
        "GET_MY_TEAMS",
        "SUBSCRIBE",
    ];
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
