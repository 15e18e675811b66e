// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response shapes of the remote HR/finance API.
//!
//! The service returns PascalCase JSON. Only the fields the aggregation
//! engines interpret are typed; everything else is carried through
//! opaquely in a flattened map so cached results round-trip losslessly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of `GET /tracking/projects-summary`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectsPage {
    #[serde(rename = "Projects", default)]
    pub projects: Vec<ProjectLine>,
    /// Total item count across all pages.
    #[serde(rename = "Count", default)]
    pub count: u64,
    #[serde(rename = "daysInPeriod", default, skip_serializing_if = "Option::is_none")]
    pub days_in_period: Option<u32>,
}

/// A single project line item; only `Income` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectLine {
    #[serde(rename = "Income", default)]
    pub income: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A per-employee time-tracking record from `GET /teams/{id}/tracking`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedEmployee {
    /// Employee id; string or number depending on the API version.
    #[serde(rename = "Id", default)]
    pub id: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /teams/{id}/agreements` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgreementsPage {
    #[serde(rename = "Data", default)]
    pub data: Vec<AgreementRecord>,
    #[serde(rename = "Count", default)]
    pub count: u64,
    #[serde(rename = "Holidays", default, skip_serializing_if = "Option::is_none")]
    pub holidays: Option<Value>,
}

/// A contractual agreement; classifies an employee's employment type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgreementRecord {
    #[serde(rename = "Id", default)]
    pub id: Value,
    #[serde(rename = "UserType", default)]
    pub user_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A team descriptor from `GET /teams/my`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "Id", default)]
    pub id: Value,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Calendar event classification (tagged union from `GET /calendar`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Vacation,
    Unpaid,
    Weekend,
    Birthday,
    /// Anything the API adds later; never shown as time off.
    #[serde(other)]
    Other,
}

impl EventType {
    /// Event types that count as time off in the vacations aggregate.
    pub fn is_time_off(self) -> bool {
        matches!(self, EventType::Vacation | EventType::Unpaid)
    }
}

/// A calendar event from `GET /calendar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(rename = "EventType")]
    pub event_type: EventType,
    #[serde(rename = "StartDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "EndDate")]
    pub end_date: NaiveDate,
    /// Referenced entity id; part of the dedupe key.
    #[serde(rename = "RefId", default)]
    pub ref_id: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CalendarEvent {
    /// Composite dedupe key: the same event legitimately appears once per
    /// month it spans and must collapse to a single entry.
    pub fn dedupe_key(&self) -> (String, NaiveDate, NaiveDate) {
        (self.ref_id.to_string(), self.start_date, self.end_date)
    }
}

/// Calendar filter selector (`filter[type]` query value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarFilter {
    Company,
    Team,
}

impl CalendarFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            CalendarFilter::Company => "company",
            CalendarFilter::Team => "team",
        }
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
