// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Broadcast events pushed to subscribed UI connections.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use paylens_core::scope::Scope;

/// Lifecycle phase of an aggregation, the suffix of the wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventPhase {
    Progress,
    Success,
    Error,
    Cancelled,
}

impl EventPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Progress => "PROGRESS",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Wire tag of a [`UiEvent`], e.g. `PROJECT_INCOME_SUCCESS`.
///
/// Serialized as the single joined string, not as an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind {
    pub scope: Scope,
    pub phase: EventPhase,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.scope.kind_str(), self.phase.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scope, phase) = s
            .rsplit_once('_')
            .ok_or_else(|| format!("malformed event kind: {s}"))?;
        let scope = match scope {
            "PROJECT_INCOME" => Scope::ProjectIncome,
            "WORK_LOGS" => Scope::WorkLogs,
            "VACATIONS" => Scope::Vacations,
            other => return Err(format!("unknown event scope: {other}")),
        };
        let phase = match phase {
            "PROGRESS" => EventPhase::Progress,
            "SUCCESS" => EventPhase::Success,
            "ERROR" => EventPhase::Error,
            "CANCELLED" => EventPhase::Cancelled,
            other => return Err(format!("unknown event phase: {other}")),
        };
        Ok(Self { scope, phase })
    }
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// One broadcast frame. Exactly one terminal event (`SUCCESS`, `ERROR`
/// or `CANCELLED`) is emitted per operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
}

impl UiEvent {
    pub fn progress(scope: Scope, message: impl Into<String>) -> Self {
        Self {
            kind: EventKind { scope, phase: EventPhase::Progress },
            success: true,
            data: None,
            error: None,
            progress: Some(message.into()),
        }
    }

    pub fn success(scope: Scope, data: Value) -> Self {
        Self {
            kind: EventKind { scope, phase: EventPhase::Success },
            success: true,
            data: Some(data),
            error: None,
            progress: None,
        }
    }

    pub fn error(scope: Scope, message: impl Into<String>) -> Self {
        Self {
            kind: EventKind { scope, phase: EventPhase::Error },
            success: false,
            data: None,
            error: Some(message.into()),
            progress: None,
        }
    }

    pub fn cancelled(scope: Scope) -> Self {
        Self {
            kind: EventKind { scope, phase: EventPhase::Cancelled },
            success: false,
            data: None,
            error: Some("Request cancelled".to_owned()),
            progress: None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
