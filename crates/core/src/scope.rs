// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request scopes: the three independent logical request categories
//! that gate concurrency and cancellation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three independent request scopes.
///
/// At most one operation per scope runs at any time; scopes are fully
/// independent of each other. Serializes as the SCREAMING_SNAKE tag used
/// for descriptor kinds and event type prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    ProjectIncome,
    WorkLogs,
    Vacations,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::ProjectIncome, Scope::WorkLogs, Scope::Vacations];

    /// Tag used as the prefix of outbound event types.
    pub fn kind_str(self) -> &'static str {
        match self {
            Scope::ProjectIncome => "PROJECT_INCOME",
            Scope::WorkLogs => "WORK_LOGS",
            Scope::Vacations => "VACATIONS",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind_str())
    }
}

/// Scope selector for clear/abort commands: a single scope or everything.
///
/// Serializes with the camelCase names the UI uses (`"all"`,
/// `"projectIncome"`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClearScope {
    #[default]
    All,
    ProjectIncome,
    WorkLogs,
    Vacations,
}

impl ClearScope {
    pub fn includes(self, scope: Scope) -> bool {
        match self {
            ClearScope::All => true,
            ClearScope::ProjectIncome => scope == Scope::ProjectIncome,
            ClearScope::WorkLogs => scope == Scope::WorkLogs,
            ClearScope::Vacations => scope == Scope::Vacations,
        }
    }

    /// The concrete scopes this selector covers, in declaration order.
    pub fn scopes(self) -> impl Iterator<Item = Scope> {
        Scope::ALL.into_iter().filter(move |s| self.includes(*s))
    }
}

impl From<Scope> for ClearScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::ProjectIncome => ClearScope::ProjectIncome,
            Scope::WorkLogs => ClearScope::WorkLogs,
            Scope::Vacations => ClearScope::Vacations,
        }
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
