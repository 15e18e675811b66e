// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use yare::parameterized;

use super::{ClearScope, Scope};

#[test]
fn scope_serializes_as_screaming_snake() {
    assert_eq!(serde_json::to_string(&Scope::ProjectIncome).unwrap(), "\"PROJECT_INCOME\"");
    assert_eq!(serde_json::to_string(&Scope::WorkLogs).unwrap(), "\"WORK_LOGS\"");
    assert_eq!(serde_json::to_string(&Scope::Vacations).unwrap(), "\"VACATIONS\"");
}

#[test]
fn clear_scope_serializes_as_camel_case() {
    assert_eq!(serde_json::to_string(&ClearScope::All).unwrap(), "\"all\"");
    assert_eq!(serde_json::to_string(&ClearScope::ProjectIncome).unwrap(), "\"projectIncome\"");
    let parsed: ClearScope = serde_json::from_str("\"workLogs\"").unwrap();
    assert_eq!(parsed, ClearScope::WorkLogs);
}

#[test]
fn clear_scope_defaults_to_all() {
    assert_eq!(ClearScope::default(), ClearScope::All);
}

#[parameterized(
    all_income = { ClearScope::All, Scope::ProjectIncome, true },
    all_vacations = { ClearScope::All, Scope::Vacations, true },
    income_income = { ClearScope::ProjectIncome, Scope::ProjectIncome, true },
    income_logs = { ClearScope::ProjectIncome, Scope::WorkLogs, false },
    vacations_logs = { ClearScope::Vacations, Scope::WorkLogs, false },
    logs_logs = { ClearScope::WorkLogs, Scope::WorkLogs, true },
)]
fn includes(clear: ClearScope, scope: Scope, expected: bool) {
    assert_eq!(clear.includes(scope), expected);
}

#[test]
fn all_selector_covers_every_scope() {
    let scopes: Vec<Scope> = ClearScope::All.scopes().collect();
    assert_eq!(scopes, Scope::ALL.to_vec());
}

#[test]
fn single_selector_covers_only_itself() {
    let scopes: Vec<Scope> = ClearScope::Vacations.scopes().collect();
    assert_eq!(scopes, vec![Scope::Vacations]);
}
