// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn event_kind_joins_scope_and_phase() {
    let kind = EventKind { scope: Scope::ProjectIncome, phase: EventPhase::Success };
    assert_eq!(kind.to_string(), "PROJECT_INCOME_SUCCESS");

    let kind = EventKind { scope: Scope::WorkLogs, phase: EventPhase::Cancelled };
    assert_eq!(kind.to_string(), "WORK_LOGS_CANCELLED");
}

#[test]
fn event_kind_parses_back_from_wire_string() {
    let kind: EventKind = "VACATIONS_PROGRESS".parse().expect("parse failed");
    assert_eq!(kind, EventKind { scope: Scope::Vacations, phase: EventPhase::Progress });

    // WORK_LOGS has an underscore of its own; only the final segment is
    // the phase.
    let kind: EventKind = "WORK_LOGS_ERROR".parse().expect("parse failed");
    assert_eq!(kind, EventKind { scope: Scope::WorkLogs, phase: EventPhase::Error });
}

#[test]
fn event_kind_rejects_garbage() {
    assert!("NOPE".parse::<EventKind>().is_err());
    assert!("PROJECT_INCOME_NOPE".parse::<EventKind>().is_err());
    assert!("NOPE_SUCCESS".parse::<EventKind>().is_err());
}

#[test]
fn progress_event_serializes_compactly() {
    let event = UiEvent::progress(Scope::ProjectIncome, "Fetching the first page results...");
    let value = serde_json::to_value(&event).expect("serialize failed");
    assert_eq!(
        value,
        json!({
            "type": "PROJECT_INCOME_PROGRESS",
            "success": true,
            "progress": "Fetching the first page results..."
        })
    );
}

#[test]
fn success_event_carries_data() {
    let event = UiEvent::success(Scope::WorkLogs, json!({"employees": []}));
    let value = serde_json::to_value(&event).expect("serialize failed");
    assert_eq!(value["type"], "WORK_LOGS_SUCCESS");
    assert_eq!(value["success"], true);
    assert_eq!(value["data"], json!({"employees": []}));
    assert!(value.get("error").is_none());
}

#[test]
fn error_event_is_unsuccessful() {
    let event = UiEvent::error(Scope::Vacations, "Failed to fetch vacation data");
    let value = serde_json::to_value(&event).expect("serialize failed");
    assert_eq!(value["type"], "VACATIONS_ERROR");
    assert_eq!(value["success"], false);
    assert_eq!(value["error"], "Failed to fetch vacation data");
}

#[test]
fn cancelled_event_uses_fixed_message() {
    let event = UiEvent::cancelled(Scope::ProjectIncome);
    let value = serde_json::to_value(&event).expect("serialize failed");
    assert_eq!(value["type"], "PROJECT_INCOME_CANCELLED");
    assert_eq!(value["success"], false);
    assert_eq!(value["error"], "Request cancelled");
}

#[test]
fn events_round_trip_through_json() {
    let event = UiEvent::success(Scope::Vacations, json!([{"RefId": "r1"}]));
    let encoded = serde_json::to_string(&event).expect("serialize failed");
    let decoded: UiEvent = serde_json::from_str(&encoded).expect("deserialize failed");
    assert_eq!(decoded, event);
}
