// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::{CalendarEvent, CalendarFilter, EventType, ProjectsPage, TrackedEmployee};

#[test]
fn projects_page_decodes_pascal_case() {
    let page: ProjectsPage = serde_json::from_value(json!({
        "Projects": [
            { "Income": 100.5, "Name": "Alpha" },
            { "Income": 49.5, "Name": "Beta" }
        ],
        "Count": 30,
        "daysInPeriod": 20
    }))
    .unwrap();

    assert_eq!(page.count, 30);
    assert_eq!(page.days_in_period, Some(20));
    assert_eq!(page.projects.len(), 2);
    assert_eq!(page.projects[0].income, 100.5);
    // Uninterpreted fields survive in the flattened map.
    assert_eq!(page.projects[0].extra["Name"], json!("Alpha"));
}

#[test]
fn projects_page_tolerates_missing_fields() {
    let page: ProjectsPage = serde_json::from_value(json!({})).unwrap();
    assert_eq!(page.count, 0);
    assert!(page.projects.is_empty());
}

#[test]
fn tracked_employee_round_trips_extra_fields() {
    let source = json!({ "Id": 7, "Hours": 120, "Name": "Kim" });
    let record: TrackedEmployee = serde_json::from_value(source.clone()).unwrap();
    assert_eq!(record.id, json!(7));
    assert_eq!(serde_json::to_value(&record).unwrap(), source);
}

#[test]
fn unknown_event_type_maps_to_other() {
    let event: CalendarEvent = serde_json::from_value(json!({
        "EventType": "PublicHoliday",
        "StartDate": "2025-05-01",
        "EndDate": "2025-05-01"
    }))
    .unwrap();
    assert_eq!(event.event_type, EventType::Other);
    assert!(!event.event_type.is_time_off());
}

#[test]
fn time_off_classification() {
    assert!(EventType::Vacation.is_time_off());
    assert!(EventType::Unpaid.is_time_off());
    assert!(!EventType::Weekend.is_time_off());
    assert!(!EventType::Birthday.is_time_off());
}

#[test]
fn dedupe_key_distinguishes_ref_and_dates() {
    let event: CalendarEvent = serde_json::from_value(json!({
        "EventType": "Vacation",
        "StartDate": "2025-01-28",
        "EndDate": "2025-02-03",
        "RefId": 12
    }))
    .unwrap();
    let mut other = event.clone();
    other.ref_id = serde_json::json!(13);
    assert_ne!(event.dedupe_key(), other.dedupe_key());
}

#[test]
fn calendar_filter_strings() {
    assert_eq!(CalendarFilter::Company.as_str(), "company");
    assert_eq!(serde_json::to_string(&CalendarFilter::Team).unwrap(), "\"team\"");
}
