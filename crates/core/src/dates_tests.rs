// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use chrono::NaiveDate;
use yare::parameterized;

use super::{month_anchors, ranges_overlap};

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn single_month_yields_one_anchor() {
    let anchors = month_anchors(d("2025-02-05"), d("2025-02-23"));
    assert_eq!(anchors, vec![d("2025-02-01")]);
}

#[test]
fn range_spanning_year_boundary() {
    let anchors = month_anchors(d("2024-11-15"), d("2025-02-03"));
    assert_eq!(
        anchors,
        vec![d("2024-11-01"), d("2024-12-01"), d("2025-01-01"), d("2025-02-01")]
    );
}

#[test]
fn anchor_starts_at_first_of_from_month() {
    // Even when `from` is late in the month, the month is still covered.
    let anchors = month_anchors(d("2025-01-31"), d("2025-02-01"));
    assert_eq!(anchors, vec![d("2025-01-01"), d("2025-02-01")]);
}

#[test]
fn inverted_range_yields_no_anchors() {
    assert!(month_anchors(d("2025-03-01"), d("2025-02-01")).is_empty());
}

#[test]
fn same_day_range_yields_one_anchor() {
    let anchors = month_anchors(d("2025-06-15"), d("2025-06-15"));
    assert_eq!(anchors, vec![d("2025-06-01")]);
}

#[parameterized(
    inside = { "2025-02-05", "2025-02-10", true },
    spanning = { "2025-01-01", "2025-12-31", true },
    touching_start = { "2025-01-15", "2025-02-01", true },
    touching_end = { "2025-02-28", "2025-03-10", true },
    before = { "2025-01-01", "2025-01-31", false },
    after = { "2025-03-01", "2025-03-31", false },
    zero_length_inside = { "2025-02-14", "2025-02-14", true },
)]
fn overlap_against_february(event_start: &str, event_end: &str, expected: bool) {
    let range_start = d("2025-02-01");
    let range_end = d("2025-02-28");
    assert_eq!(ranges_overlap(d(event_start), d(event_end), range_start, range_end), expected);
}
