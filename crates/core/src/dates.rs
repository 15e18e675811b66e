// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calendar-day math: month anchors and interval overlap.

use chrono::{Datelike, Months, NaiveDate};

/// First-of-month anchor dates spanning `from..=to` inclusive.
///
/// The remote calendar endpoint accepts a single month per call, so a
/// requested range expands into one anchor per covered calendar month.
/// An inverted range produces no anchors.
pub fn month_anchors(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let mut anchors = Vec::new();
    let Some(mut cursor) = from.with_day(1) else {
        return anchors;
    };
    while cursor <= to {
        anchors.push(cursor);
        match cursor.checked_add_months(Months::new(1)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    anchors
}

/// Inclusive calendar-day interval overlap.
pub fn ranges_overlap(
    start_a: NaiveDate,
    end_a: NaiveDate,
    start_b: NaiveDate,
    end_b: NaiveDate,
) -> bool {
    start_a <= end_b && end_a >= start_b
}

#[cfg(test)]
#[path = "dates_tests.rs"]
mod tests;
