// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Core domain types for Paylens: request scopes, calendar math, remote
//! API record shapes, cached aggregation results, and the in-flight
//! operation descriptor. No I/O lives here.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod api;
pub mod clock;
pub mod dates;
pub mod records;
pub mod scope;

pub use api::{
    AgreementRecord, AgreementsPage, CalendarEvent, CalendarFilter, EventType, ProjectLine,
    ProjectsPage, Team, TrackedEmployee,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use records::{
    OperationDescriptor, ProjectIncomeResult, VacationsResult, WorkLogEmployee, WorkLogsResult,
    STALE_OPERATION_MS,
};
pub use scope::{ClearScope, Scope};
