// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent operation store for Paylens.
//!
//! One JSON snapshot on disk holds the four logical keys: the three
//! cached aggregation results and the operation descriptor. Durability
//! here is what lets a UI that was torn down mid-operation reattach and
//! resume observing state.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod store;

pub use store::{Store, StoreError, StoredData};
