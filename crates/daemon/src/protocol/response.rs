// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

use paylens_core::api::Team;
use paylens_storage::StoredData;

/// Direct reply to a single [`Request`](crate::protocol::Request) frame.
///
/// Fetch commands get an `Ack`; their outcome travels separately as
/// [`UiEvent`](crate::protocol::UiEvent) broadcasts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Response {
    /// Command accepted; work continues in the background.
    Ack,

    /// Full store snapshot for `GET_CACHED_DATA`.
    #[serde(rename_all = "camelCase")]
    CachedData { data: StoredData },

    /// Result of `GET_MY_TEAMS`.
    #[serde(rename_all = "camelCase")]
    Teams { teams: Vec<Team> },

    /// The connection is now an event stream.
    Subscribed,

    /// The command failed before any background work started.
    #[serde(rename_all = "camelCase")]
    Error { message: String },
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}
