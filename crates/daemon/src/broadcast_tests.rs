// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::protocol::{EventKind, EventPhase};
use paylens_core::scope::Scope;

fn progress_event(message: &str) -> UiEvent {
    UiEvent::progress(Scope::ProjectIncome, message)
}

#[test]
fn publish_without_subscribers_is_silently_dropped() {
    let broadcaster = Broadcaster::new(8);
    broadcaster.publish(progress_event("nobody home"));
}

#[tokio::test]
async fn subscriber_receives_published_event() {
    let broadcaster = Broadcaster::new(8);
    let mut rx = broadcaster.subscribe();

    broadcaster.publish(progress_event("working"));

    let event = rx.recv().await.unwrap();
    assert_eq!(
        event.kind,
        EventKind { scope: Scope::ProjectIncome, phase: EventPhase::Progress }
    );
    assert_eq!(event.progress.as_deref(), Some("working"));
}

#[tokio::test]
async fn every_subscriber_sees_every_event() {
    let broadcaster = Broadcaster::new(8);
    let mut a = broadcaster.subscribe();
    let mut b = broadcaster.subscribe();

    broadcaster.publish(progress_event("one"));
    broadcaster.publish(progress_event("two"));

    assert_eq!(a.recv().await.unwrap().progress.as_deref(), Some("one"));
    assert_eq!(a.recv().await.unwrap().progress.as_deref(), Some("two"));
    assert_eq!(b.recv().await.unwrap().progress.as_deref(), Some("one"));
    assert_eq!(b.recv().await.unwrap().progress.as_deref(), Some("two"));
}

#[tokio::test]
async fn late_subscriber_misses_earlier_events() {
    let broadcaster = Broadcaster::new(8);
    broadcaster.publish(progress_event("before attach"));

    let mut rx = broadcaster.subscribe();
    broadcaster.publish(progress_event("after attach"));

    assert_eq!(rx.recv().await.unwrap().progress.as_deref(), Some("after attach"));
}
