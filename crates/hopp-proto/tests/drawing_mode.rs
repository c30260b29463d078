//! Drawing-mode state machine and stored-preference mapping tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hopp_proto::drawing::DrawingModeState;
use hopp_proto::protocol::{DrawingMode, StoredMode};

#[test]
fn initial_state_is_disabled() {
    let state = DrawingModeState::new();
    assert_eq!(state.current(), DrawingMode::Disabled);
}

#[test]
fn last_message_wins_with_no_memory() {
    let mut state = DrawingModeState::new();
    state.apply(DrawingMode::Draw { permanent: true });
    assert_eq!(state.current(), DrawingMode::Draw { permanent: true });

    let prev = state.apply(DrawingMode::Disabled);
    assert_eq!(prev, DrawingMode::Draw { permanent: true });
    // No memory of the prior permanence flag.
    assert_eq!(state.current(), DrawingMode::Disabled);

    state.apply(DrawingMode::ClickAnimation);
    state.apply(DrawingMode::Draw { permanent: false });
    assert_eq!(state.current(), DrawingMode::Draw { permanent: false });
}

#[test]
fn reset_returns_to_disabled() {
    let mut state = DrawingModeState::new();
    state.apply(DrawingMode::ClickAnimation);
    let prev = state.reset();
    assert_eq!(prev, DrawingMode::ClickAnimation);
    assert_eq!(state.current(), DrawingMode::Disabled);
}

#[test]
fn stored_mode_maps_to_session_mode() {
    assert_eq!(
        DrawingMode::from_stored(&StoredMode::RemoteControl),
        DrawingMode::Disabled
    );
    assert_eq!(
        DrawingMode::from_stored(&StoredMode::ClickAnimation),
        DrawingMode::ClickAnimation
    );
    assert_eq!(
        DrawingMode::from_stored(&StoredMode::Draw { permanent: true }),
        DrawingMode::Draw { permanent: true }
    );
}

#[test]
fn stored_mode_round_trip() {
    for mode in [
        StoredMode::RemoteControl,
        StoredMode::ClickAnimation,
        StoredMode::Draw { permanent: false },
    ] {
        let raw = serde_json::to_value(mode).unwrap();
        assert_eq!(StoredMode::parse(&raw).unwrap(), mode);
    }
}

#[test]
fn stored_mode_rejects_session_only_tags() {
    // "disabled" belongs to the transient union, not the stored one.
    let raw = serde_json::json!({ "type": "disabled" });
    assert!(StoredMode::parse(&raw).is_err());
}
