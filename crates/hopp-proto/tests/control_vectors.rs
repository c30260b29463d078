//! Control-lane schema vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hopp_proto::protocol::{
    ClipboardPayload, DrawingMode, Modifiers, MouseButton, Point, WireMessage,
};

use vector_loader::load;

#[test]
fn control_vectors() {
    let files = [
        "control_mouse_move.json",
        "control_mouse_click.json",
        "control_wheel.json",
        "control_keystroke.json",
        "control_clipboard_payload.json",
        "control_paste_null_data.json",
        "control_drawing_mode_draw.json",
        "control_draw_start.json",
        "control_unknown_type.json",
        "control_missing_field.json",
        "control_bad_field_type.json",
        "control_bad_button.json",
    ];

    for f in files {
        let v = load(f);
        let res = WireMessage::parse(&v.message);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected rejection");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let msg = res.expect("expected ok message");
        let round = serde_json::to_value(&msg).unwrap();
        assert_eq!(round, v.message, "vector={}", v.description);
    }
}

/// Every variant survives serialize -> parse unchanged.
#[test]
fn round_trip_all_variants() {
    let mods = Modifiers {
        shift: true,
        control: false,
        alt: false,
        meta: true,
    };
    let chunk = ClipboardPayload {
        packet_id: 1,
        total_packets: 3,
        data: vec![0, 127, 255],
    };
    let point = Point { x: 0.25, y: 0.75 };

    let msgs = vec![
        WireMessage::MouseMove {
            x: 0.5,
            y: 0.5,
            pointer: true,
        },
        WireMessage::MouseClick {
            x: 0.1,
            y: 0.9,
            button: MouseButton::Left,
            clicks: 2,
            down: true,
            modifiers: mods,
        },
        WireMessage::Wheel {
            delta_x: -3.0,
            delta_y: 12.5,
        },
        WireMessage::Keystroke {
            key: vec!["Shift".into(), "a".into()],
            modifiers: mods,
            down: false,
        },
        WireMessage::RemoteControlEnabled { enabled: true },
        WireMessage::MouseVisible { visible: false },
        WireMessage::AddToClipboard { is_copy: true },
        WireMessage::ClipboardPayload(chunk.clone()),
        WireMessage::PasteFromClipboard { data: Some(chunk) },
        WireMessage::PasteFromClipboard { data: None },
        WireMessage::DrawStart { point, path_id: 7 },
        WireMessage::DrawAddPoint { point },
        WireMessage::DrawEnd { point },
        WireMessage::DrawClearPath { path_id: 7 },
        WireMessage::DrawClearAllPaths,
        WireMessage::ClickAnimation { point },
        WireMessage::DrawingMode(DrawingMode::Draw { permanent: true }),
        WireMessage::DrawingMode(DrawingMode::Disabled),
        WireMessage::DrawingMode(DrawingMode::ClickAnimation),
    ];

    for msg in msgs {
        let raw = serde_json::to_value(&msg).unwrap();
        let parsed = WireMessage::parse(&raw).unwrap();
        assert_eq!(parsed, msg);
    }
}

/// Wheel deltas are camelCase on the wire; the snake_case spelling is a
/// different (absent) field, not an alias.
#[test]
fn wheel_deltas_keep_camel_case_spelling() {
    let raw = serde_json::json!({
        "type": "wheel",
        "payload": { "deltaX": -4.5, "deltaY": 120.5 }
    });
    let msg = WireMessage::parse(&raw).unwrap();
    assert_eq!(
        msg,
        WireMessage::Wheel {
            delta_x: -4.5,
            delta_y: 120.5
        }
    );
    assert_eq!(serde_json::to_value(&msg).unwrap(), raw);

    let snake = serde_json::json!({
        "type": "wheel",
        "payload": { "delta_x": -4.5, "delta_y": 120.5 }
    });
    let err = WireMessage::parse(&snake).unwrap_err();
    assert_eq!(err.code().as_str(), "MISSING_FIELD");
}

#[test]
fn non_object_input_is_rejected() {
    for raw in [
        serde_json::json!(null),
        serde_json::json!(42),
        serde_json::json!("mouse_move"),
        serde_json::json!([]),
    ] {
        assert!(WireMessage::parse(&raw).is_err());
    }
}
