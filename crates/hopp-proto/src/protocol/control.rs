//! Control-lane wire messages (input, clipboard, drawing).
//!
//! Every message is `{ "type": <tag>, "payload": <shape> }`; the payload
//! shape is fully determined by the tag. [`WireMessage::parse`] is the one
//! entry point through which raw data-channel values become trusted typed
//! messages.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ProtoError, Result};
use crate::protocol::modes::DrawingMode;
use crate::protocol::value;

/// Normalized surface coordinate, both axes in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn parse(obj: &Map<String, Value>, field: &'static str) -> Result<Self> {
        let p = value::get_obj(obj, field)?;
        Ok(Point {
            x: value::get_f64(p, "x")?,
            y: value::get_f64(p, "y")?,
        })
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    fn parse(obj: &Map<String, Value>) -> Result<Self> {
        match value::get_str(obj, "button")? {
            "left" => Ok(MouseButton::Left),
            "middle" => Ok(MouseButton::Middle),
            "right" => Ok(MouseButton::Right),
            other => Err(ProtoError::InvalidEnumValue {
                field: "button",
                value: other.to_owned(),
            }),
        }
    }
}

/// Modifier key flags attached to click and keystroke events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    fn parse(obj: &Map<String, Value>) -> Result<Self> {
        let m = value::get_obj(obj, "modifiers")?;
        Ok(Modifiers {
            shift: value::get_bool(m, "shift")?,
            control: value::get_bool(m, "control")?,
            alt: value::get_bool(m, "alt")?,
            meta: value::get_bool(m, "meta")?,
        })
    }
}

/// One chunk of a chunked clipboard transfer.
///
/// `packet_id` is a zero-based index into the `total_packets` declared for
/// the transfer; `data` is the chunk's raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipboardPayload {
    pub packet_id: u32,
    pub total_packets: u32,
    pub data: Vec<u8>,
}

impl ClipboardPayload {
    fn parse(obj: &Map<String, Value>) -> Result<Self> {
        Ok(ClipboardPayload {
            packet_id: value::get_u32(obj, "packet_id")?,
            total_packets: value::get_u32(obj, "total_packets")?,
            data: value::get_bytes(obj, "data")?,
        })
    }
}

/// Control-lane message exchanged over a call's data channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum WireMessage {
    /// Pointer motion; `pointer` is the remote hover-cursor visibility flag.
    MouseMove { x: f64, y: f64, pointer: bool },
    MouseClick {
        x: f64,
        y: f64,
        button: MouseButton,
        clicks: u32,
        down: bool,
        modifiers: Modifiers,
    },
    /// Wheel deltas keep their camelCase wire spelling.
    Wheel {
        #[serde(rename = "deltaX")]
        delta_x: f64,
        #[serde(rename = "deltaY")]
        delta_y: f64,
    },
    /// `key` is the ordered key-symbol sequence of one input event.
    Keystroke {
        key: Vec<String>,
        modifiers: Modifiers,
        down: bool,
    },
    RemoteControlEnabled { enabled: bool },
    MouseVisible { visible: bool },
    AddToClipboard { is_copy: bool },
    ClipboardPayload(ClipboardPayload),
    /// `data` accepts explicit null (a paste with no carried payload).
    PasteFromClipboard { data: Option<ClipboardPayload> },
    DrawStart { point: Point, path_id: u32 },
    DrawAddPoint { point: Point },
    DrawEnd { point: Point },
    DrawClearPath { path_id: u32 },
    DrawClearAllPaths,
    ClickAnimation { point: Point },
    DrawingMode(DrawingMode),
}

fn payload_obj<'a>(root: &'a Map<String, Value>) -> Result<&'a Map<String, Value>> {
    value::get_obj(root, "payload")
}

impl WireMessage {
    /// Validate an arbitrary decoded value into a typed message.
    ///
    /// Pure and side-effect free; dispatches on the `type` tag only, then
    /// checks the corresponding payload shape exactly. Must run at every
    /// inbound boundary before any payload is trusted.
    pub fn parse(raw: &Value) -> Result<Self> {
        let root = value::as_object(raw, "message")?;
        match value::get_str(root, "type")? {
            "mouse_move" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::MouseMove {
                    x: value::get_f64(p, "x")?,
                    y: value::get_f64(p, "y")?,
                    pointer: value::get_bool(p, "pointer")?,
                })
            }
            "mouse_click" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::MouseClick {
                    x: value::get_f64(p, "x")?,
                    y: value::get_f64(p, "y")?,
                    button: MouseButton::parse(p)?,
                    clicks: value::get_u32(p, "clicks")?,
                    down: value::get_bool(p, "down")?,
                    modifiers: Modifiers::parse(p)?,
                })
            }
            "wheel" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::Wheel {
                    delta_x: value::get_f64(p, "deltaX")?,
                    delta_y: value::get_f64(p, "deltaY")?,
                })
            }
            "keystroke" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::Keystroke {
                    key: value::get_str_seq(p, "key")?,
                    modifiers: Modifiers::parse(p)?,
                    down: value::get_bool(p, "down")?,
                })
            }
            "remote_control_enabled" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::RemoteControlEnabled {
                    enabled: value::get_bool(p, "enabled")?,
                })
            }
            "mouse_visible" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::MouseVisible {
                    visible: value::get_bool(p, "visible")?,
                })
            }
            "add_to_clipboard" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::AddToClipboard {
                    is_copy: value::get_bool(p, "is_copy")?,
                })
            }
            "clipboard_payload" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::ClipboardPayload(ClipboardPayload::parse(p)?))
            }
            "paste_from_clipboard" => {
                let p = payload_obj(root)?;
                let data = match p.get("data") {
                    None | Some(Value::Null) => None,
                    Some(v) => Some(ClipboardPayload::parse(value::as_object(v, "data")?)?),
                };
                Ok(WireMessage::PasteFromClipboard { data })
            }
            "draw_start" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::DrawStart {
                    point: Point::parse(p, "point")?,
                    path_id: value::get_u32(p, "path_id")?,
                })
            }
            "draw_add_point" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::DrawAddPoint {
                    point: Point::parse(p, "point")?,
                })
            }
            "draw_end" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::DrawEnd {
                    point: Point::parse(p, "point")?,
                })
            }
            "draw_clear_path" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::DrawClearPath {
                    path_id: value::get_u32(p, "path_id")?,
                })
            }
            "draw_clear_all_paths" => Ok(WireMessage::DrawClearAllPaths),
            "click_animation" => {
                let p = payload_obj(root)?;
                Ok(WireMessage::ClickAnimation {
                    point: Point::parse(p, "point")?,
                })
            }
            "drawing_mode" => {
                let p = value::get(root, "payload")?;
                Ok(WireMessage::DrawingMode(DrawingMode::parse(p)?))
            }
            other => Err(ProtoError::UnknownMessageType(other.to_owned())),
        }
    }
}
