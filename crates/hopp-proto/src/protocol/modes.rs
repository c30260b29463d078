//! Drawing-mode unions.
//!
//! Two structurally similar but deliberately distinct types live here:
//! `DrawingMode` is the transient in-session surface mode, mutated only by
//! `drawing_mode` messages; `StoredMode` is the user's persisted
//! preference. They map through [`DrawingMode::from_stored`] and are never
//! unified, so session-transient state cannot leak into the stored
//! preference.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ProtoError, Result};
use crate::protocol::value;

/// Transient surface mode of the active remote-control session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum DrawingMode {
    /// No strokes or ripples are rendered.
    Disabled,
    /// Freehand strokes; `permanent` strokes survive leaving draw mode.
    Draw { permanent: bool },
    /// Click ripples only.
    ClickAnimation,
}

impl DrawingMode {
    /// Validate a decoded mode value (the `payload` of a `drawing_mode`
    /// message, or a standalone stored value).
    pub fn parse(v: &Value) -> Result<Self> {
        let obj = value::as_object(v, "drawing_mode")?;
        match value::get_str(obj, "type")? {
            "disabled" => Ok(DrawingMode::Disabled),
            "draw" => {
                let payload = value::get_obj(obj, "payload")?;
                Ok(DrawingMode::Draw {
                    permanent: value::get_bool(payload, "permanent")?,
                })
            }
            "click_animation" => Ok(DrawingMode::ClickAnimation),
            other => Err(ProtoError::InvalidEnumValue {
                field: "drawing_mode.type",
                value: other.to_owned(),
            }),
        }
    }

    /// Session mode adopted when a stored preference takes effect.
    ///
    /// `RemoteControl` carries no drawing behaviour and maps to `Disabled`.
    pub fn from_stored(stored: &StoredMode) -> Self {
        match stored {
            StoredMode::RemoteControl => DrawingMode::Disabled,
            StoredMode::ClickAnimation => DrawingMode::ClickAnimation,
            StoredMode::Draw { permanent } => DrawingMode::Draw {
                permanent: *permanent,
            },
        }
    }
}

/// Persisted user preference, independent of the in-session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StoredMode {
    /// Plain remote control, no drawing overlay.
    RemoteControl,
    /// Click ripples.
    ClickAnimation,
    /// Freehand strokes with a permanence flag.
    Draw { permanent: bool },
}

impl StoredMode {
    /// Validate a stored-preference value before trusting it.
    pub fn parse(v: &Value) -> Result<Self> {
        let obj = value::as_object(v, "stored_mode")?;
        match value::get_str(obj, "type")? {
            "remote_control" => Ok(StoredMode::RemoteControl),
            "click_animation" => Ok(StoredMode::ClickAnimation),
            "draw" => {
                let payload = value::get_obj(obj, "payload")?;
                Ok(StoredMode::Draw {
                    permanent: value::get_bool(payload, "permanent")?,
                })
            }
            other => Err(ProtoError::InvalidEnumValue {
                field: "stored_mode.type",
                value: other.to_owned(),
            }),
        }
    }
}
