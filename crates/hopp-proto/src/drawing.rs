//! Drawing-mode state machine.
//!
//! Session-scoped, last-message-wins: a `drawing_mode` message replaces the
//! current state unconditionally. Rendering side effects of a transition
//! (clearing non-permanent strokes and pending ripples on `Disabled`) are
//! owned by the renderer layer, which consumes the returned previous state.

use crate::protocol::modes::DrawingMode;

/// Current surface mode of one remote-control session.
#[derive(Debug)]
pub struct DrawingModeState {
    current: DrawingMode,
}

impl Default for DrawingModeState {
    fn default() -> Self {
        Self {
            current: DrawingMode::Disabled,
        }
    }
}

impl DrawingModeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> DrawingMode {
        self.current
    }

    /// Replace the state; returns the state being left.
    pub fn apply(&mut self, next: DrawingMode) -> DrawingMode {
        std::mem::replace(&mut self.current, next)
    }

    /// Back to `Disabled` when the remote-control session ends.
    pub fn reset(&mut self) -> DrawingMode {
        self.apply(DrawingMode::Disabled)
    }
}
