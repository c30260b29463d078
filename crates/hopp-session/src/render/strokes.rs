//! Drawing overlay state owned by the renderer.
//!
//! Strokes capture their permanence from the mode active at `draw_start`.
//! Entering `Disabled` clears non-permanent strokes and pending ripples
//! immediately; stale overlay artifacts are a correctness bug.

use std::collections::HashMap;

use hopp_proto::protocol::{DrawingMode, Point, WireMessage};

/// One freehand stroke path.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub permanent: bool,
}

/// Stroke paths and pending click ripples for one session.
#[derive(Debug, Default)]
pub struct StrokeStore {
    paths: HashMap<u32, Stroke>,
    open_path: Option<u32>,
    ripples: Vec<Point>,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one drawing event under the given mode. Events outside the
    /// mode that permits them are ignored.
    pub fn apply(&mut self, msg: &WireMessage, mode: DrawingMode) {
        match (msg, mode) {
            (WireMessage::DrawStart { point, path_id }, DrawingMode::Draw { permanent }) => {
                self.paths.insert(
                    *path_id,
                    Stroke {
                        points: vec![*point],
                        permanent,
                    },
                );
                self.open_path = Some(*path_id);
            }
            (WireMessage::DrawAddPoint { point }, DrawingMode::Draw { .. }) => {
                if let Some(stroke) = self.open_path.and_then(|id| self.paths.get_mut(&id)) {
                    stroke.points.push(*point);
                }
            }
            (WireMessage::DrawEnd { point }, DrawingMode::Draw { .. }) => {
                if let Some(stroke) = self.open_path.and_then(|id| self.paths.get_mut(&id)) {
                    stroke.points.push(*point);
                }
                self.open_path = None;
            }
            (WireMessage::DrawClearPath { path_id }, _) => {
                self.paths.remove(path_id);
                if self.open_path == Some(*path_id) {
                    self.open_path = None;
                }
            }
            (WireMessage::DrawClearAllPaths, _) => {
                self.paths.clear();
                self.open_path = None;
            }
            (WireMessage::ClickAnimation { point }, DrawingMode::ClickAnimation) => {
                self.ripples.push(*point);
            }
            _ => {}
        }
    }

    /// Renderer-side effect of a mode transition.
    pub fn on_mode_change(&mut self, current: DrawingMode) {
        if current == DrawingMode::Disabled {
            self.ripples.clear();
            self.paths.retain(|_, stroke| stroke.permanent);
            self.open_path = None;
        }
    }

    pub fn path(&self, path_id: u32) -> Option<&Stroke> {
        self.paths.get(&path_id)
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Ripples waiting to be animated; drained by the compositor per frame.
    pub fn take_ripples(&mut self) -> Vec<Point> {
        std::mem::take(&mut self.ripples)
    }

    pub fn pending_ripples(&self) -> usize {
        self.ripples.len()
    }
}
