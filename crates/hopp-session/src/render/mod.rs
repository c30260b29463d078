//! Offscreen frame rendering.
//!
//! Decoded I420 planes arrive by ownership transfer, become presentable
//! frames, and are drawn to a target off the interactive thread. The
//! stroke store holds the drawing overlay state the renderer composites.

pub mod frame;
pub mod strokes;
pub mod surface;
pub mod worker;

pub use frame::{ColorDescription, PlaneLayout, PresentableFrame, VideoFrameBuffer};
pub use strokes::{Stroke, StrokeStore};
pub use surface::{DrawTarget, SoftwareCanvas};
pub use worker::{spawn, RendererCommand, RendererEvent};
