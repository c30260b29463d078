//! Wire message schemas (control lane + call-signaling lane).
//!
//! Both lanes are JSON envelopes with a `type` discriminator and a
//! type-specific `payload`. Validation dispatches on the tag alone; once
//! dispatched, only the corresponding shape is checked.
//!
//! All parsers are panic-free: malformed input is reported as `ProtoError`
//! instead of panicking, keeping a live call session resilient to hostile
//! or corrupted traffic.

pub mod control;
pub mod modes;
pub mod signaling;
pub(crate) mod value;

pub use control::{ClipboardPayload, Modifiers, MouseButton, Point, WireMessage};
pub use modes::{DrawingMode, StoredMode};
pub use signaling::{CallMessage, CallTokens, RejectReason};
