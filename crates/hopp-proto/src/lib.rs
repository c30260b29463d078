//! Hopp protocol core: wire message schema, validation, clipboard
//! reassembly, and drawing-mode state.
//!
//! This crate defines the contracts consumed at every inbound boundary of a
//! remote-control session (call data-channel traffic, stored-preference
//! deserialization). It intentionally carries no transport or runtime
//! dependencies so the session runtime and tooling can share it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ProtoError`/`Result` so a live call
//! session never crashes on malformed traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod clipboard;
pub mod drawing;
pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorCode, ProtoError, Result};
