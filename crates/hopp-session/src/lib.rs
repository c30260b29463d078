//! Hopp session runtime.
//!
//! This crate wires the protocol core into a running remote-control
//! session: the decode-once session engine, the raw socket relay worker,
//! the offscreen frame renderer worker, and their config and metrics. It is
//! consumed by the harness binary (`main.rs`) and by integration tests.

pub mod config;
pub mod context;
pub mod error;
pub mod obs;
pub mod relay;
pub mod render;
pub mod session;

pub use error::{Result, SessionError};
