//! Runtime-layer error type.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors raised by the session runtime (config, rendering, transport).
///
/// Protocol rejections pass through unchanged so the host layer keeps the
/// stable `ErrorCode` surface from `hopp-proto`.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error(transparent)]
    Proto(#[from] hopp_proto::ProtoError),
    #[error("i420 frame requires even dimensions: {width}x{height}")]
    OddDimensions { width: u32, height: u32 },
    #[error("frame dimensions must be non-zero: {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
    #[error("frame buffer too short: need {need} bytes, got {got}")]
    BufferTooShort { need: usize, got: usize },
    #[error("draw target unavailable")]
    TargetUnavailable,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
