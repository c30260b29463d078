//! Shared error type across Hopp crates.

use thiserror::Error;

/// Stable rejection codes surfaced to the host layer (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Unknown `type` discriminator.
    UnknownMessageType,
    /// Required field absent.
    MissingField,
    /// Field present but of the wrong JSON type.
    InvalidFieldType,
    /// Enum-valued field outside its declared literal set.
    InvalidEnumValue,
    /// Clipboard chunk declared zero total packets.
    InvalidChunkCount,
    /// Clipboard packet index not in `[0, total_packets)`.
    PacketIndexOutOfRange,
}

impl ErrorCode {
    /// String representation used in structured logs and status payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnknownMessageType => "UNKNOWN_MESSAGE_TYPE",
            ErrorCode::MissingField => "MISSING_FIELD",
            ErrorCode::InvalidFieldType => "INVALID_FIELD_TYPE",
            ErrorCode::InvalidEnumValue => "INVALID_ENUM_VALUE",
            ErrorCode::InvalidChunkCount => "INVALID_CHUNK_COUNT",
            ErrorCode::PacketIndexOutOfRange => "PACKET_INDEX_OUT_OF_RANGE",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ProtoError>;

/// Unified rejection type used by the validator and the reassembler.
///
/// A rejected message is dropped in full; no partial effects are applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtoError {
    #[error("unknown message type: {0}")]
    UnknownMessageType(String),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("field {field} must be {expected}")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("field {field} has invalid value: {value}")]
    InvalidEnumValue {
        field: &'static str,
        value: String,
    },
    #[error("total_packets must be non-zero")]
    InvalidChunkCount,
    #[error("packet_id {packet_id} out of range for {total_packets} packets")]
    PacketIndexOutOfRange { packet_id: u32, total_packets: u32 },
}

impl ProtoError {
    /// Map to a stable host-facing code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ProtoError::UnknownMessageType(_) => ErrorCode::UnknownMessageType,
            ProtoError::MissingField(_) => ErrorCode::MissingField,
            ProtoError::InvalidFieldType { .. } => ErrorCode::InvalidFieldType,
            ProtoError::InvalidEnumValue { .. } => ErrorCode::InvalidEnumValue,
            ProtoError::InvalidChunkCount => ErrorCode::InvalidChunkCount,
            ProtoError::PacketIndexOutOfRange { .. } => ErrorCode::PacketIndexOutOfRange,
        }
    }
}
