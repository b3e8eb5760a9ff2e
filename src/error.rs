//! Error types for packet construction and extraction.
//!
//! Two failure kinds cover the whole surface:
//!
//! - **Type mismatch**: the packet's payload tag differs from what the caller
//!   requested. Raised by every typed extractor and validator.
//! - **Status-propagated failure**: an engine-side operation reported a non-ok
//!   status (malformed structured-message serialization, invalid UTF-8 in a
//!   string payload, ...). The original status detail is preserved.
//!
//! Both are synchronous and recoverable. Some upstream engines abort the
//! process on internal faults instead of reporting a status; this crate never
//! does — every failure surfaces as a [`PacketError`].
//!
//! ```rust
//! use packline::{Packet, PacketError, PayloadKind};
//!
//! let packet = Packet::create_int(42);
//! let err = packet.get_float().unwrap_err();
//! assert!(matches!(
//!     err,
//!     PacketError::TypeMismatch { expected: PayloadKind::Float, actual: PayloadKind::Int }
//! ));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::PayloadKind;

/// Result type alias for packet operations.
pub type Result<T, E = PacketError> = std::result::Result<T, E>;

/// Status codes reported by engine-side operations.
///
/// A subset of the canonical status space; only codes that packet operations
/// actually produce are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    /// Malformed input (bad serialization, invalid encoding).
    InvalidArgument,
    /// A named entity (e.g. a message type) was not the one recorded.
    NotFound,
    /// The operation was attempted against a packet in the wrong state.
    FailedPrecondition,
    /// An internal engine fault.
    Internal,
    /// The operation is not supported for this payload.
    Unimplemented,
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatusCode::InvalidArgument => "INVALID_ARGUMENT",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::FailedPrecondition => "FAILED_PRECONDITION",
            StatusCode::Internal => "INTERNAL",
            StatusCode::Unimplemented => "UNIMPLEMENTED",
        };
        f.write_str(name)
    }
}

/// Main error type for packet operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PacketError {
    #[error("type mismatch: expected {expected}, packet holds {actual}")]
    TypeMismatch { expected: PayloadKind, actual: PayloadKind },

    #[error("{code}: {message}")]
    Status { code: StatusCode, message: String },
}

impl PacketError {
    /// Returns whether this error is a payload type mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, PacketError::TypeMismatch { .. })
    }

    /// Returns the propagated status code, if this is a status failure.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            PacketError::Status { code, .. } => Some(*code),
            PacketError::TypeMismatch { .. } => None,
        }
    }

    /// Helper constructor for type mismatch errors.
    pub(crate) fn mismatch(expected: PayloadKind, actual: PayloadKind) -> Self {
        PacketError::TypeMismatch { expected, actual }
    }

    /// Helper constructor for `INVALID_ARGUMENT` status failures.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PacketError::Status { code: StatusCode::InvalidArgument, message: message.into() }
    }

    /// Helper constructor for `NOT_FOUND` status failures.
    pub fn not_found(message: impl Into<String>) -> Self {
        PacketError::Status { code: StatusCode::NotFound, message: message.into() }
    }

    /// Helper constructor for `INTERNAL` status failures.
    pub fn internal(message: impl Into<String>) -> Self {
        PacketError::Status { code: StatusCode::Internal, message: message.into() }
    }
}

impl From<std::str::Utf8Error> for PacketError {
    fn from(err: std::str::Utf8Error) -> Self {
        PacketError::invalid_argument(format!("string payload is not valid UTF-8: {err}"))
    }
}

impl From<prost::DecodeError> for PacketError {
    fn from(err: prost::DecodeError) -> Self {
        PacketError::invalid_argument(format!("failed to decode message: {err}"))
    }
}
