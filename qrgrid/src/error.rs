//! Error types for QR encoding.

use thiserror::Error;

/// Errors that can occur while encoding a QR symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// Division by zero in GF(2^8). A caller broke a precondition.
    #[error("division by zero in GF(2^8)")]
    DivisionByZero,

    /// Payload does not fit the largest supported version.
    #[error("payload of {len} bytes exceeds the maximum of {max} bytes")]
    CapacityExceeded { len: usize, max: usize },

    /// The delegated encoder rejected the payload.
    #[cfg(feature = "external-backend")]
    #[error("external encoder failed: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, QrError>;
