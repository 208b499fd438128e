//! Error types reported by the native SDK boundary

use thiserror::Error;

/// Errors surfaced by the native SDK
///
/// The bridge never retries on its own. Every error is handed to the caller
/// through a completion or the location-error event, and the caller decides
/// what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    /// Transport failure while talking to the positioning service
    #[error("network error: {message}")]
    Network { message: String },
    /// The configured credentials were rejected
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },
    /// The request was malformed or referenced an unknown entity
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
    /// Failure inside the location pipeline while the stream is active
    #[error("positioning error: {message}")]
    Positioning { message: String },
    /// Any other error the native side reports
    #[error("native error {code}: {message}")]
    Internal { code: u32, message: String },
}

/// Result type for native SDK operations
pub type SdkResult<T> = Result<T, SdkError>;
