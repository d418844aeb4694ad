//! Tracker error types

use thiserror::Error;

/// Errors returned from a tracked call
///
/// `E` is the delegate's own error type; delegate failures pass through
/// untouched in [`TrackerError::Delegate`].
#[derive(Debug, Error)]
pub enum TrackerError<E> {
    #[error("Retry limit exceeded for {operation}")]
    RetryLimitExceeded { operation: String, attempts: u32 },

    #[error("Operation {operation} is reserved by the tracker and cannot be forwarded")]
    ReservedOperation { operation: String },

    #[error(transparent)]
    Delegate(E),
}

impl<E> TrackerError<E> {
    /// Check if this is a retry exhaustion error
    pub fn is_retry_limit(&self) -> bool {
        matches!(self, TrackerError::RetryLimitExceeded { .. })
    }

    /// Operation name carried by tracker-level errors
    pub fn operation(&self) -> Option<&str> {
        match self {
            TrackerError::RetryLimitExceeded { operation, .. } => Some(operation),
            TrackerError::ReservedOperation { operation } => Some(operation),
            TrackerError::Delegate(_) => None,
        }
    }

    /// Recover the delegate's error, if that is what this is
    pub fn into_delegate(self) -> Option<E> {
        match self {
            TrackerError::Delegate(e) => Some(e),
            _ => None,
        }
    }
}
