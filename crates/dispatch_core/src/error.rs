//! Error taxonomy for the dispatch core.
//!
//! Every failure is raised at the point of violation and surfaced to the
//! caller unchanged. Guards run before any mutation, so an `Err` always means
//! the affected ride, driver, or store is exactly as it was before the call.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Unknown user, driver, or ride id; or no driver is available.
    #[error("not found: {0}")]
    NotFound(String),

    /// Lifecycle transition attempted out of order.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Unknown fare-strategy or payment-method token.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DispatchError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// The detail text without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg) | Self::InvalidState(msg) | Self::InvalidArgument(msg) => msg,
        }
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;
