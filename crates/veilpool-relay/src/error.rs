//! error types for the relay

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelayError>;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("rpc transport error: {0}")]
    Transport(String),

    #[error("upstream node error: {0}")]
    Upstream(UpstreamError),

    #[error("invalid response payload: {0}")]
    Payload(String),

    #[error(transparent)]
    Field(#[from] veilpool_field::FieldError),
}

/// normalized reasons the chain node rejects or drops a submission
#[derive(Debug, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("nullifier already consumed")]
    NullifierReused,

    #[error("fee too low")]
    FeeTooLow,

    #[error("node unavailable: {0}")]
    Unavailable(String),
}

impl RelayError {
    /// whether the caller should retry the same submission. rejections
    /// with a definite reason are not retryable; transport drops and
    /// node unavailability are.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RelayError::Transport(_) | RelayError::Upstream(UpstreamError::Unavailable(_))
        )
    }
}

impl From<sled::Error> for RelayError {
    fn from(e: sled::Error) -> Self {
        RelayError::Storage(e.to_string())
    }
}

/// map a raw node error string onto the normalized taxonomy
pub fn normalize_upstream(message: &str) -> UpstreamError {
    if message.contains("NULLIFIER") {
        UpstreamError::NullifierReused
    } else if message.contains("OUT_OF_GAS") || message.contains("insufficient fee") {
        UpstreamError::FeeTooLow
    } else {
        UpstreamError::Unavailable(message.to_string())
    }
}
