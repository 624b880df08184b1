//! Errors returned by message service calls

use thiserror::Error;

/// Failure of a single request to the message backend
///
/// Every variant is terminal for the operation that issued the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend answered with a non-success status
    #[error("unexpected status {0}")]
    Status(u16),
    /// The response body could not be decoded
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<ureq::Error> for ServiceError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => ServiceError::Status(code),
            other => ServiceError::Transport(other.to_string()),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
