use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User has no identifier and cannot be updated")]
    MissingId,
    #[error("User rejected: {0}")]
    Rejected(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for UserError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => Self::NotFound(id),
            FrameworkError::Rejected(reason) => Self::Rejected(reason),
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}
