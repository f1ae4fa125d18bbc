use thiserror::Error;

/// Errors returned by [`FormClient`](crate::clients::FormClient) calls.
///
/// Validation failures are not errors; they come back as
/// [`SubmitOutcome::Invalid`](super::SubmitOutcome::Invalid).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
