use thiserror::Error;

use crate::form_actor::FormError;
use crate::user_actor::UserError;

/// Errors surfaced by the system coordinator and the binary.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
    #[error("Timed out waiting for {0}")]
    Timeout(&'static str),
}
