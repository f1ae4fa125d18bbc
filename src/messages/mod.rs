use tokio::sync::oneshot;

use crate::domain::{User, UserField};
use crate::form_actor::{FormError, FormSnapshot, FormView, SubmitOutcome};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Messages understood by the form actor. Each request variant carries a
/// oneshot channel for the reply.
#[derive(Debug)]
pub enum FormRequest {
    ChangeField {
        field: UserField,
        value: String,
        respond_to: ServiceResponse<(), FormError>,
    },
    Submit {
        respond_to: ServiceResponse<SubmitOutcome, FormError>,
    },
    Snapshot {
        respond_to: ServiceResponse<FormSnapshot, FormError>,
    },
    View {
        respond_to: ServiceResponse<FormView, FormError>,
    },
    /// Posted by the background update task once the remote call returns.
    UpdateResolved {
        user: User,
    },
    Shutdown,
}
