use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::UserField;
use crate::form_actor::{FormError, FormSnapshot, FormView, SubmitOutcome};
use crate::messages::FormRequest;

/// Handle to a mounted user detail form.
#[derive(Clone)]
pub struct FormClient {
    sender: mpsc::Sender<FormRequest>,
}

impl FormClient {
    pub fn new(sender: mpsc::Sender<FormRequest>) -> Self {
        Self { sender }
    }

    /// Stops the form. Updates already dispatched still run to completion.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), FormError> {
        debug!("Sending request");
        self.sender
            .send(FormRequest::Shutdown)
            .await
            .map_err(|_| FormError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(FormClient => fn change_field(field: UserField, value: String) -> () as FormRequest::ChangeField, Error = FormError);
client_method!(FormClient => fn submit() -> SubmitOutcome as FormRequest::Submit, Error = FormError);
client_method!(FormClient => fn snapshot() -> FormSnapshot as FormRequest::Snapshot, Error = FormError);
client_method!(FormClient => fn view() -> FormView as FormRequest::View, Error = FormError);
