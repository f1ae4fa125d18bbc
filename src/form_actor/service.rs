use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn, Instrument};

use crate::clients::{FormClient, UserClient};
use crate::domain::{User, UserField};
use crate::messages::{FormRequest, ServiceResponse};

use super::{ErrorMap, FormError, FormView, UserSchema};

/// Result of a submit as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one rule failed; the map is now the form's error map.
    Invalid(ErrorMap),
    /// The record was valid and the update call was sent. The stored version
    /// replaces the local record when the response arrives.
    Dispatched,
    /// The record was valid but has no identifier, so nothing was sent.
    Unsaved,
}

/// Current record and error map of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub user: User,
    pub errors: ErrorMap,
}

/// Actor owning the editable copy of one user record.
///
/// Submits do not wait for the update call: the call runs on its own task and
/// posts the stored record back as [`FormRequest::UpdateResolved`]. Nothing
/// guards against overlapping submits, so the response processed last decides
/// the final record.
pub struct FormService {
    receiver: mpsc::Receiver<FormRequest>,
    mailbox: mpsc::WeakSender<FormRequest>,
    user_client: UserClient,
    schema: UserSchema,
    user: User,
    errors: ErrorMap,
}

impl FormService {
    /// Mounts a form on `initial`. The value is read once; the form owns its
    /// copy from here on.
    pub fn new(buffer_size: usize, initial: User, user_client: UserClient) -> (Self, FormClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            mailbox: sender.downgrade(),
            user_client,
            schema: UserSchema::user_detail(),
            user: initial,
            errors: ErrorMap::new(),
        };
        (service, FormClient::new(sender))
    }

    /// Replace the validation rules.
    #[allow(dead_code)]
    pub fn with_schema(mut self, schema: UserSchema) -> Self {
        self.schema = schema;
        self
    }

    #[instrument(name = "form_service", skip(self))]
    pub async fn run(mut self) {
        info!(user_id = ?self.user.id, "FormService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                FormRequest::ChangeField { field, value, respond_to } => {
                    self.handle_change_field(field, value, respond_to);
                }
                FormRequest::Submit { respond_to } => {
                    self.handle_submit(respond_to);
                }
                FormRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(FormSnapshot {
                        user: self.user.clone(),
                        errors: self.errors.clone(),
                    }));
                }
                FormRequest::View { respond_to } => {
                    let _ = respond_to.send(Ok(FormView::render(&self.user, &self.errors)));
                }
                FormRequest::UpdateResolved { user } => {
                    self.handle_update_resolved(user);
                }
                FormRequest::Shutdown => {
                    info!("FormService shutting down");
                    break;
                }
            }
        }
        info!("FormService stopped");
    }

    #[instrument(skip(self, value, respond_to))]
    fn handle_change_field(&mut self, field: UserField, value: String, respond_to: ServiceResponse<(), FormError>) {
        debug!("Processing change_field request");
        self.user.set_field(field, value);
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_submit(&mut self, respond_to: ServiceResponse<SubmitOutcome, FormError>) {
        debug!("Processing submit request");

        let outcome = match self.schema.validate(&self.user) {
            Err(violations) => {
                self.errors = ErrorMap::from_violations(violations);
                info!(errors = self.errors.len(), "Validation failed");
                SubmitOutcome::Invalid(self.errors.clone())
            }
            Ok(()) => {
                self.errors = ErrorMap::new();
                if self.user.id.is_some() {
                    self.dispatch_update();
                    SubmitOutcome::Dispatched
                } else {
                    info!("Record has no identifier, nothing to save");
                    SubmitOutcome::Unsaved
                }
            }
        };
        let _ = respond_to.send(Ok(outcome));
    }

    fn dispatch_update(&self) {
        let Some(mailbox) = self.mailbox.upgrade() else {
            warn!("Form has no clients left, update not sent");
            return;
        };
        let user_client = self.user_client.clone();
        let user = self.user.clone();

        tokio::spawn(
            async move {
                match user_client.update_user(user).await {
                    Ok(response) => {
                        let _ = mailbox.send(FormRequest::UpdateResolved { user: response.data }).await;
                    }
                    // Not reported back to the form: the record keeps its current value.
                    Err(e) => error!(error = %e, "Update failed"),
                }
            }
            .in_current_span(),
        );
        info!("Update dispatched");
    }

    #[instrument(skip(self, user), fields(stored_id = ?user.id))]
    fn handle_update_resolved(&mut self, user: User) {
        info!("Replacing record with stored version");
        self.user = user;
    }
}
