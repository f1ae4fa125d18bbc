use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::clients::{FormClient, UserClient};
use crate::domain::User;
use crate::form_actor::FormService;

use super::SystemError;

/// Mailbox sizes for the actors started by [`FormSystem`].
#[derive(Debug, Clone, Copy)]
pub struct FormSystemConfig {
    pub user_store_buffer: usize,
    pub form_buffer: usize,
}

impl Default for FormSystemConfig {
    fn default() -> Self {
        Self {
            user_store_buffer: 32,
            form_buffer: 32,
        }
    }
}

/// Starts the user store and the forms mounted on it, and shuts them down.
pub struct FormSystem {
    pub user_client: UserClient,
    config: FormSystemConfig,
    forms: Vec<FormClient>,
    form_handles: Vec<tokio::task::JoinHandle<()>>,
    store_handle: tokio::task::JoinHandle<()>,
}

impl FormSystem {
    pub fn new(config: FormSystemConfig) -> Self {
        let user_id_counter = Arc::new(AtomicU64::new(1));
        let next_user_id = move || user_id_counter.fetch_add(1, Ordering::SeqCst);

        let (user_actor, user_resource_client) = ResourceActor::<User>::new(config.user_store_buffer, next_user_id);
        let store_handle = tokio::spawn(user_actor.run());
        info!("User store started");

        Self {
            user_client: UserClient::new(user_resource_client),
            config,
            forms: Vec::new(),
            form_handles: Vec::new(),
            store_handle,
        }
    }

    /// Mounts a detail form on `initial` and returns its handle.
    pub fn mount_form(&mut self, initial: User) -> FormClient {
        let (service, client) = FormService::new(self.config.form_buffer, initial, self.user_client.clone());
        self.form_handles.push(tokio::spawn(service.run()));
        self.forms.push(client.clone());
        client
    }

    /// Stops every form, then the user store once its last client is gone.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        for form in &self.forms {
            // A form whose mailbox is already closed has stopped on its own.
            let _ = form.shutdown().await;
        }
        drop(self.forms);

        for handle in self.form_handles {
            handle.await.map_err(|e| {
                error!("Form task failed: {:?}", e);
                SystemError::TaskFailed(e.to_string())
            })?;
        }

        // The store stops when every UserClient, including those held by
        // in-flight update tasks, has been dropped.
        drop(self.user_client);
        self.store_handle.await.map_err(|e| {
            error!("User store task failed: {:?}", e);
            SystemError::TaskFailed(e.to_string())
        })?;

        info!("System shutdown complete.");
        Ok(())
    }
}
