mod domain;
mod clients;
mod messages;

mod app_system;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

mod actor_framework;
mod form_actor;
mod user_actor;

use std::time::Duration;

use tracing::{info, Instrument};
use crate::app_system::{setup_tracing, FormSystem, FormSystemConfig, SystemError};
use crate::clients::UserClient;
use crate::domain::{User, UserField, UserId};
use crate::form_actor::SubmitOutcome;
use crate::user_actor::UserError;

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    setup_tracing();

    info!("Starting user detail form demo");

    let mut system = FormSystem::new(FormSystemConfig::default());

    // Seed the store so the form edits an existing record.
    let id = system
        .user_client
        .create_user(User::new("Jane", "Doe", "jane@example.com"))
        .await?;
    let stored = system
        .user_client
        .get_user(id)
        .await?
        .ok_or_else(|| UserError::NotFound(id.to_string()))?;

    let form = system.mount_form(stored);

    let span = tracing::info_span!("invalid_submit");
    async {
        form.change_field(UserField::FirstName, String::new()).await?;
        form.change_field(UserField::Email, "not-an-email".to_string()).await?;
        if let SubmitOutcome::Invalid(errors) = form.submit().await? {
            for (field, message) in errors.iter() {
                info!(%field, error = message, "Validation error");
            }
        }
        info!("\n{}", form.view().await?);
        Ok::<_, SystemError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("valid_submit");
    async {
        form.change_field(UserField::FirstName, "Janet".to_string()).await?;
        form.change_field(UserField::Email, "janet@example.com".to_string()).await?;
        let outcome = form.submit().await?;
        info!(?outcome, "Submitted");

        let expected = User::new("Janet", "Doe", "janet@example.com").with_id(id);
        let saved = wait_for_stored_record(&system.user_client, &expected).await?;
        info!(user = %serde_json::to_string(&saved).unwrap_or_default(), "Record saved");

        let snapshot = form.snapshot().await?;
        info!(form = %serde_json::to_string(&snapshot).unwrap_or_default(), "Form state");
        info!("\n{}", form.view().await?);
        Ok::<_, SystemError>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}

/// Polls the store until the submitted record has been saved.
async fn wait_for_stored_record(user_client: &UserClient, expected: &User) -> Result<User, SystemError> {
    let id = expected.id.ok_or(UserError::MissingId)?;
    let stored = tokio::time::timeout(Duration::from_secs(2), poll_store(user_client, id, expected))
        .await
        .map_err(|_| SystemError::Timeout("stored record"))??;
    Ok(stored)
}

async fn poll_store(user_client: &UserClient, id: UserId, expected: &User) -> Result<User, UserError> {
    loop {
        if let Some(stored) = user_client.get_user(id).await? {
            if &stored == expected {
                return Ok(stored);
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
