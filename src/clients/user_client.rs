use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{UpdateResponse, User, UserId};
use crate::user_actor::UserError;

/// Client for the user store. This is the "update user" collaborator the
/// detail form saves through.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_resource_client!(UserClient, User, UserError, user);

impl UserClient {
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_user(&self, user: User) -> Result<UserId, UserError> {
        debug!("Sending request");
        Ok(self.inner.create(user).await?)
    }

    /// Persists the full record and returns the stored version.
    ///
    /// # Errors
    /// [`UserError::MissingId`] if the record has never been stored.
    #[instrument(skip(self, user), fields(user_id = ?user.id))]
    pub async fn update_user(&self, user: User) -> Result<UpdateResponse, UserError> {
        debug!("Sending request");
        let id = user.id.ok_or(UserError::MissingId)?;
        let data = self.inner.update(id, user).await?;
        Ok(UpdateResponse { data })
    }
}
