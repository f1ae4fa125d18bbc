use crate::actor_framework::Entity;
use crate::domain::{User, UserId};

impl Entity for User {
    type Id = UserId;
    type CreateParams = User;
    type Patch = User;

    /// Stores a new user under the assigned identifier. Any `id` carried by
    /// `params` is ignored.
    fn from_create_params(id: UserId, params: User) -> Result<Self, String> {
        Ok(Self {
            id: Some(id),
            ..params
        })
    }

    /// Replaces every editable field with the submitted record.
    ///
    /// The stored identifier always wins over the one in `patch`.
    fn on_update(&mut self, patch: User) -> Result<(), String> {
        let id = self.id;
        *self = Self { id, ..patch };
        Ok(())
    }
}
