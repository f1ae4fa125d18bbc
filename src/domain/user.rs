use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to a user once it has been stored.
pub type UserId = u64;

/// A user record as edited by the detail form.
///
/// `id` is `None` for a record that has never been stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl User {
    /// Creates a user that has not been stored yet.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Sets the identifier, marking the record as an existing one.
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns the current value of an editable field.
    pub fn field(&self, field: UserField) -> &str {
        match field {
            UserField::FirstName => &self.first_name,
            UserField::LastName => &self.last_name,
            UserField::Email => &self.email,
        }
    }

    /// Replaces exactly one editable field. The identifier is never touched.
    pub fn set_field(&mut self, field: UserField, value: impl Into<String>) {
        let slot = match field {
            UserField::FirstName => &mut self.first_name,
            UserField::LastName => &mut self.last_name,
            UserField::Email => &mut self.email,
        };
        *slot = value.into();
    }
}

/// The editable fields of a [`User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserField {
    FirstName,
    LastName,
    Email,
}

impl UserField {
    /// All editable fields, in form order.
    pub const ALL: [UserField; 3] = [UserField::FirstName, UserField::LastName, UserField::Email];

    /// Wire name of the field, as used in error maps and payloads.
    pub fn name(self) -> &'static str {
        match self {
            UserField::FirstName => "firstName",
            UserField::LastName => "lastName",
            UserField::Email => "email",
        }
    }

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            UserField::FirstName => "First Name",
            UserField::LastName => "Last Name",
            UserField::Email => "Email",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Response of the remote update call. `data` is the stored version of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub data: User,
}
