use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::UserField;

use super::Violation;

/// Field to message map of the failures from the last submit.
///
/// Keyed by [`UserField`], so only real record fields can carry an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<UserField, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh map from violations in evaluation order.
    ///
    /// A later violation for the same field overwrites an earlier one.
    /// Violations without a field path are dropped.
    pub fn from_violations(violations: impl IntoIterator<Item = Violation>) -> Self {
        let mut map = BTreeMap::new();
        for violation in violations {
            if let Some(field) = violation.path {
                map.insert(field, violation.message);
            }
        }
        Self(map)
    }

    pub fn get(&self, field: UserField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn contains(&self, field: UserField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}
