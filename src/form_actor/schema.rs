//! Validation schema for the user detail form.
//!
//! A [`UserSchema`] is an ordered list of [`Rule`]s. Validation runs every rule
//! against the record, never stopping at the first failure, and reports the
//! failures in rule order. Field rules carry the field they belong to; record
//! rules carry no path.
//!
//! ```ignore
//! let schema = UserSchema::new()
//!     .rule(Rule::field(UserField::FirstName, required("First name is required")))
//!     .rule(Rule::record(|user| {
//!         if user.first_name == user.last_name {
//!             Err("Names must differ".into())
//!         } else {
//!             Ok(())
//!         }
//!     }));
//! ```

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{User, UserField};

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The field the failure belongs to, if any.
    pub path: Option<UserField>,
    pub message: String,
}

type Check = Box<dyn Fn(&User) -> Result<(), String> + Send + Sync>;

/// A single validation rule.
pub struct Rule {
    path: Option<UserField>,
    check: Check,
}

impl Rule {
    /// A rule applied to the value of one field.
    pub fn field(
        field: UserField,
        check: impl Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            path: Some(field),
            check: Box::new(move |user: &User| check(user.field(field))),
        }
    }

    /// A rule over the whole record. Its failures have no field path.
    #[allow(dead_code)]
    pub fn record(check: impl Fn(&User) -> Result<(), String> + Send + Sync + 'static) -> Self {
        Self {
            path: None,
            check: Box::new(check),
        }
    }

    fn apply(&self, user: &User) -> Option<Violation> {
        (self.check)(user).err().map(|message| Violation {
            path: self.path,
            message,
        })
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("path", &self.path).finish_non_exhaustive()
    }
}

/// Ordered set of rules checked on submit.
#[derive(Debug, Default)]
pub struct UserSchema {
    rules: Vec<Rule>,
}

impl UserSchema {
    /// An empty schema that accepts every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Rules run in the order they were added.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The rules of the user detail form.
    ///
    /// The email format rule comes before the required rule and skips empty
    /// values, so an empty email only reports "Email is required".
    pub fn user_detail() -> Self {
        Self::new()
            .rule(Rule::field(UserField::FirstName, required("First name is required")))
            .rule(Rule::field(UserField::LastName, required("Last name is required")))
            .rule(Rule::field(UserField::Email, email_format("Must be in email format")))
            .rule(Rule::field(UserField::Email, required("Email is required")))
    }

    /// Check every rule against `user`.
    ///
    /// # Errors
    /// Every violation, in rule order, if at least one rule failed.
    pub fn validate(&self, user: &User) -> Result<(), Vec<Violation>> {
        let violations: Vec<Violation> = self.rules.iter().filter_map(|rule| rule.apply(user)).collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Fails on the empty string. Whitespace counts as a value.
pub fn required(message: &'static str) -> impl Fn(&str) -> Result<(), String> + Send + Sync + 'static {
    move |value| {
        if value.is_empty() {
            Err(message.to_string())
        } else {
            Ok(())
        }
    }
}

/// Fails on a non-empty value that is not an email address.
pub fn email_format(message: &'static str) -> impl Fn(&str) -> Result<(), String> + Send + Sync + 'static {
    move |value| {
        if value.is_empty() || email_regex().is_match(value) {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // HTML living standard "valid email address" grammar.
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email regex should compile")
    })
}
