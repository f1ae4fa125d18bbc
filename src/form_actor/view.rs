use std::fmt;

use crate::domain::{User, UserField};

use super::ErrorMap;

/// Label of the submit control.
pub const SUBMIT_LABEL: &str = "Save";

/// One labeled text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFieldView {
    pub field: UserField,
    pub label: &'static str,
    pub value: String,
    pub error: bool,
    pub helper_text: Option<String>,
}

/// Render model of the user detail form: the three inputs and the submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub fields: Vec<TextFieldView>,
    pub submit_label: &'static str,
}

impl FormView {
    pub fn render(user: &User, errors: &ErrorMap) -> Self {
        let fields = UserField::ALL
            .into_iter()
            .map(|field| {
                let helper_text = errors.get(field).map(str::to_string);
                TextFieldView {
                    field,
                    label: field.label(),
                    value: user.field(field).to_string(),
                    error: helper_text.is_some(),
                    helper_text,
                }
            })
            .collect();

        Self {
            fields,
            submit_label: SUBMIT_LABEL,
        }
    }

    #[allow(dead_code)]
    pub fn field(&self, field: UserField) -> Option<&TextFieldView> {
        self.fields.iter().find(|f| f.field == field)
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for input in &self.fields {
            write!(f, "{:<10} [{}]", input.label, input.value)?;
            if let Some(helper) = &input.helper_text {
                write!(f, "  ! {helper}")?;
            }
            writeln!(f)?;
        }
        write!(f, "[ {} ]", self.submit_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_actor::Violation;

    #[test]
    fn renders_values_and_inline_errors() {
        let user = User::new("", "Doe", "a@b.com").with_id(1);
        let errors = ErrorMap::from_violations(vec![Violation {
            path: Some(UserField::FirstName),
            message: "First name is required".to_string(),
        }]);

        let view = FormView::render(&user, &errors);
        assert_eq!(view.fields.len(), 3);
        assert_eq!(view.submit_label, "Save");

        let first = view.field(UserField::FirstName).unwrap();
        assert_eq!(first.label, "First Name");
        assert!(first.error);
        assert_eq!(first.helper_text.as_deref(), Some("First name is required"));

        let email = view.field(UserField::Email).unwrap();
        assert_eq!(email.value, "a@b.com");
        assert!(!email.error);
        assert_eq!(email.helper_text, None);
    }

    #[test]
    fn display_lists_inputs_then_save() {
        let view = FormView::render(&User::new("Jane", "Doe", "jane@x.com"), &ErrorMap::new());
        let text = view.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("First Name") && lines[0].ends_with("[Jane]"));
        assert_eq!(lines[3], "[ Save ]");
    }
}
