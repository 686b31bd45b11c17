//! Generic form helpers: required-field validation and password toggles

use crate::{Error, Result};

/// How an input displays its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub required: bool,
    pub kind: InputKind,
    /// Set by validation; rendered as `is-invalid`
    pub invalid: bool,
}

impl Field {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            required: false,
            kind: InputKind::Text,
            invalid: false,
        }
    }

    pub fn password(name: impl Into<String>) -> Self {
        Self {
            kind: InputKind::Password,
            ..Self::text(name)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// The `type` attribute of the input element
    pub fn input_type(&self) -> &'static str {
        match self.kind {
            InputKind::Text => "text",
            InputKind::Password => "password",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<Field>,
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }
}

/// Check every required field in one pass.
///
/// Blank fields are marked invalid and fields that now have a value are
/// cleared, so a resubmission reflects the current input. Submission is
/// blocked if any field is blank.
pub fn validate_required(form: &mut Form) -> Result<()> {
    let mut missing = Vec::new();

    for field in form.fields.iter_mut().filter(|f| f.required) {
        field.invalid = field.value.trim().is_empty();
        if field.invalid {
            missing.push(field.name.clone());
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        tracing::debug!(fields = ?missing, "form submission blocked");
        Err(Error::Validation(format!(
            "required fields are empty: {}",
            missing.join(", ")
        )))
    }
}

/// Eye glyph shown on a password toggle button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Eye,
    EyeSlash,
}

impl Icon {
    pub fn css_class(&self) -> &'static str {
        match self {
            Icon::Eye => "bi-eye",
            Icon::EyeSlash => "bi-eye-slash",
        }
    }
}

/// Show/hide toggle for password inputs. Presentation only.
pub struct PasswordToggle;

impl PasswordToggle {
    /// Flip the field between masked and plain and return the glyph the
    /// toggle button should now show.
    pub fn toggle(field: &mut Field) -> Icon {
        match field.kind {
            InputKind::Password => {
                field.kind = InputKind::Text;
                Icon::EyeSlash
            }
            InputKind::Text => {
                field.kind = InputKind::Password;
                Icon::Eye
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_form(user: &str, pass: &str) -> Form {
        Form::new(vec![
            Field::text("username").required().with_value(user),
            Field::password("password").required().with_value(pass),
            Field::text("remember"),
        ])
    }

    #[test]
    fn test_valid_form_passes() {
        let mut form = login_form("alice", "secret");
        assert!(validate_required(&mut form).is_ok());
        assert!(form.fields.iter().all(|f| !f.invalid));
    }

    #[test]
    fn test_marks_every_blank_field() {
        let mut form = login_form("  ", "");
        let err = validate_required(&mut form).unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("username, password"));
        assert!(form.field("username").unwrap().invalid);
        assert!(form.field("password").unwrap().invalid);
        assert!(!form.field("remember").unwrap().invalid);
    }

    #[test]
    fn test_revalidation_clears_fixed_fields() {
        let mut form = login_form("", "secret");
        assert!(validate_required(&mut form).is_err());
        assert!(form.field("username").unwrap().invalid);

        form.field_mut("username").unwrap().value = "bob".to_string();
        assert!(validate_required(&mut form).is_ok());
        assert!(!form.field("username").unwrap().invalid);
    }

    #[test]
    fn test_password_toggle() {
        let mut field = Field::password("password");
        assert_eq!(field.input_type(), "password");

        assert_eq!(PasswordToggle::toggle(&mut field), Icon::EyeSlash);
        assert_eq!(field.input_type(), "text");

        assert_eq!(PasswordToggle::toggle(&mut field), Icon::Eye);
        assert_eq!(field.input_type(), "password");
        assert_eq!(Icon::Eye.css_class(), "bi-eye");
    }
}
