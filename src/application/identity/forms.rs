//! Submitted account forms and their field-level validation

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::UserRole;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";
pub const EMAIL_TAKEN: &str = "A user with that email already exists.";
pub const PASSWORD_MISMATCH: &str = "The two password fields didn't match.";

/// Per-field messages plus messages that belong to the form as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub fields: BTreeMap<String, Vec<String>>,
    pub general: Vec<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_empty()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_general(&mut self, message: impl Into<String>) {
        self.general.push(message.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Messages attached to `field`, empty when it is clean.
    pub fn field(&self, field: &str) -> Vec<String> {
        self.fields.get(field).cloned().unwrap_or_default()
    }

    pub fn general(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add_general(message);
        errors
    }

    /// Collect validator output. Blank fields report only [`REQUIRED`].
    fn from_validation(errors: &ValidationErrors, blank: &[&str]) -> Self {
        let mut out = Self::default();
        for field in blank {
            out.add(field, REQUIRED);
        }
        for (field, list) in errors.field_errors() {
            if blank.contains(&field.as_ref()) {
                continue;
            }
            for err in list {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.add(field.as_ref(), message);
            }
        }
        out
    }
}

fn blank_fields<'a>(fields: &[(&'a str, &str)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

fn error_with(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Letters, digits and `_ . -` only.
pub fn validate_username_chars(username: &str) -> Result<(), ValidationError> {
    let ok = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if ok {
        Ok(())
    } else {
        Err(error_with(
            "username_chars",
            "Username may contain only letters, numbers, and _ . - characters.",
        ))
    }
}

pub fn validate_role(role: &str) -> Result<(), ValidationError> {
    match UserRole::parse(role) {
        Some(_) => Ok(()),
        None => Err(error_with(
            "role_choice",
            "Select a valid choice. That choice is not one of the available choices.",
        )),
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn check(&self) -> FormErrors {
        let blank = blank_fields(&[("username", &self.username), ("password", &self.password)]);
        match self.validate() {
            Ok(()) if blank.is_empty() => FormErrors::default(),
            Ok(()) => FormErrors::from_validation(&ValidationErrors::new(), &blank),
            Err(e) => FormErrors::from_validation(&e, &blank),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(
        length(max = 150, message = "Ensure this value has at most 150 characters."),
        custom(function = "validate_username_chars")
    )]
    pub username: String,
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
    #[serde(default)]
    #[validate(custom(function = "validate_role"))]
    pub role: String,
}

impl RegisterForm {
    /// Trim the username; trim and lowercase the email address.
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self
    }

    /// Field-level checks that need no store access.
    pub fn check(&self) -> FormErrors {
        let blank = blank_fields(&[
            ("username", &self.username),
            ("email", &self.email),
            ("password1", &self.password1),
            ("password2", &self.password2),
            ("role", &self.role),
        ]);
        let mut errors = match self.validate() {
            Ok(()) => FormErrors::from_validation(&ValidationErrors::new(), &blank),
            Err(e) => FormErrors::from_validation(&e, &blank),
        };

        if !errors.has("password1")
            && !errors.has("password2")
            && self.password1 != self.password2
        {
            errors.add("password2", PASSWORD_MISMATCH);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, email: &str, p1: &str, p2: &str, role: &str) -> RegisterForm {
        RegisterForm {
            username: username.into(),
            email: email.into(),
            password1: p1.into(),
            password2: p2.into(),
            role: role.into(),
        }
    }

    #[test]
    fn blank_login_fields_are_required() {
        let errors = LoginForm::default().check();
        assert_eq!(errors.field("username"), vec![REQUIRED]);
        assert_eq!(errors.field("password"), vec![REQUIRED]);

        let ok = LoginForm {
            username: "ann".into(),
            password: "pw".into(),
        };
        assert!(ok.check().is_empty());
    }

    #[test]
    fn username_characters_are_restricted() {
        for good in ["ann", "ann.smith", "a_b-c", "A1"] {
            assert!(validate_username_chars(good).is_ok(), "{}", good);
        }
        for bad in ["ann smith", "ann@x", "ännie", "a/b", "a+b"] {
            assert!(validate_username_chars(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn register_reports_each_bad_field() {
        let form = register("bad name!", "not-an-email", "Secret123!", "Secret123!", "boss");
        let errors = form.check();
        assert!(errors.has("username"));
        assert!(errors.has("email"));
        assert!(errors.has("role"));
        assert!(!errors.has("password2"));
    }

    #[test]
    fn register_blank_fields_only_say_required() {
        let errors = register("", "", "", "", "").check();
        for field in ["username", "email", "password1", "password2", "role"] {
            assert_eq!(errors.field(field), vec![REQUIRED], "{}", field);
        }
    }

    #[test]
    fn register_password_mismatch() {
        let form = register("ann", "ann@example.com", "Secret123!", "Secret124!", "vendor");
        let errors = form.check();
        assert_eq!(errors.field("password2"), vec![PASSWORD_MISMATCH]);
    }

    #[test]
    fn register_long_username_rejected() {
        let long = "a".repeat(151);
        let form = register(&long, "ann@example.com", "Secret123!", "Secret123!", "vendor");
        assert!(form.check().has("username"));

        let max = "a".repeat(150);
        let form = register(&max, "ann@example.com", "Secret123!", "Secret123!", "vendor");
        assert!(!form.check().has("username"));
    }

    #[test]
    fn email_is_normalized() {
        let form = register(" ann ", "  Ann@Example.COM ", "x", "x", "vendor").normalized();
        assert_eq!(form.username, "ann");
        assert_eq!(form.email, "ann@example.com");
        assert!(!form.check().has("email"));
    }
}
