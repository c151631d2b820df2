//! Form validation for the storefront's registration, login and contact forms.
//!
//! Every field is checked and every failure reported, so a form can mark all
//! bad inputs at once.

use crate::email::Email;
use crate::error::{FieldError, FieldProblem, ValidationError};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Contact form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Accumulates field problems for one form.
#[derive(Debug, Default)]
struct Checker {
    fields: Vec<FieldError>,
}

impl Checker {
    fn reject(&mut self, field: &'static str, problem: FieldProblem) {
        self.fields.push(FieldError { field, problem });
    }

    fn required(&mut self, field: &'static str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.reject(field, FieldProblem::Required);
            return false;
        }
        true
    }

    fn email(&mut self, field: &'static str, value: &str) -> Option<Email> {
        if !self.required(field, value) {
            return None;
        }
        match Email::parse(value) {
            Ok(email) => Some(email),
            Err(_) => {
                self.reject(field, FieldProblem::InvalidEmail);
                None
            }
        }
    }

    fn password(&mut self, field: &'static str, value: &str, min: usize) {
        if !self.required(field, value) {
            return;
        }
        if value.chars().count() < min {
            self.reject(field, FieldProblem::PasswordTooShort { min });
        }
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(value) if self.fields.is_empty() => Ok(value),
            _ => Err(ValidationError {
                fields: self.fields,
            }),
        }
    }
}

/// Validate a registration form, returning the parsed email.
pub fn validate_registration(
    form: &RegistrationForm,
    min_password_length: usize,
) -> Result<Email, ValidationError> {
    let mut checker = Checker::default();
    checker.required("username", &form.username);
    let email = checker.email("email", &form.email);
    checker.password("password", &form.password, min_password_length);
    checker.finish(email)
}

/// Validate a login form, returning the parsed email.
pub fn validate_login(
    form: &LoginForm,
    min_password_length: usize,
) -> Result<Email, ValidationError> {
    let mut checker = Checker::default();
    let email = checker.email("email", &form.email);
    checker.password("password", &form.password, min_password_length);
    checker.finish(email)
}

/// Validate a contact form.
pub fn validate_contact(form: &ContactForm) -> Result<Email, ValidationError> {
    let mut checker = Checker::default();
    checker.required("name", &form.name);
    let email = checker.email("email", &form.email);
    checker.required("message", &form.message);
    checker.finish(email)
}

/// Validate a newsletter signup address.
pub fn validate_newsletter(email: &str) -> Result<Email, ValidationError> {
    let mut checker = Checker::default();
    let email = checker.email("email", email);
    checker.finish(email)
}
