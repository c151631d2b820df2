//! Error types for Brewcart Core.

use std::fmt;

use thiserror::Error;

/// Core errors that can occur while building users and digests.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("password digest failed: {0}")]
    Digest(String),

    #[error("invalid digest parameters: {0}")]
    DigestParams(String),
}

/// Why a single form field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    /// Required field was empty after trimming.
    Required,
    /// Value is not a usable email address.
    InvalidEmail,
    /// Password shorter than the minimum length.
    PasswordTooShort { min: usize },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Required => write!(f, "This field is required"),
            FieldProblem::InvalidEmail => write!(f, "Please enter a valid email address"),
            FieldProblem::PasswordTooShort { min } => {
                write!(f, "Password must be at least {} characters", min)
            }
        }
    }
}

/// A rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field name as the form knows it (e.g. `"email"`).
    pub field: &'static str,
    pub problem: FieldProblem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Form validation failure, carrying every rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid form: {}", render_fields(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    /// Check whether a particular field was rejected.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }

    /// The problem reported for a field, if any.
    pub fn problem(&self, field: &str) -> Option<FieldProblem> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.problem)
    }
}

fn render_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
