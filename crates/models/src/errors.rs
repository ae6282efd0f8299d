use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// One violated field constraint, keyed by the field's wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {}", join_fields(.0))]
    Validation(Vec<FieldError>),
}

impl ModelError {
    /// Every field violation carried by the error.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ModelError::Validation(fields) => fields,
        }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
