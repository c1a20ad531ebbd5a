//! Engine error types.

use thiserror::Error;

/// Malformed, missing or out-of-range input field.
///
/// The `field` is a dotted path into the input document, for example
/// `battery_usage_log[2].soc_end`.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    Missing { field: String },

    #[error("field `{field}` is out of range: {value} violates {constraint}")]
    OutOfRange { field: String, value: f64, constraint: String },

    #[error("field `{field}` is invalid: {reason}")]
    Invalid { field: String, reason: String },

    #[error("failed to decode the snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, value: f64, constraint: impl Into<String>) -> Self {
        Self::OutOfRange { field: field.into(), value, constraint: constraint.into() }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid { field: field.into(), reason: reason.into() }
    }

    /// Name of the offending field, if the error is about a single field.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Missing { field } | Self::OutOfRange { field, .. } | Self::Invalid { field, .. } => {
                Some(field)
            }
            Self::Decode(_) => None,
        }
    }
}

/// Degenerate pack configuration: the baseline capacity cannot be divided by.
#[derive(Debug, Error)]
#[error("baseline capacity must be positive, got {baseline} kWh")]
pub struct DivisionError {
    pub baseline: f64,
}

/// Report assembler argument-shape violation.
#[derive(Debug, Error)]
#[error("invalid report argument `{argument}`: {reason}")]
pub struct ReportError {
    pub argument: &'static str,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Division(#[from] DivisionError),

    #[error(transparent)]
    Report(#[from] ReportError),
}
