//! Calculator error types.
//!
//! Numeric singularities are never errors here: they are absorbed by the
//! calculators and rendered as sentinel values. These variants cover input
//! that must be rejected before any computation runs.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors that can occur when selecting or running a calculator.
#[derive(Debug, Error)]
pub enum CalcError {
    /// The input failed one or more precondition guards.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// No calculator is registered under the given identifier.
    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),
}

impl CalcError {
    /// Returns the field-level messages, if this is a validation failure.
    pub fn field_errors(&self) -> &[crate::validation::FieldError] {
        match self {
            CalcError::Validation(v) => &v.errors,
            CalcError::UnknownCalculator(_) => &[],
        }
    }
}
