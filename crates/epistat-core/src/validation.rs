//! Precondition guards run before any calculator logic.
//!
//! Guards collect every failing field rather than stopping at the first,
//! so a caller can report all problems at once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculators::CalculatorInput;
use crate::table::ContingencyTable;

/// Lowest accepted confidence level, in percent.
pub const MIN_CONFIDENCE: f64 = 80.0;
/// Highest accepted confidence level, in percent.
pub const MAX_CONFIDENCE: f64 = 99.9;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// One or more fields failed validation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("invalid input: {}", summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of a guard: `Ok(())` or every field-level failure.
pub type ValidationOutcome = Result<(), ValidationErrors>;

fn into_outcome(errors: Vec<FieldError>) -> ValidationOutcome {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}

fn check_count(field: &str, value: f64, errors: &mut Vec<FieldError>) {
    if !value.is_finite() {
        errors.push(FieldError::new(field, "must be a finite number"));
    } else if value < 0.0 {
        errors.push(FieldError::new(
            field,
            format!("must be at least 0 (got {value})"),
        ));
    }
}

fn check_confidence(field: &str, value: f64, errors: &mut Vec<FieldError>) {
    if !value.is_finite() {
        errors.push(FieldError::new(field, "must be a finite number"));
    } else if !(MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&value) {
        errors.push(FieldError::new(
            field,
            format!("must be between {MIN_CONFIDENCE} and {MAX_CONFIDENCE} (got {value})"),
        ));
    }
}

/// All four cells must be finite and non-negative.
pub fn validate_table(table: &ContingencyTable) -> ValidationOutcome {
    let mut errors = Vec::new();
    for (field, value) in ["a", "b", "c", "d"].into_iter().zip(table.cells()) {
        check_count(field, value, &mut errors);
    }
    into_outcome(errors)
}

/// Confidence level must lie in [80, 99.9] percent.
pub fn validate_confidence(confidence: f64) -> ValidationOutcome {
    let mut errors = Vec::new();
    check_confidence("confidence", confidence, &mut errors);
    into_outcome(errors)
}

/// Run every guard that applies to `input`.
pub fn validate(input: &CalculatorInput) -> ValidationOutcome {
    let mut errors = match validate_table(&input.table()) {
        Ok(()) => Vec::new(),
        Err(e) => e.errors,
    };
    if let Some(confidence) = input.confidence() {
        check_confidence("confidence", confidence, &mut errors);
    }
    into_outcome(errors)
}
