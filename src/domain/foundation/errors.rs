//! Error types for the evaluation domain.

use thiserror::Error;

/// Errors raised by upfront data validation, before any solve begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("at least one DMU is required")]
    NoDmus,

    #[error("the {matrix} matrix has {actual} rows but {expected} DMU identifiers were given")]
    RowCountMismatch {
        matrix: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("row {row} of the {matrix} matrix has {actual} columns, expected {expected}")]
    RaggedRow {
        matrix: &'static str,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("the {matrix} matrix must have at least one column")]
    EmptyRow { matrix: &'static str },

    #[error("duplicate DMU identifier '{id}'")]
    DuplicateId { id: String },

    #[error("parameter '{field}' must be within [{min}, {max}], got {actual}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        actual: f64,
    },
}

impl ValidationError {
    /// Creates an out-of-range parameter error.
    pub fn out_of_range(field: &'static str, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field,
            min,
            max,
            actual,
        }
    }
}

/// Fatal failure of a self-efficiency linear program.
///
/// Should not occur for valid, epsilon-bounded inputs; when it does, the
/// whole evaluation aborts and the solver diagnostic is surfaced.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("CCR optimization failed for DMU {dmu_index}: {message}")]
pub struct OptimizationFailure {
    pub dmu_index: usize,
    pub message: String,
}

impl OptimizationFailure {
    /// Creates an optimization failure carrying the solver diagnostic.
    pub fn new(dmu_index: usize, message: impl Into<String>) -> Self {
        Self {
            dmu_index,
            message: message.into(),
        }
    }
}

/// Top-level error for the evaluation entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Optimization(#[from] OptimizationFailure),
}
