//! Foundation value objects shared across the evaluation pipeline.

mod category;
mod errors;
mod matrix;

pub use category::PerformanceCategory;
pub use errors::{EvaluationError, OptimizationFailure, ValidationError};
pub use matrix::{CriterionPair, DataMatrix, InteractionMatrix};
