//! Peerlens - Peer-Efficiency Evaluation Engine
//!
//! This crate ranks peer Decision Making Units (DMUs) by relative efficiency
//! using Data Envelopment Analysis extended with bounded-rationality
//! cross-evaluation (Prospect-Theory scoring) and a 2-additive
//! Choquet-integral aggregation with fairness-satisfaction bisection.

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-export the primary public API at crate root.
pub use adapters::{SimplexLpSolver, SlpSolver};
pub use domain::evaluation::{ChoquetEvaluator, CompositeEvaluator, DmuResult};
pub use domain::foundation::{
    DataMatrix, EvaluationError, OptimizationFailure, PerformanceCategory, ValidationError,
};
