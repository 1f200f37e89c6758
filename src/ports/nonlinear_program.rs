//! Nonlinear-program solver port.
//!
//! The bounded-rationality model has linear constraints but a power-law
//! objective. This port describes exactly that class: an arbitrary smooth
//! objective callback over linearly-constrained, box-bounded variables.
//! The trait is minimize-only; callers negate the objective to maximize.

use super::linear_program::{LinearConstraint, SolverFailure, VariableBounds};

/// Objective callback. Must be defined on the whole feasible box.
pub type Objective = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// A nonlinear minimization problem with linear constraints.
pub struct NonlinearProgram {
    pub objective: Objective,
    pub initial_point: Vec<f64>,
    pub constraints: Vec<LinearConstraint>,
    pub bounds: Vec<VariableBounds>,
}

impl std::fmt::Debug for NonlinearProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonlinearProgram")
            .field("variables", &self.initial_point.len())
            .field("constraints", &self.constraints.len())
            .finish()
    }
}

/// Local minimizer and its objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct NlpSolution {
    pub variables: Vec<f64>,
    pub objective_value: f64,
}

/// Backend-agnostic NLP minimization capability.
///
/// A local optimum is an acceptable answer; implementations are expected
/// to be deterministic for a given problem.
pub trait NonlinearProgramSolver: Send + Sync {
    fn minimize(&self, program: &NonlinearProgram) -> Result<NlpSolution, SolverFailure>;
}
