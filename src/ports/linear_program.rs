//! Linear-program solver port.
//!
//! The domain builds its LPs as plain data (`LinearProgram`) and submits
//! them through the `LinearProgramSolver` trait, keeping the optimization
//! backend swappable and the pipeline testable against small hand-solved
//! problems.

use thiserror::Error;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Minimize,
    Maximize,
}

/// Constraint relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Equal,
    LessOrEqual,
    GreaterOrEqual,
}

/// A single linear constraint `coefficients · x <relation> rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub coefficients: Vec<f64>,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn equality(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            relation: Relation::Equal,
            rhs,
        }
    }

    pub fn less_equal(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            relation: Relation::LessOrEqual,
            rhs,
        }
    }

    pub fn greater_equal(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            relation: Relation::GreaterOrEqual,
            rhs,
        }
    }
}

/// Box bounds for one variable; infinities mark an unbounded side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableBounds {
    pub lower: f64,
    pub upper: f64,
}

impl VariableBounds {
    pub fn between(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn at_least(lower: f64) -> Self {
        Self {
            lower,
            upper: f64::INFINITY,
        }
    }

    pub fn non_negative() -> Self {
        Self::at_least(0.0)
    }

    pub fn free() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }
}

/// A complete linear program over `bounds.len()` variables.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    pub direction: Direction,
    pub objective: Vec<f64>,
    pub constraints: Vec<LinearConstraint>,
    pub bounds: Vec<VariableBounds>,
}

/// Optimal point and objective value of a solved program.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    pub variables: Vec<f64>,
    pub objective_value: f64,
}

/// Why a solve did not produce an optimum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverFailure {
    #[error("problem is infeasible: {0}")]
    Infeasible(String),

    #[error("problem is unbounded: {0}")]
    Unbounded(String),

    #[error("numerical failure: {0}")]
    Numerical(String),
}

/// Backend-agnostic LP solving capability.
pub trait LinearProgramSolver: Send + Sync {
    fn solve(&self, program: &LinearProgram) -> Result<LpSolution, SolverFailure>;
}
