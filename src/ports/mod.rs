//! Solver ports: trait contracts between the domain and optimization backends.

mod linear_program;
mod nonlinear_program;

pub use linear_program::{
    Direction, LinearConstraint, LinearProgram, LinearProgramSolver, LpSolution, Relation,
    SolverFailure, VariableBounds,
};
pub use nonlinear_program::{NlpSolution, NonlinearProgram, NonlinearProgramSolver, Objective};
