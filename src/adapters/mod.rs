//! Solver adapters implementing the ports over concrete backends.

mod simplex_lp;
mod slp;

pub use simplex_lp::SimplexLpSolver;
pub use slp::{SlpOptions, SlpSolver};
