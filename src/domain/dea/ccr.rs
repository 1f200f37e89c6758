//! Input-oriented CCR self-efficiency model.
//!
//! For DMU k: maximize `u · Y_k` subject to `v · X_k = 1` and frontier rows
//! `u · Y_t - v · X_t <= 0` for every DMU t, with all weights bounded below
//! by the non-Archimedean epsilon.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DataMatrix, OptimizationFailure};
use crate::ports::{
    Direction, LinearConstraint, LinearProgram, LinearProgramSolver, VariableBounds,
};

/// Non-Archimedean lower bound on multiplier weights.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Optimal multiplier weights from a CCR solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcrWeights {
    pub input: Vec<f64>,
    pub output: Vec<f64>,
}

impl CcrWeights {
    /// Cross-efficiency of DMU `j` under these weights; 0.0 when the
    /// weighted input vanishes.
    pub fn score(&self, inputs: &DataMatrix, outputs: &DataMatrix, j: usize) -> f64 {
        let denominator: f64 = self
            .input
            .iter()
            .zip(inputs.row(j))
            .map(|(v, x)| v * x)
            .sum();
        if denominator == 0.0 {
            return 0.0;
        }
        let numerator: f64 = self
            .output
            .iter()
            .zip(outputs.row(j))
            .map(|(u, y)| u * y)
            .sum();
        numerator / denominator
    }
}

/// Self-efficiency and the weights that achieve it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcrScore {
    pub efficiency: f64,
    pub weights: CcrWeights,
}

/// CCR model over a pluggable LP backend.
pub struct CcrSolver<'a> {
    solver: &'a dyn LinearProgramSolver,
    epsilon: f64,
}

impl<'a> CcrSolver<'a> {
    pub fn new(solver: &'a dyn LinearProgramSolver) -> Self {
        Self {
            solver,
            epsilon: DEFAULT_EPSILON,
        }
    }

    pub fn with_epsilon(solver: &'a dyn LinearProgramSolver, epsilon: f64) -> Self {
        Self { solver, epsilon }
    }

    /// Solves the self-efficiency LP for DMU `k`.
    ///
    /// Efficiencies in `(1, 1 + 1e-5]` are numerical overshoot and clamp
    /// to exactly 1.0. Infeasible or unbounded programs are fatal.
    pub fn solve(
        &self,
        inputs: &DataMatrix,
        outputs: &DataMatrix,
        k: usize,
    ) -> Result<CcrScore, OptimizationFailure> {
        let m = inputs.cols();
        let s = outputs.cols();
        let n = inputs.rows();

        // Variables: [v_1..v_m, u_1..u_s].
        let mut objective = vec![0.0; m + s];
        objective[m..].copy_from_slice(outputs.row(k));

        let mut normalization = vec![0.0; m + s];
        normalization[..m].copy_from_slice(inputs.row(k));

        let mut constraints = vec![LinearConstraint::equality(normalization, 1.0)];
        for t in 0..n {
            constraints.push(LinearConstraint::less_equal(frontier_row(inputs, outputs, t), 0.0));
        }

        let program = LinearProgram {
            direction: Direction::Maximize,
            objective,
            constraints,
            bounds: vec![VariableBounds::at_least(self.epsilon); m + s],
        };

        let solution = self
            .solver
            .solve(&program)
            .map_err(|failure| OptimizationFailure::new(k, failure.to_string()))?;

        let mut efficiency = solution.objective_value;
        if efficiency > 1.0 && efficiency <= 1.0 + 1e-5 {
            efficiency = 1.0;
        }
        let (input, output) = solution.variables.split_at(m);
        Ok(CcrScore {
            efficiency,
            weights: CcrWeights {
                input: input.to_vec(),
                output: output.to_vec(),
            },
        })
    }
}

/// Frontier row for DMU `t`: `-v · X_t + u · Y_t`.
pub(crate) fn frontier_row(inputs: &DataMatrix, outputs: &DataMatrix, t: usize) -> Vec<f64> {
    let mut row = Vec::with_capacity(inputs.cols() + outputs.cols());
    row.extend(inputs.row(t).iter().map(|x| -x));
    row.extend_from_slice(outputs.row(t));
    row
}
