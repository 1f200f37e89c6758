//! Bounded-rationality cross-efficiency model.
//!
//! Evaluator k rates peer j against an aspiration level `theta_limit`.
//! Deviation variables measure how far j sits from that aspiration under
//! k's weights, and the prospect value of those deviations is minimized:
//! gains are discounted concavely, losses amplified by loss aversion.
//!
//! Variable layout: `[v_1..v_m, u_1..u_s, dx, dy]`.

use serde::{Deserialize, Serialize};

use super::ccr::frontier_row;
use super::prospect::ProspectParams;
use crate::domain::foundation::DataMatrix;
use crate::ports::{
    LinearConstraint, NonlinearProgram, NonlinearProgramSolver, SolverFailure, VariableBounds,
};

/// Whether the peer's aspiration sits below (gain) or above (loss) its
/// own self-efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviationMode {
    /// Aspiration is attainable: deviations are surpluses.
    Gain,
    /// Aspiration exceeds self-efficiency: deviations are shortfalls.
    Loss,
}

/// Bounded-rationality model over a pluggable NLP backend.
pub struct BoundedRationalitySolver<'a> {
    nlp: &'a dyn NonlinearProgramSolver,
    params: ProspectParams,
    epsilon: f64,
}

impl<'a> BoundedRationalitySolver<'a> {
    pub fn new(nlp: &'a dyn NonlinearProgramSolver, params: ProspectParams, epsilon: f64) -> Self {
        Self {
            nlp,
            params,
            epsilon,
        }
    }

    /// Scores peer `j` from evaluator `k`'s perspective.
    ///
    /// `theta_kk` is k's own CCR efficiency (anchoring k on its frontier
    /// position); `theta_limit` is j's aspiration level. Failure is soft:
    /// the caller substitutes a fallback score.
    pub fn solve(
        &self,
        inputs: &DataMatrix,
        outputs: &DataMatrix,
        k: usize,
        j: usize,
        theta_limit: f64,
        theta_kk: f64,
        mode: DeviationMode,
    ) -> Result<f64, SolverFailure> {
        let m = inputs.cols();
        let s = outputs.cols();
        let n = inputs.rows();
        let dx = m + s;
        let dy = m + s + 1;
        let total = m + s + 2;

        let mut constraints = Vec::with_capacity(n + 2);

        // Anchor: evaluator k keeps its own efficiency, u·Y_k = theta_kk · v·X_k.
        let mut anchor = vec![0.0; total];
        for (i, x) in inputs.row(k).iter().enumerate() {
            anchor[i] = -theta_kk * x;
        }
        for (r, y) in outputs.row(k).iter().enumerate() {
            anchor[m + r] = *y;
        }
        constraints.push(LinearConstraint::equality(anchor, 0.0));

        // Peer target: j's score deviates from the aspiration by (dx, dy).
        // Gain:  u·Y_j - theta_L·v·X_j - dy - theta_L·dx = 0
        // Loss:  u·Y_j - theta_L·v·X_j + dy + theta_L·dx = 0
        let mut target = vec![0.0; total];
        for (i, x) in inputs.row(j).iter().enumerate() {
            target[i] = -theta_limit * x;
        }
        for (r, y) in outputs.row(j).iter().enumerate() {
            target[m + r] = *y;
        }
        match mode {
            DeviationMode::Gain => {
                target[dx] = -theta_limit;
                target[dy] = -1.0;
            }
            DeviationMode::Loss => {
                target[dx] = theta_limit;
                target[dy] = 1.0;
            }
        }
        constraints.push(LinearConstraint::equality(target, 0.0));

        for t in 0..n {
            let mut row = frontier_row(inputs, outputs, t);
            row.resize(total, 0.0);
            constraints.push(LinearConstraint::less_equal(row, 0.0));
        }

        let mut bounds = vec![VariableBounds::at_least(self.epsilon); m + s];
        bounds.push(VariableBounds::non_negative()); // dx
        bounds.push(VariableBounds::non_negative()); // dy

        let mut initial_point = Vec::with_capacity(total);
        initial_point.extend(std::iter::repeat(1.0 / m as f64).take(m));
        initial_point.extend(std::iter::repeat(1.0 / s as f64).take(s));
        initial_point.push(0.0);
        initial_point.push(0.0);

        let params = self.params;
        let objective: Box<dyn Fn(&[f64]) -> f64 + Send + Sync> = match mode {
            DeviationMode::Gain => Box::new(move |x: &[f64]| params.gain_value(x[dy], x[dx])),
            DeviationMode::Loss => Box::new(move |x: &[f64]| params.loss_value(x[dy], x[dx])),
        };

        let program = NonlinearProgram {
            objective,
            initial_point,
            constraints,
            bounds,
        };

        let solution = self.nlp.minimize(&program)?;
        let (v, rest) = solution.variables.split_at(m);
        let u = &rest[..s];

        let denominator: f64 = v.iter().zip(inputs.row(j)).map(|(v, x)| v * x).sum();
        if denominator == 0.0 {
            return Ok(0.0);
        }
        let numerator: f64 = u.iter().zip(outputs.row(j)).map(|(u, y)| u * y).sum();
        Ok(numerator / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{SimplexLpSolver, SlpSolver};

    fn matrices() -> (DataMatrix, DataMatrix) {
        (
            DataMatrix::try_new("input", vec![vec![1.0], vec![1.0]]).unwrap(),
            DataMatrix::try_new("output", vec![vec![1.0], vec![0.5]]).unwrap(),
        )
    }

    // Single input, single output, equal inputs: the anchor equality pins
    // u/v, so peer scores are determined regardless of the deviation split.
    #[test]
    fn gain_mode_score_is_pinned_by_anchor() {
        let (inputs, outputs) = matrices();
        let nlp = SlpSolver::new(SimplexLpSolver::new());
        let solver = BoundedRationalitySolver::new(&nlp, ProspectParams::default(), 1e-6);
        let score = solver
            .solve(&inputs, &outputs, 0, 1, 0.4, 1.0, DeviationMode::Gain)
            .unwrap();
        assert!((score - 0.5).abs() < 0.02, "score {}", score);
    }

    #[test]
    fn loss_mode_score_is_pinned_by_anchor() {
        let (inputs, outputs) = matrices();
        let nlp = SlpSolver::new(SimplexLpSolver::new());
        let solver = BoundedRationalitySolver::new(&nlp, ProspectParams::default(), 1e-6);
        let score = solver
            .solve(&inputs, &outputs, 0, 1, 0.8, 1.0, DeviationMode::Loss)
            .unwrap();
        assert!((score - 0.5).abs() < 0.02, "score {}", score);
    }

    #[test]
    fn scores_stay_below_self_efficiency_frontier() {
        let inputs =
            DataMatrix::try_new("input", vec![vec![2.0, 1.0], vec![1.0, 2.0], vec![2.0, 2.0]])
                .unwrap();
        let outputs =
            DataMatrix::try_new("output", vec![vec![3.0], vec![3.0], vec![2.0]]).unwrap();
        let nlp = SlpSolver::new(SimplexLpSolver::new());
        let solver = BoundedRationalitySolver::new(&nlp, ProspectParams::default(), 1e-6);
        let score = solver
            .solve(&inputs, &outputs, 0, 2, 0.7, 1.0, DeviationMode::Gain)
            .unwrap();
        // Frontier rows cap every cross score at 1.
        assert!(score <= 1.0 + 1e-6, "score {}", score);
        assert!(score >= 0.0);
    }
}
