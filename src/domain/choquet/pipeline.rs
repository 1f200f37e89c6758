//! Four-stage Choquet evaluation pipeline.
//!
//! 1. estimate advisory pairwise interactions from the data;
//! 2. solve each DMU's 2-additive Choquet self-efficiency LP;
//! 3. bracket every (evaluator, peer) pair with ideal and non-ideal
//!    target LPs;
//! 4. bisect for the highest common satisfaction level alpha and score
//!    each DMU by its alpha-blended bracket means.
//!
//! Each stage consumes the previous stage's immutable snapshot; solver
//! failures degrade the affected records without aborting the run.

use serde::{Deserialize, Serialize};

use super::interactions::{efficiency_proxy, estimate_interactions};
use super::model::{ChoquetModel, ChoquetScore};
use crate::domain::foundation::{DataMatrix, InteractionMatrix, ValidationError};
use crate::ports::{Direction, LinearProgramSolver};

/// Pipeline tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChoquetParams {
    /// Shapley importance-balance ratio, in (0, 1].
    pub rho: f64,
    /// Bisection iterations for the satisfaction level.
    pub bisection_steps: usize,
    /// Bracket widths below this are treated as degenerate and skipped
    /// when building satisfaction floors.
    pub degenerate_range: f64,
}

impl Default for ChoquetParams {
    fn default() -> Self {
        Self {
            rho: 0.5,
            bisection_steps: 12,
            degenerate_range: 1e-6,
        }
    }
}

impl ChoquetParams {
    pub fn try_new(rho: f64, bisection_steps: usize) -> Result<Self, ValidationError> {
        if !(rho > 0.0 && rho <= 1.0) {
            return Err(ValidationError::out_of_range("rho", 0.0, 1.0, rho));
        }
        Ok(Self {
            rho,
            bisection_steps,
            ..Self::default()
        })
    }
}

/// Complete pipeline output across all DMUs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoquetEvaluation {
    /// Stage-2 records, one per DMU (degraded records are zero-valued).
    pub self_efficiencies: Vec<ChoquetScore>,
    /// Advisory interaction estimates among input criteria.
    pub input_interactions: InteractionMatrix,
    /// Advisory interaction estimates among output criteria.
    pub output_interactions: InteractionMatrix,
    /// `ideal[i][j]`: best Choquet efficiency peer j can reach while i
    /// keeps its stage-2 optimum.
    pub ideal: Vec<Vec<f64>>,
    /// `non_ideal[i][j]`: worst such efficiency.
    pub non_ideal: Vec<Vec<f64>>,
    /// Satisfaction level alpha per evaluator DMU.
    pub satisfaction: Vec<f64>,
    /// Final per-DMU scores.
    pub scores: Vec<f64>,
}

/// Runs the four stages over column-normalized data.
pub struct ChoquetPipeline<'a> {
    lp: &'a dyn LinearProgramSolver,
    params: ChoquetParams,
}

impl<'a> ChoquetPipeline<'a> {
    pub fn new(lp: &'a dyn LinearProgramSolver, params: ChoquetParams) -> Self {
        Self { lp, params }
    }

    pub fn run(&self, inputs: &DataMatrix, outputs: &DataMatrix) -> ChoquetEvaluation {
        let n = inputs.rows();
        let model = ChoquetModel::new(self.lp, self.params.rho);

        // Stage 1: advisory interaction estimates.
        let proxy = efficiency_proxy(inputs, outputs, None);
        let input_interactions = estimate_interactions(inputs, &proxy);
        let output_interactions = estimate_interactions(outputs, &proxy);

        // Stage 2: self-efficiencies.
        let self_efficiencies: Vec<ChoquetScore> = (0..n)
            .map(|i| match model.self_efficiency(inputs, outputs, i) {
                Ok(score) => score,
                Err(failure) => {
                    tracing::warn!(
                        dmu = i,
                        error = %failure,
                        "Choquet self-efficiency solve failed, recording zeros"
                    );
                    ChoquetScore::degraded(inputs.cols(), outputs.cols())
                }
            })
            .collect();

        // Stage 3: ideal / non-ideal brackets.
        let mut ideal = vec![vec![0.0; n]; n];
        let mut non_ideal = vec![vec![0.0; n]; n];
        for i in 0..n {
            let e_i = self_efficiencies[i].efficiency;
            for j in 0..n {
                ideal[i][j] = self.bound_or_fallback(
                    &model, inputs, outputs, i, j, e_i, Direction::Maximize,
                );
                non_ideal[i][j] = self.bound_or_fallback(
                    &model, inputs, outputs, i, j, e_i, Direction::Minimize,
                );
            }
        }

        // Stage 4: satisfaction bisection and final scores.
        let mut satisfaction = Vec::with_capacity(n);
        let mut scores = Vec::with_capacity(n);
        for i in 0..n {
            let e_i = self_efficiencies[i].efficiency;
            let ideal_row = &ideal[i];
            let non_ideal_row = &non_ideal[i];
            let feasible = |alpha: f64| {
                let floors: Vec<(usize, f64)> = (0..n)
                    .filter(|j| {
                        (ideal_row[*j] - non_ideal_row[*j]).abs() > self.params.degenerate_range
                    })
                    .map(|j| (j, non_ideal_row[j] + alpha * (ideal_row[j] - non_ideal_row[j])))
                    .collect();
                model.satisfaction_feasible(inputs, outputs, i, e_i, &floors)
            };
            let alpha = bisect_satisfaction(feasible, self.params.bisection_steps);
            satisfaction.push(alpha);

            let score = (0..n)
                .map(|j| non_ideal_row[j] + alpha * (ideal_row[j] - non_ideal_row[j]))
                .sum::<f64>()
                / n as f64;
            scores.push(score);
        }

        ChoquetEvaluation {
            self_efficiencies,
            input_interactions,
            output_interactions,
            ideal,
            non_ideal,
            satisfaction,
            scores,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn bound_or_fallback(
        &self,
        model: &ChoquetModel,
        inputs: &DataMatrix,
        outputs: &DataMatrix,
        i: usize,
        j: usize,
        e_i: f64,
        direction: Direction,
    ) -> f64 {
        match model.target_bound(inputs, outputs, i, j, e_i, direction) {
            Ok(bound) => bound,
            Err(failure) => {
                tracing::warn!(
                    evaluator = i,
                    peer = j,
                    error = %failure,
                    "target-bound solve failed, using evaluator efficiency"
                );
                e_i
            }
        }
    }
}

/// Largest alpha in [0, 1] keeping `feasible` true, to bisection precision.
/// Assumes feasibility is monotone decreasing in alpha.
fn bisect_satisfaction(feasible: impl Fn(f64) -> bool, steps: usize) -> f64 {
    if feasible(1.0) {
        return 1.0;
    }
    if !feasible(0.0) {
        return 0.0;
    }
    let mut lo = 0.0;
    let mut hi = 1.0;
    for _ in 0..steps {
        let mid = 0.5 * (lo + hi);
        if feasible(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}
