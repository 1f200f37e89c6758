//! Choquet evaluation strategy.
//!
//! Normalizes each criterion column into [0, 1], runs the four-stage
//! Choquet pipeline, and ranks DMUs by their fairness-blended scores.

use std::collections::{BTreeMap, HashMap};

use crate::domain::choquet::{ChoquetParams, ChoquetPipeline};
use crate::domain::dea::normalize_columns;
use crate::domain::evaluation::result::{rank_and_categorize, DmuResult, ScoredDmu};
use crate::domain::evaluation::validate::validate_inputs;
use crate::domain::foundation::EvaluationError;
use crate::ports::LinearProgramSolver;

/// Strategy B: 2-additive Choquet evaluation with fairness satisfaction.
pub struct ChoquetEvaluator<'a> {
    lp: &'a dyn LinearProgramSolver,
    params: ChoquetParams,
}

impl<'a> ChoquetEvaluator<'a> {
    pub fn new(lp: &'a dyn LinearProgramSolver) -> Self {
        Self {
            lp,
            params: ChoquetParams::default(),
        }
    }

    pub fn with_params(mut self, params: ChoquetParams) -> Self {
        self.params = params;
        self
    }

    /// Evaluates the cohort.
    ///
    /// `personal_objectives` is accepted for signature parity with the
    /// composite strategy but plays no role here: aspiration levels are
    /// replaced by the fairness-satisfaction mechanism.
    pub fn evaluate<S: AsRef<str>>(
        &self,
        dmu_ids: &[S],
        inputs: Vec<Vec<f64>>,
        outputs: Vec<Vec<f64>>,
        personal_objectives: Option<&HashMap<String, f64>>,
    ) -> Result<BTreeMap<String, DmuResult>, EvaluationError> {
        let _ = personal_objectives;
        let (ids, input_matrix, output_matrix) = validate_inputs(dmu_ids, inputs, outputs)?;

        let normalized_inputs = normalize_columns(&input_matrix);
        let normalized_outputs = normalize_columns(&output_matrix);

        let pipeline = ChoquetPipeline::new(self.lp, self.params);
        let evaluation = pipeline.run(&normalized_inputs, &normalized_outputs);
        tracing::debug!(dmus = ids.len(), "Choquet pipeline complete");

        let scored: Vec<ScoredDmu> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| ScoredDmu {
                id: id.clone(),
                ccr_efficiency: evaluation.self_efficiencies[i].efficiency,
                cross_efficiency: evaluation.scores[i],
                theta_co: None,
                satisfaction: Some(evaluation.satisfaction[i]),
            })
            .collect();
        Ok(rank_and_categorize(scored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SimplexLpSolver;

    #[test]
    fn evaluates_and_ranks_a_small_cohort() {
        let lp = SimplexLpSolver::new();
        let results = ChoquetEvaluator::new(&lp)
            .evaluate(
                &["a", "b", "c"],
                vec![vec![2.0, 1.0], vec![1.0, 2.0], vec![2.0, 2.0]],
                vec![vec![4.0, 3.0], vec![3.0, 4.0], vec![2.0, 2.0]],
                None,
            )
            .unwrap();
        assert_eq!(results.len(), 3);
        let mut ranks: Vec<usize> = results.values().map(|r| r.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3]);
        for result in results.values() {
            assert!(result.satisfaction.is_some());
            assert!(result.theta_co.is_none());
        }
    }

    #[test]
    fn validation_errors_abort_before_solving() {
        let lp = SimplexLpSolver::new();
        let result = ChoquetEvaluator::new(&lp).evaluate(
            &["a"],
            vec![vec![1.0], vec![2.0]],
            vec![vec![1.0]],
            None,
        );
        assert!(matches!(result, Err(EvaluationError::Validation(_))));
    }
}
