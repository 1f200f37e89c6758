//! Composite-objective evaluation strategy.
//!
//! Blends the organizational efficiency target with each DMU's personal
//! objective into a composite aspiration, builds the bounded-rationality
//! cross-efficiency matrix against those aspirations, and ranks DMUs by
//! their row means.

use std::collections::{BTreeMap, HashMap};

use crate::domain::dea::{
    CompositeObjective, CrossEfficiencyBuilder, ProspectParams, TargetPolicy,
};
use crate::domain::evaluation::result::{rank_and_categorize, DmuResult, ScoredDmu};
use crate::domain::evaluation::validate::validate_inputs;
use crate::domain::foundation::EvaluationError;
use crate::ports::{LinearProgramSolver, NonlinearProgramSolver};

/// Strategy A: composite-objective bounded-rationality evaluation.
pub struct CompositeEvaluator<'a> {
    lp: &'a dyn LinearProgramSolver,
    nlp: &'a dyn NonlinearProgramSolver,
    objective: CompositeObjective,
    prospect: ProspectParams,
}

impl<'a> CompositeEvaluator<'a> {
    pub fn new(lp: &'a dyn LinearProgramSolver, nlp: &'a dyn NonlinearProgramSolver) -> Self {
        Self {
            lp,
            nlp,
            objective: CompositeObjective::default(),
            prospect: ProspectParams::default(),
        }
    }

    pub fn with_objective(mut self, objective: CompositeObjective) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_prospect(mut self, prospect: ProspectParams) -> Self {
        self.prospect = prospect;
        self
    }

    /// Evaluates the cohort.
    ///
    /// `personal_objectives` maps DMU ids to personal efficiency targets;
    /// DMUs without an entry aspire to the organizational target alone.
    pub fn evaluate<S: AsRef<str>>(
        &self,
        dmu_ids: &[S],
        inputs: Vec<Vec<f64>>,
        outputs: Vec<Vec<f64>>,
        personal_objectives: Option<&HashMap<String, f64>>,
    ) -> Result<BTreeMap<String, DmuResult>, EvaluationError> {
        let (ids, input_matrix, output_matrix) = validate_inputs(dmu_ids, inputs, outputs)?;

        let composites: Vec<f64> = ids
            .iter()
            .map(|id| {
                let personal = personal_objectives.and_then(|map| map.get(id).copied());
                self.objective.composite(personal)
            })
            .collect();

        let builder = CrossEfficiencyBuilder::new(self.lp, self.nlp, self.prospect);
        let matrix = builder.build(
            &input_matrix,
            &output_matrix,
            &TargetPolicy::PerPeer(composites.clone()),
        )?;
        tracing::debug!(
            dmus = ids.len(),
            fallbacks = matrix.fallback_count(),
            "cross-efficiency matrix complete"
        );

        let scored: Vec<ScoredDmu> = ids
            .iter()
            .enumerate()
            .map(|(j, id)| ScoredDmu {
                id: id.clone(),
                ccr_efficiency: matrix.self_efficiency(j),
                cross_efficiency: matrix.row_mean(j),
                theta_co: Some(composites[j]),
                satisfaction: None,
            })
            .collect();
        Ok(rank_and_categorize(scored))
    }
}
