//! Cross-efficiency matrix construction.
//!
//! Row j, column k holds peer j's efficiency under evaluator k's weights.
//! The diagonal carries CCR self-efficiencies; off-diagonal entries come
//! from the bounded-rationality model, falling back to the plain CCR
//! weight ratio when that solve fails.

use serde::{Deserialize, Serialize};

use super::bounded_rationality::{BoundedRationalitySolver, DeviationMode};
use super::ccr::{CcrScore, CcrSolver, DEFAULT_EPSILON};
use super::prospect::ProspectParams;
use crate::domain::foundation::{DataMatrix, OptimizationFailure};
use crate::ports::{LinearProgramSolver, NonlinearProgramSolver};

/// Where a matrix entry's value came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntryProvenance {
    /// Diagonal entry, the DMU's own CCR efficiency.
    SelfEfficiency,
    /// Bounded-rationality solve succeeded.
    Nominal,
    /// Bounded-rationality solve failed; CCR weight ratio substituted.
    Fallback(String),
}

/// Aspiration applied to peers without an explicit target entry.
pub const DEFAULT_TARGET: f64 = 1.0;

/// Per-peer aspiration levels for the bounded-rationality model.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetPolicy {
    /// One aspiration shared by every peer.
    Uniform(f64),
    /// One aspiration per peer, indexed like the DMU list. Peers beyond
    /// the list aspire to [`DEFAULT_TARGET`].
    PerPeer(Vec<f64>),
}

impl TargetPolicy {
    pub fn target_for(&self, j: usize) -> f64 {
        match self {
            TargetPolicy::Uniform(theta) => *theta,
            TargetPolicy::PerPeer(thetas) => thetas.get(j).copied().unwrap_or(DEFAULT_TARGET),
        }
    }
}

/// Completed cross-efficiency matrix with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossEfficiencyMatrix {
    values: Vec<Vec<f64>>,
    provenance: Vec<Vec<EntryProvenance>>,
    self_efficiencies: Vec<CcrScore>,
}

impl CrossEfficiencyMatrix {
    /// Peer j's score under evaluator k.
    pub fn score(&self, j: usize, k: usize) -> f64 {
        self.values[j][k]
    }

    pub fn provenance(&self, j: usize, k: usize) -> &EntryProvenance {
        &self.provenance[j][k]
    }

    /// Mean of peer j's row, its aggregate cross-efficiency.
    pub fn row_mean(&self, j: usize) -> f64 {
        let row = &self.values[j];
        row.iter().sum::<f64>() / row.len() as f64
    }

    pub fn self_efficiency(&self, k: usize) -> f64 {
        self.self_efficiencies[k].efficiency
    }

    pub fn self_efficiencies(&self) -> &[CcrScore] {
        &self.self_efficiencies
    }

    /// Number of entries that required the fallback substitution.
    pub fn fallback_count(&self) -> usize {
        self.provenance
            .iter()
            .flatten()
            .filter(|p| matches!(p, EntryProvenance::Fallback(_)))
            .count()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Orchestrates CCR anchors plus bounded-rationality cross scores.
pub struct CrossEfficiencyBuilder<'a> {
    lp: &'a dyn LinearProgramSolver,
    nlp: &'a dyn NonlinearProgramSolver,
    params: ProspectParams,
    epsilon: f64,
}

impl<'a> CrossEfficiencyBuilder<'a> {
    pub fn new(
        lp: &'a dyn LinearProgramSolver,
        nlp: &'a dyn NonlinearProgramSolver,
        params: ProspectParams,
    ) -> Self {
        Self {
            lp,
            nlp,
            params,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Builds the full N x N matrix.
    ///
    /// Self-efficiency failures abort; cross-score failures degrade to the
    /// CCR weight ratio and are tagged and logged.
    pub fn build(
        &self,
        inputs: &DataMatrix,
        outputs: &DataMatrix,
        targets: &TargetPolicy,
    ) -> Result<CrossEfficiencyMatrix, OptimizationFailure> {
        let n = inputs.rows();
        let ccr = CcrSolver::with_epsilon(self.lp, self.epsilon);
        let br = BoundedRationalitySolver::new(self.nlp, self.params, self.epsilon);

        let mut self_efficiencies = Vec::with_capacity(n);
        for k in 0..n {
            self_efficiencies.push(ccr.solve(inputs, outputs, k)?);
        }

        let mut values = vec![vec![0.0; n]; n];
        let mut provenance = vec![vec![EntryProvenance::Nominal; n]; n];
        for k in 0..n {
            values[k][k] = self_efficiencies[k].efficiency;
            provenance[k][k] = EntryProvenance::SelfEfficiency;
        }

        for k in 0..n {
            let theta_kk = self_efficiencies[k].efficiency;
            for j in 0..n {
                if j == k {
                    continue;
                }
                let theta_limit = targets.target_for(j);
                let mode = if theta_limit > self_efficiencies[j].efficiency {
                    DeviationMode::Loss
                } else {
                    DeviationMode::Gain
                };
                match br.solve(inputs, outputs, k, j, theta_limit, theta_kk, mode) {
                    Ok(score) => {
                        values[j][k] = score;
                    }
                    Err(failure) => {
                        tracing::warn!(
                            evaluator = k,
                            peer = j,
                            error = %failure,
                            "bounded-rationality solve failed, using CCR weight ratio"
                        );
                        values[j][k] =
                            self_efficiencies[k].weights.score(inputs, outputs, j);
                        provenance[j][k] = EntryProvenance::Fallback(failure.to_string());
                    }
                }
            }
        }

        Ok(CrossEfficiencyMatrix {
            values,
            provenance,
            self_efficiencies,
        })
    }
}
