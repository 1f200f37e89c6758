//! Per-DMU result records, ranking, and categorization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PerformanceCategory;

/// Final evaluation record for one DMU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DmuResult {
    pub id: String,
    /// CCR (or Choquet stage-2) self-efficiency.
    pub ccr_efficiency: f64,
    /// Aggregate cross-efficiency score used for ranking.
    pub cross_efficiency: f64,
    /// Composite aspiration target (composite strategy only).
    pub theta_co: Option<f64>,
    /// Fairness-satisfaction level (Choquet strategy only).
    pub satisfaction: Option<f64>,
    /// Rank 1..N, 1 = best; ties break by input order.
    pub rank: usize,
    pub category: PerformanceCategory,
}

/// One DMU's scores before ranking.
#[derive(Debug, Clone)]
pub struct ScoredDmu {
    pub id: String,
    pub ccr_efficiency: f64,
    pub cross_efficiency: f64,
    pub theta_co: Option<f64>,
    pub satisfaction: Option<f64>,
}

/// Sorts by cross-efficiency descending (stable, so input order breaks
/// ties), assigns contiguous ranks 1..N and percentile categories.
pub fn rank_and_categorize(scored: Vec<ScoredDmu>) -> BTreeMap<String, DmuResult> {
    let total = scored.len();
    let mut order: Vec<usize> = (0..total).collect();
    order.sort_by(|a, b| {
        scored[*b]
            .cross_efficiency
            .partial_cmp(&scored[*a].cross_efficiency)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut results = BTreeMap::new();
    for (position, index) in order.into_iter().enumerate() {
        let dmu = &scored[index];
        let rank = position + 1;
        results.insert(
            dmu.id.clone(),
            DmuResult {
                id: dmu.id.clone(),
                ccr_efficiency: dmu.ccr_efficiency,
                cross_efficiency: dmu.cross_efficiency,
                theta_co: dmu.theta_co,
                satisfaction: dmu.satisfaction,
                rank,
                category: PerformanceCategory::from_rank(rank, total),
            },
        );
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: &str, cross: f64) -> ScoredDmu {
        ScoredDmu {
            id: id.to_string(),
            ccr_efficiency: cross,
            cross_efficiency: cross,
            theta_co: None,
            satisfaction: None,
        }
    }

    #[test]
    fn ranks_descending_by_cross_efficiency() {
        let results = rank_and_categorize(vec![
            scored("low", 0.3),
            scored("high", 0.9),
            scored("mid", 0.6),
        ]);
        assert_eq!(results["high"].rank, 1);
        assert_eq!(results["mid"].rank, 2);
        assert_eq!(results["low"].rank, 3);
    }

    #[test]
    fn equal_scores_rank_sequentially_in_input_order() {
        let results = rank_and_categorize(vec![
            scored("a", 1.0),
            scored("b", 1.0),
            scored("c", 0.4),
        ]);
        // Ties break by input order; ranks stay a contiguous 1..N.
        assert_eq!(results["a"].rank, 1);
        assert_eq!(results["b"].rank, 2);
        assert_eq!(results["c"].rank, 3);
        let mut ranks: Vec<usize> = results.values().map(|r| r.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn categories_follow_rank_percentiles() {
        let scored: Vec<ScoredDmu> = (0..20)
            .map(|i| scored(&format!("dmu{:02}", i), 1.0 - i as f64 * 0.01))
            .collect();
        let results = rank_and_categorize(scored);
        assert_eq!(results["dmu00"].category, PerformanceCategory::Exceptional);
        assert_eq!(results["dmu04"].category, PerformanceCategory::AboveTarget);
        assert_eq!(results["dmu10"].category, PerformanceCategory::MeetsTarget);
        assert_eq!(results["dmu18"].category, PerformanceCategory::BelowTarget);
        assert_eq!(results["dmu19"].category, PerformanceCategory::Critical);
    }

    #[test]
    fn result_serializes_to_json() {
        let results = rank_and_categorize(vec![scored("solo", 0.7)]);
        let json = serde_json::to_string(&results["solo"]).unwrap();
        let back: DmuResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, results["solo"]);
    }
}
