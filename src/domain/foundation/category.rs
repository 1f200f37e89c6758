//! Percentile-based performance categories.

use serde::{Deserialize, Serialize};

/// Performance bucket assigned from a DMU's rank percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceCategory {
    /// Top 5% of the cohort.
    Exceptional,
    /// Top 25%.
    AboveTarget,
    /// Top 75%.
    MeetsTarget,
    /// Top 95%.
    BelowTarget,
    /// Bottom 5%.
    Critical,
}

impl PerformanceCategory {
    /// Buckets a 1-based rank within a cohort of `total` DMUs.
    pub fn from_rank(rank: usize, total: usize) -> Self {
        let percentile = rank as f64 / total as f64 * 100.0;
        if percentile <= 5.0 {
            PerformanceCategory::Exceptional
        } else if percentile <= 25.0 {
            PerformanceCategory::AboveTarget
        } else if percentile <= 75.0 {
            PerformanceCategory::MeetsTarget
        } else if percentile <= 95.0 {
            PerformanceCategory::BelowTarget
        } else {
            PerformanceCategory::Critical
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceCategory::Exceptional => "Exceptional",
            PerformanceCategory::AboveTarget => "Above Target",
            PerformanceCategory::MeetsTarget => "Meets Target",
            PerformanceCategory::BelowTarget => "Below Target",
            PerformanceCategory::Critical => "Critical",
        }
    }
}
