//! Data-driven estimation of pairwise criterion interactions.
//!
//! For each criterion pair, the interaction estimate is the Pearson
//! correlation between the elementwise-minimum series `min(f_i, f_j)` across
//! DMUs and a proxy efficiency, damped to keep estimates advisory rather
//! than dominant. Estimates are reported alongside the evaluation; the LP
//! stages determine their own interaction weights within [-1, 1].

use crate::domain::foundation::{DataMatrix, InteractionMatrix};

/// Damping factor applied to raw correlations.
pub const INTERACTION_DAMPING: f64 = 0.10;

const CONSTANT_SERIES_GUARD: f64 = 1e-10;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let mean_a = mean(a);
    let mean_b = mean(b);
    let std_a = std_dev(a, mean_a);
    let std_b = std_dev(b, mean_b);
    if std_a < CONSTANT_SERIES_GUARD || std_b < CONSTANT_SERIES_GUARD {
        return 0.0;
    }
    let covariance = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum::<f64>()
        / a.len() as f64;
    let correlation = covariance / (std_a * std_b);
    if correlation.is_nan() {
        0.0
    } else {
        correlation
    }
}

/// Proxy efficiency per DMU: known scores when available, otherwise the
/// ratio of total output to total input.
pub fn efficiency_proxy(
    inputs: &DataMatrix,
    outputs: &DataMatrix,
    known: Option<&[f64]>,
) -> Vec<f64> {
    if let Some(scores) = known {
        return scores.to_vec();
    }
    (0..inputs.rows())
        .map(|r| {
            let total_in: f64 = inputs.row(r).iter().sum();
            let total_out: f64 = outputs.row(r).iter().sum();
            total_out / (total_in + CONSTANT_SERIES_GUARD)
        })
        .collect()
}

/// Estimates damped pairwise interactions among one side's criteria.
pub fn estimate_interactions(features: &DataMatrix, proxy: &[f64]) -> InteractionMatrix {
    let mut interactions = InteractionMatrix::zeros(features.cols());
    let pairs: Vec<_> = interactions.pairs().collect();
    for pair in pairs {
        let lo = features.column(pair.lo());
        let hi = features.column(pair.hi());
        let mins: Vec<f64> = lo.iter().zip(&hi).map(|(a, b)| a.min(*b)).collect();
        let correlation = pearson(&mins, proxy);
        interactions.set(pair, correlation * INTERACTION_DAMPING);
    }
    interactions
}
