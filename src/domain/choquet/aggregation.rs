//! 2-additive Choquet integral in Möbius representation.
//!
//! `C(x) = Σ_c w_c·x_c + Σ_{i<j} v_ij·min(x_i, x_j)`. Because the
//! minimum terms are fixed once the data is known, the integral is linear
//! in the weights, which is what lets the DEA stages remain LPs.

use crate::domain::foundation::InteractionMatrix;

/// Per-weight coefficient rows of the Choquet integral for one DMU's values.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoquetCoefficients {
    /// Coefficients of the linear weights: the values themselves.
    pub linear: Vec<f64>,
    /// Coefficients of the pairwise weights, in `InteractionMatrix::pairs`
    /// order: `min(x_lo, x_hi)` per pair.
    pub pairwise: Vec<f64>,
}

/// Coefficient rows for a value vector over `values.len()` criteria.
pub fn coefficients(values: &[f64]) -> ChoquetCoefficients {
    let n = values.len();
    let mut pairwise = Vec::with_capacity(if n < 2 { 0 } else { n * (n - 1) / 2 });
    for lo in 0..n {
        for hi in lo + 1..n {
            pairwise.push(values[lo].min(values[hi]));
        }
    }
    ChoquetCoefficients {
        linear: values.to_vec(),
        pairwise,
    }
}

/// Numeric Choquet integral of `values` under explicit weights.
pub fn aggregate(values: &[f64], linear_weights: &[f64], interactions: &InteractionMatrix) -> f64 {
    let rows = coefficients(values);
    let linear: f64 = rows
        .linear
        .iter()
        .zip(linear_weights)
        .map(|(x, w)| x * w)
        .sum();
    let pairwise: f64 = interactions
        .pairs()
        .zip(&rows.pairwise)
        .map(|(pair, min)| interactions.get(pair) * min)
        .sum();
    linear + pairwise
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CriterionPair;

    #[test]
    fn reduces_to_weighted_sum_without_interactions() {
        let interactions = InteractionMatrix::zeros(2);
        let value = aggregate(&[0.5, 1.0], &[0.4, 0.6], &interactions);
        assert!((value - 0.8).abs() < 1e-12);
    }

    #[test]
    fn positive_interaction_rewards_joint_attainment() {
        let mut interactions = InteractionMatrix::zeros(2);
        interactions.set(CriterionPair::new(0, 1).unwrap(), 0.2);
        let balanced = aggregate(&[0.5, 0.5], &[0.5, 0.5], &interactions);
        let skewed = aggregate(&[1.0, 0.0], &[0.5, 0.5], &interactions);
        // Equal weighted sums, but the balanced profile wins the min bonus.
        assert!(balanced > skewed);
    }

    #[test]
    fn coefficient_rows_follow_pair_order() {
        let rows = coefficients(&[3.0, 1.0, 2.0]);
        assert_eq!(rows.linear, vec![3.0, 1.0, 2.0]);
        // Pairs (0,1), (0,2), (1,2).
        assert_eq!(rows.pairwise, vec![1.0, 2.0, 1.0]);
    }
}
