//! Prospect-theory value functions.
//!
//! Kahneman-Tversky S-shaped value function used to score gains and losses
//! relative to an efficiency aspiration: concave over gains, convex and
//! steeper over losses (loss aversion).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Prospect-theory curvature and loss-aversion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProspectParams {
    /// Gain-side curvature exponent, in (0, 1].
    pub alpha: f64,
    /// Loss-side curvature exponent, in (0, 1].
    pub beta: f64,
    /// Loss-aversion multiplier, >= 1.
    pub lambda: f64,
}

impl Default for ProspectParams {
    /// The empirical estimates from Tversky & Kahneman (1992).
    fn default() -> Self {
        Self {
            alpha: 0.88,
            beta: 0.88,
            lambda: 2.25,
        }
    }
}

impl ProspectParams {
    /// Validated constructor.
    pub fn try_new(alpha: f64, beta: f64, lambda: f64) -> Result<Self, ValidationError> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(ValidationError::out_of_range("alpha", 0.0, 1.0, alpha));
        }
        if !(beta > 0.0 && beta <= 1.0) {
            return Err(ValidationError::out_of_range("beta", 0.0, 1.0, beta));
        }
        if !(lambda >= 1.0) {
            return Err(ValidationError::out_of_range(
                "lambda",
                1.0,
                f64::INFINITY,
                lambda,
            ));
        }
        Ok(Self {
            alpha,
            beta,
            lambda,
        })
    }

    /// Value of a deviation from the reference point.
    ///
    /// `delta >= 0` is a gain valued `delta^alpha`; `delta < 0` is a loss
    /// valued `-lambda * (-delta)^beta`.
    pub fn value(&self, delta: f64) -> f64 {
        if delta >= 0.0 {
            delta.powf(self.alpha)
        } else {
            -self.lambda * (-delta).powf(self.beta)
        }
    }

    /// Aggregate value of nonnegative gain deviations (output surplus `dy`,
    /// input saving `dx`). Negative arguments are clamped to zero.
    pub fn gain_value(&self, dy: f64, dx: f64) -> f64 {
        dy.max(0.0).powf(self.alpha) + dx.max(0.0).powf(self.alpha)
    }

    /// Aggregate disvalue of nonnegative loss deviations (output deficiency,
    /// input redundancy), weighted by loss aversion.
    pub fn loss_value(&self, deficiency: f64, redundancy: f64) -> f64 {
        self.lambda * (deficiency.max(0.0).powf(self.beta) + redundancy.max(0.0).powf(self.beta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn value_at_reference_point_is_zero() {
        let params = ProspectParams::default();
        assert_eq!(params.value(0.0), 0.0);
    }

    #[test]
    fn gains_follow_power_law() {
        let params = ProspectParams::default();
        assert!((params.value(1.0) - 1.0).abs() < 1e-12);
        assert!((params.value(0.5) - 0.5f64.powf(0.88)).abs() < 1e-12);
    }

    #[test]
    fn losses_are_amplified() {
        let params = ProspectParams::default();
        let loss = params.value(-1.0);
        assert!((loss + 2.25).abs() < 1e-12);
        // A loss hurts more than the equal-sized gain pleases.
        assert!(loss.abs() > params.value(1.0));
    }

    #[test]
    fn aggregate_helpers_clamp_negatives() {
        let params = ProspectParams::default();
        assert_eq!(params.gain_value(-0.5, -0.5), 0.0);
        assert_eq!(params.loss_value(-0.5, -0.5), 0.0);
        assert!(params.gain_value(0.5, 0.0) > 0.0);
        assert!(params.loss_value(0.5, 0.0) > params.gain_value(0.5, 0.0));
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(ProspectParams::try_new(0.0, 0.88, 2.25).is_err());
        assert!(ProspectParams::try_new(0.88, 1.5, 2.25).is_err());
        assert!(ProspectParams::try_new(0.88, 0.88, 0.5).is_err());
        assert!(ProspectParams::try_new(0.88, 0.88, 1.0).is_ok());
    }

    proptest! {
        #[test]
        fn value_is_monotone_nondecreasing(a in -10.0f64..10.0, b in -10.0f64..10.0) {
            let params = ProspectParams::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(params.value(lo) <= params.value(hi) + 1e-12);
        }

        #[test]
        fn losses_dominate_symmetric_gains(delta in 0.001f64..10.0) {
            let params = ProspectParams::default();
            prop_assert!(params.value(-delta).abs() >= params.value(delta));
        }
    }
}
