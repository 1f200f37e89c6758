//! Composite aspiration targets blending organizational and personal goals.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Composite-objective parameters.
///
/// The composite aspiration for a DMU is
/// `theta_co = mu * theta_oo + (1 - mu) * theta_po`, where `theta_po` is the
/// DMU's personal objective when it has one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeObjective {
    /// Organizational efficiency target, in (0, 1].
    pub theta_oo: f64,
    /// Weight of the organizational target, in [0, 1].
    pub mu: f64,
}

impl Default for CompositeObjective {
    fn default() -> Self {
        Self {
            theta_oo: 0.7,
            mu: 0.6,
        }
    }
}

impl CompositeObjective {
    pub fn try_new(theta_oo: f64, mu: f64) -> Result<Self, ValidationError> {
        if !(theta_oo > 0.0 && theta_oo <= 1.0) {
            return Err(ValidationError::out_of_range("theta_oo", 0.0, 1.0, theta_oo));
        }
        if !(0.0..=1.0).contains(&mu) {
            return Err(ValidationError::out_of_range("mu", 0.0, 1.0, mu));
        }
        Ok(Self { theta_oo, mu })
    }

    /// Composite target for one DMU. Without a personal objective the
    /// organizational target applies unblended.
    pub fn composite(&self, personal: Option<f64>) -> f64 {
        match personal {
            Some(theta_po) => self.mu * self.theta_oo + (1.0 - self.mu) * theta_po,
            None => self.theta_oo,
        }
    }
}
