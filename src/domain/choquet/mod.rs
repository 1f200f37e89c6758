//! 2-additive Choquet-integral DEA: interaction estimation, stage LPs,
//! and the fairness-satisfaction pipeline.

mod aggregation;
mod interactions;
mod model;
mod pipeline;

pub use aggregation::{aggregate, coefficients, ChoquetCoefficients};
pub use interactions::{efficiency_proxy, estimate_interactions, INTERACTION_DAMPING};
pub use model::{ChoquetModel, ChoquetScore, ChoquetWeights};
pub use pipeline::{ChoquetEvaluation, ChoquetParams, ChoquetPipeline};
