//! Data Envelopment Analysis models: CCR, bounded-rationality cross
//! evaluation, and the cross-efficiency matrix builder.

mod bounded_rationality;
mod ccr;
mod cross_efficiency;
mod normalize;
mod prospect;
mod targets;

pub use bounded_rationality::{BoundedRationalitySolver, DeviationMode};
pub use ccr::{CcrScore, CcrSolver, CcrWeights, DEFAULT_EPSILON};
pub use cross_efficiency::{
    CrossEfficiencyBuilder, CrossEfficiencyMatrix, EntryProvenance, TargetPolicy, DEFAULT_TARGET,
};
pub use normalize::{normalize_columns, NEAR_ZERO_GUARD};
pub use prospect::ProspectParams;
pub use targets::CompositeObjective;
