//! Evaluator facades, ranking, and result records.

mod choquet;
mod composite;
mod result;
mod validate;

pub use choquet::ChoquetEvaluator;
pub use composite::CompositeEvaluator;
pub use result::{rank_and_categorize, DmuResult, ScoredDmu};
pub use validate::validate_inputs;
