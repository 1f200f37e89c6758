//! Domain layer: DEA models, Choquet pipeline, evaluation facades, and
//! the foundation value objects they share.

pub mod choquet;
pub mod dea;
pub mod evaluation;
pub mod foundation;
