//! # Anima Brain
//!
//! Runs each incoming message through every cognitive module in order,
//! one message at a time, folds the results into a [`GlobalState`] and
//! persists module documents on a throttled cadence.
//!
//! [`GlobalState`]: anima_core::GlobalState

pub mod brain;
pub mod error;
pub mod pipeline;

pub use brain::{Brain, BrainStats, Phase};
pub use error::BrainError;
pub use pipeline::{ModuleStats, Pipeline, PipelineResult};
