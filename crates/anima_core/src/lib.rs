//! # Anima Core
//!
//! The shared contract every cognitive module of the persona implements,
//! and the configurable engine that implements it.
//!
//! A module owns a handful of bounded signals in `[0, 1]`. Each incoming
//! message is matched against the module's rule table to produce factors;
//! factors move their target signals by `Σ(magnitude × weight) × learning_rate`,
//! everything else relaxes toward its baseline, and the pass is recorded in a
//! bounded history.

pub mod config;
pub mod context;
pub mod document;
pub mod engine;
pub mod error;
pub mod global;
pub mod module;
pub mod rules;
pub mod sentiment;
pub mod signal;
pub mod store;

pub use config::{AnimaConfig, ModuleOverrides, PipelineConfig, StoreBackend, StoreConfig};
pub use context::{InputContext, ModuleInput};
pub use document::{HistoryEvent, ModuleDocument, TunableParameters};
pub use engine::{
    ConfiguredModule, Crossing, DecayMode, InsightRule, LearningRateSpec, ModuleConfig,
    ModuleConfigBuilder,
};
pub use error::ConfigError;
pub use global::GlobalState;
pub use module::{CognitiveModule, Insight, ModuleResult};
pub use rules::{Matcher, RoleWeights, Rule, Scaling};
pub use sentiment::{analyze_sentiment, Polarity};
pub use signal::{SignalReading, SignalSnapshot, SignalSpec};
pub use store::{InMemoryStore, SignalStore};
