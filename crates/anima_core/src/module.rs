//! The contract every cognitive module implements.

use crate::context::ModuleInput;
use crate::document::ModuleDocument;
use crate::signal::SignalSnapshot;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A templated note a module emits when one of its signals crosses a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub module: String,
    pub signal: String,
    pub value: f32,
    pub text: String,
}

/// Outcome of one module's share of a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResult {
    pub module: String,
    pub signals_before: SignalSnapshot,
    pub signals_after: SignalSnapshot,
    pub factors: BTreeMap<String, f32>,
    pub emitted_insights: Vec<Insight>,
    /// Error marker. `None` when the module processed normally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ModuleResult {
    /// Result recorded for a module that failed: last-known signals, unchanged.
    pub fn fallback(module: impl Into<String>, snapshot: SignalSnapshot, error: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            signals_before: snapshot.clone(),
            signals_after: snapshot,
            factors: BTreeMap::new(),
            emitted_insights: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Change of one signal across this result.
    pub fn delta(&self, signal: &str) -> Option<f32> {
        self.signals_after.delta_from(&self.signals_before, signal)
    }
}

/// A stateful subsystem the pipeline runs every message through.
///
/// Implementations own their signals exclusively; the pipeline is the only
/// caller and never runs two calls concurrently.
#[async_trait]
pub trait CognitiveModule: Send + Sync {
    fn name(&self) -> &str;

    /// Signal reported in the global state summary.
    fn primary_signal(&self) -> &str;

    /// Extract factors, update, decay, clamp and record history.
    async fn process_input(&mut self, input: &ModuleInput<'_>) -> anyhow::Result<ModuleResult>;

    /// Current signals. No side effects.
    fn snapshot(&self) -> SignalSnapshot;

    /// Signals as they are right after construction or `reset()`.
    fn default_snapshot(&self) -> SignalSnapshot;

    fn history_len(&self) -> usize;

    /// Restore signals, history and tunables to defaults.
    fn reset(&mut self);

    fn to_document(&self) -> ModuleDocument;

    /// Adopt a persisted document.
    fn restore(&mut self, document: ModuleDocument);

    /// Current value of the primary signal.
    fn primary_value(&self) -> f32 {
        self.snapshot().get(self.primary_signal()).unwrap_or(0.0)
    }
}
