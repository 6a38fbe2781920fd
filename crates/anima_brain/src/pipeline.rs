//! One pass of an input through every module, plus persistence cadence.
//!
//! The [`Pipeline`] is owned by the brain's worker task; nothing here is
//! shared, so there is no locking. Concurrency lives in `brain.rs`.

use anima_core::{
    CognitiveModule, GlobalState, InputContext, ModuleInput, ModuleResult, SignalSnapshot,
    SignalStore,
};
use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Outcome of one submitted message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    /// Sequence number of this pass (equals `global.total_interactions`).
    pub pass: u64,
    /// One entry per module, in pipeline order.
    pub results: Vec<ModuleResult>,
    pub global: GlobalState,
    /// Whether this pass triggered a successful persistence round.
    pub persisted: bool,
}

impl PipelineResult {
    pub fn result(&self, module: &str) -> Option<&ModuleResult> {
        self.results.iter().find(|r| r.module == module)
    }

    pub fn failed_modules(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|r| !r.is_ok())
            .map(|r| r.module.as_str())
    }
}

/// Per-module view reported by `stats()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleStats {
    pub name: String,
    pub primary_signal: String,
    pub primary_value: f32,
    pub dominant_signal: Option<String>,
    pub history_len: usize,
    pub signals: SignalSnapshot,
}

pub struct Pipeline {
    modules: Vec<Box<dyn CognitiveModule>>,
    store: Arc<dyn SignalStore>,
    global: GlobalState,
    persistence_window: Duration,
    /// Monotonic time of the last persistence attempt.
    last_persist: Option<Instant>,
    /// Wall-clock time of the last round that saved anything.
    last_persist_at: Option<DateTime<Utc>>,
    latest: Vec<ModuleResult>,
}

impl Pipeline {
    /// Restore every module from the store. Missing, corrupt or unreadable
    /// documents leave the module at its defaults.
    pub async fn load(
        mut modules: Vec<Box<dyn CognitiveModule>>,
        store: Arc<dyn SignalStore>,
        persistence_window: Duration,
    ) -> Self {
        let mut restored = 0;
        for module in modules.iter_mut() {
            match store.load(module.name()).await {
                Ok(Some(document)) => {
                    module.restore(document);
                    restored += 1;
                    tracing::debug!("Restored module '{}'", module.name());
                }
                Ok(None) => {
                    tracing::debug!("No stored state for '{}', using defaults", module.name());
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to load module '{}': {}. Using defaults",
                        module.name(),
                        e
                    );
                }
            }
        }
        tracing::info!(
            "Pipeline ready: {} modules, {} restored from store",
            modules.len(),
            restored
        );

        let mut pipeline = Self {
            modules,
            store,
            global: GlobalState::default(),
            persistence_window,
            last_persist: None,
            last_persist_at: None,
            latest: Vec::new(),
        };
        pipeline.refresh_summary();
        pipeline
    }

    pub fn global(&self) -> &GlobalState {
        &self.global
    }

    pub fn latest_results(&self) -> &[ModuleResult] {
        &self.latest
    }

    pub fn last_persist_at(&self) -> Option<DateTime<Utc>> {
        self.last_persist_at
    }

    pub fn module_names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.name().to_string()).collect()
    }

    /// Global state as it is right after `reset_all`.
    pub fn default_global_state(&self) -> GlobalState {
        GlobalState {
            per_module_summary: self
                .modules
                .iter()
                .map(|m| {
                    let value = m.default_snapshot().get(m.primary_signal()).unwrap_or(0.0);
                    (m.name().to_string(), value)
                })
                .collect(),
            total_interactions: 0,
            last_update_timestamp: None,
        }
    }

    /// Run one input through every module in order.
    ///
    /// A module that returns an error or panics is rolled back to its
    /// pre-pass document and gets a fallback result with an error marker;
    /// the pass carries on.
    pub async fn run_pass(&mut self, text: &str, context: &InputContext) -> PipelineResult {
        let now = Utc::now();
        let mut results: Vec<ModuleResult> = Vec::with_capacity(self.modules.len());

        for module in self.modules.iter_mut() {
            let name = module.name().to_string();
            let before = module.snapshot();
            let checkpoint = module.to_document();
            let outcome = {
                let input = ModuleInput::new(text, context, &results, now);
                AssertUnwindSafe(module.process_input(&input))
                    .catch_unwind()
                    .await
            };
            let result = match outcome {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    tracing::warn!("Module '{}' failed: {:#}", name, e);
                    module.restore(checkpoint);
                    ModuleResult::fallback(name, before, format!("error: {}", e))
                }
                Err(panic) => {
                    let message = panic_message(&*panic);
                    tracing::warn!("Module '{}' panicked: {}", name, message);
                    module.restore(checkpoint);
                    ModuleResult::fallback(name, before, format!("panic: {}", message))
                }
            };
            results.push(result);
        }

        self.refresh_summary();
        self.global.total_interactions += 1;
        self.global.last_update_timestamp = Some(now);
        tracing::debug!(
            "Pass {} done ({} modules)",
            self.global.total_interactions,
            results.len()
        );

        let persisted = self.maybe_persist().await;
        self.latest = results.clone();

        PipelineResult {
            pass: self.global.total_interactions,
            results,
            global: self.global.clone(),
            persisted,
        }
    }

    /// Persist if the window since the last attempt has elapsed.
    /// The first call after start always persists.
    pub async fn maybe_persist(&mut self) -> bool {
        let due = match self.last_persist {
            None => true,
            Some(last) => last.elapsed() >= self.persistence_window,
        };
        if !due {
            tracing::trace!("Persistence deferred");
            return false;
        }
        self.persist().await == self.modules.len()
    }

    /// Save every module now. Failed saves are logged and picked up by the
    /// next round. Returns the number of modules saved.
    pub async fn persist(&mut self) -> usize {
        let mut saved = 0;
        for module in &self.modules {
            let document = module.to_document();
            match self.store.save(module.name(), &document).await {
                Ok(()) => saved += 1,
                Err(e) => tracing::warn!("Failed to save module '{}': {:#}", module.name(), e),
            }
        }
        self.last_persist = Some(Instant::now());
        if saved > 0 {
            self.last_persist_at = Some(Utc::now());
        }
        tracing::debug!("Persisted {}/{} modules", saved, self.modules.len());
        saved
    }

    /// Reset every module and the global state, then persist immediately so
    /// a restart cannot bring the old state back.
    pub async fn reset_all(&mut self) -> GlobalState {
        for module in self.modules.iter_mut() {
            module.reset();
        }
        self.global = self.default_global_state();
        self.latest.clear();
        let saved = self.persist().await;
        tracing::info!("All modules reset ({} saved)", saved);
        self.global.clone()
    }

    /// Reset a single module. Returns false if no module has that name.
    pub async fn reset_module(&mut self, name: &str) -> bool {
        let Some(module) = self.modules.iter_mut().find(|m| m.name() == name) else {
            return false;
        };
        module.reset();
        let document = module.to_document();
        if let Err(e) = self.store.save(name, &document).await {
            tracing::warn!("Failed to save module '{}' after reset: {:#}", name, e);
        }
        self.refresh_summary();
        tracing::info!("Module '{}' reset", name);
        true
    }

    pub fn module_stats(&self) -> Vec<ModuleStats> {
        self.modules
            .iter()
            .map(|m| {
                let signals = m.snapshot();
                ModuleStats {
                    name: m.name().to_string(),
                    primary_signal: m.primary_signal().to_string(),
                    primary_value: signals.get(m.primary_signal()).unwrap_or(0.0),
                    dominant_signal: signals.dominant().map(|r| r.name.clone()),
                    history_len: m.history_len(),
                    signals,
                }
            })
            .collect()
    }

    fn refresh_summary(&mut self) {
        self.global.per_module_summary = self
            .modules
            .iter()
            .map(|m| (m.name().to_string(), m.primary_value()))
            .collect();
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
