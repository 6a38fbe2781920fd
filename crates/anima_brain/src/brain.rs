//! The brain: a cloneable handle onto a single worker task that owns the
//! pipeline.
//!
//! Every operation that touches module state travels through one FIFO
//! channel, so passes never interleave and complete in submission order.
//! Read-only views (global state, stats) come from a `watch` channel and
//! never wait behind the queue.

use crate::error::BrainError;
use crate::pipeline::{ModuleStats, Pipeline, PipelineResult};
use anima_core::{AnimaConfig, CognitiveModule, GlobalState, InputContext, ModuleResult, PipelineConfig, SignalStore};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch, Mutex};
use tokio::task::JoinHandle;

enum Command {
    Submit {
        text: String,
        context: InputContext,
        reply: oneshot::Sender<PipelineResult>,
    },
    ResetAll {
        reply: oneshot::Sender<GlobalState>,
    },
    ResetModule {
        name: String,
        reply: oneshot::Sender<bool>,
    },
    Flush {
        reply: oneshot::Sender<usize>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Whether the worker is running a command right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Processing,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrainStats {
    /// Commands accepted but not yet picked up by the worker.
    pub queue_depth: usize,
    pub phase: Phase,
    pub total_interactions: u64,
    pub last_persist: Option<DateTime<Utc>>,
    pub modules: Vec<ModuleStats>,
}

/// What the worker publishes after every command.
#[derive(Debug, Clone, Default)]
struct Published {
    global: GlobalState,
    modules: Vec<ModuleStats>,
    latest: Vec<ModuleResult>,
    last_persist: Option<DateTime<Utc>>,
}

impl Published {
    fn from_pipeline(pipeline: &Pipeline) -> Self {
        Self {
            global: pipeline.global().clone(),
            modules: pipeline.module_stats(),
            latest: pipeline.latest_results().to_vec(),
            last_persist: pipeline.last_persist_at(),
        }
    }
}

#[derive(Clone)]
pub struct Brain {
    tx: mpsc::Sender<Command>,
    queue_depth: Arc<AtomicUsize>,
    processing: Arc<AtomicBool>,
    published: watch::Receiver<Published>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Brain {
    /// Build modules and open the store described by `config`, then start.
    pub async fn from_config(config: &AnimaConfig) -> Result<Self> {
        let store = anima_memory::open_store(&config.store).await?;
        Self::with_store(config, store).await
    }

    /// Like [`Brain::from_config`] but with a caller-provided store.
    pub async fn with_store(config: &AnimaConfig, store: Arc<dyn SignalStore>) -> Result<Self> {
        let modules = anima_modules::build_modules(config)?;
        Ok(Self::start(modules, store, &config.pipeline).await)
    }

    /// Restore `modules` from `store` and spawn the worker.
    pub async fn start(
        modules: Vec<Box<dyn CognitiveModule>>,
        store: Arc<dyn SignalStore>,
        config: &PipelineConfig,
    ) -> Self {
        let window = Duration::from_secs(config.persistence_window_secs);
        let pipeline = Pipeline::load(modules, store, window).await;

        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let (published_tx, published_rx) = watch::channel(Published::from_pipeline(&pipeline));
        let queue_depth = Arc::new(AtomicUsize::new(0));
        let processing = Arc::new(AtomicBool::new(false));

        let worker = tokio::spawn(run_worker(
            pipeline,
            rx,
            Arc::clone(&queue_depth),
            Arc::clone(&processing),
            published_tx,
        ));

        Self {
            tx,
            queue_depth,
            processing,
            published: published_rx,
            worker: Arc::new(Mutex::new(Some(worker))),
        }
    }

    /// Queue `text` for a pass and wait for its result.
    ///
    /// Requests are served strictly in the order they are accepted. Once
    /// accepted, dropping the returned future does not cancel the pass.
    pub async fn submit(
        &self,
        text: impl Into<String>,
        context: InputContext,
    ) -> Result<PipelineResult, BrainError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Submit {
            text: text.into(),
            context,
            reply,
        })
        .await?;
        rx.await.map_err(|_| BrainError::Closed)
    }

    /// Latest global state. Never waits for the queue.
    pub fn global_state(&self) -> GlobalState {
        self.published.borrow().global.clone()
    }

    /// Module results of the most recent pass.
    pub fn latest_results(&self) -> Vec<ModuleResult> {
        self.published.borrow().latest.clone()
    }

    pub fn stats(&self) -> BrainStats {
        let published = self.published.borrow();
        BrainStats {
            queue_depth: self.queue_depth.load(Ordering::SeqCst),
            phase: if self.processing.load(Ordering::SeqCst) {
                Phase::Processing
            } else {
                Phase::Idle
            },
            total_interactions: published.global.total_interactions,
            last_persist: published.last_persist,
            modules: published.modules.clone(),
        }
    }

    /// Reset every module to defaults, in queue order, and persist.
    pub async fn reset_all(&self) -> Result<GlobalState, BrainError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::ResetAll { reply }).await?;
        rx.await.map_err(|_| BrainError::Closed)
    }

    /// Reset one module. `Ok(false)` if there is no such module.
    pub async fn reset_module(&self, name: impl Into<String>) -> Result<bool, BrainError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::ResetModule {
            name: name.into(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| BrainError::Closed)
    }

    /// Persist every module now, ignoring the window. Returns modules saved.
    pub async fn flush(&self) -> Result<usize, BrainError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Flush { reply }).await?;
        rx.await.map_err(|_| BrainError::Closed)
    }

    /// Finish queued work, persist, and stop the worker. Idempotent.
    pub async fn shutdown(&self) {
        let (reply, rx) = oneshot::channel();
        if self.send(Command::Shutdown { reply }).await.is_ok() {
            let _ = rx.await;
        }
        if let Some(handle) = self.worker.lock().await.take() {
            if let Err(e) = handle.await {
                tracing::error!("Brain worker ended abnormally: {}", e);
            }
        }
    }

    /// Subscribe to global state updates.
    pub fn subscribe(&self) -> watch::Receiver<GlobalState> {
        let (tx, rx) = watch::channel(self.global_state());
        let mut published = self.published.clone();
        tokio::spawn(async move {
            while published.changed().await.is_ok() {
                let global = published.borrow().global.clone();
                if tx.send(global).is_err() {
                    break;
                }
            }
        });
        rx
    }

    async fn send(&self, command: Command) -> Result<(), BrainError> {
        // Count only once a slot is held, so a caller dropped while waiting
        // for capacity leaves the depth untouched.
        let permit = self.tx.reserve().await.map_err(|_| BrainError::Closed)?;
        self.queue_depth.fetch_add(1, Ordering::SeqCst);
        permit.send(command);
        Ok(())
    }
}

async fn run_worker(
    mut pipeline: Pipeline,
    mut rx: mpsc::Receiver<Command>,
    queue_depth: Arc<AtomicUsize>,
    processing: Arc<AtomicBool>,
    published: watch::Sender<Published>,
) {
    let mut shutdown_replies = Vec::new();

    while let Some(command) = rx.recv().await {
        queue_depth.fetch_sub(1, Ordering::SeqCst);
        processing.store(true, Ordering::SeqCst);

        match command {
            Command::Submit {
                text,
                context,
                reply,
            } => {
                let result = pipeline.run_pass(&text, &context).await;
                let _ = published.send(Published::from_pipeline(&pipeline));
                if reply.send(result).is_err() {
                    tracing::debug!("Submitter went away before pass finished");
                }
            }
            Command::ResetAll { reply } => {
                let global = pipeline.reset_all().await;
                let _ = published.send(Published::from_pipeline(&pipeline));
                let _ = reply.send(global);
            }
            Command::ResetModule { name, reply } => {
                let found = pipeline.reset_module(&name).await;
                let _ = published.send(Published::from_pipeline(&pipeline));
                let _ = reply.send(found);
            }
            Command::Flush { reply } => {
                let saved = pipeline.persist().await;
                let _ = published.send(Published::from_pipeline(&pipeline));
                let _ = reply.send(saved);
            }
            Command::Shutdown { reply } => {
                // Stop accepting; whatever is already queued still runs.
                rx.close();
                shutdown_replies.push(reply);
            }
        }

        processing.store(false, Ordering::SeqCst);
    }

    let saved = pipeline.persist().await;
    let _ = published.send(Published::from_pipeline(&pipeline));
    tracing::info!("Brain stopped after {} passes ({} modules saved)", pipeline.global().total_interactions, saved);
    for reply in shutdown_replies {
        let _ = reply.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anima_core::InMemoryStore;

    async fn brain() -> (Brain, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let brain = Brain::with_store(&AnimaConfig::default(), store.clone())
            .await
            .unwrap();
        (brain, store)
    }

    #[tokio::test]
    async fn test_initial_state_is_idle_and_empty() {
        let (brain, _) = brain().await;
        let stats = brain.stats();
        assert_eq!(stats.queue_depth, 0);
        assert_eq!(stats.phase, Phase::Idle);
        assert_eq!(stats.total_interactions, 0);
        assert_eq!(stats.modules.len(), 25);
        assert!(brain.latest_results().is_empty());
    }

    #[tokio::test]
    async fn test_submit_updates_views() {
        let (brain, _) = brain().await;
        let result = brain.submit("oi", InputContext::default()).await.unwrap();
        assert_eq!(result.pass, 1);
        assert_eq!(brain.global_state(), result.global);
        assert_eq!(brain.latest_results(), result.results);
        assert!(brain.stats().last_persist.is_some());
    }

    #[tokio::test]
    async fn test_flush_saves_all_modules() {
        let (brain, store) = brain().await;
        assert_eq!(brain.flush().await.unwrap(), 25);
        assert_eq!(store.save_count("speaking_style").await, 1);
    }

    #[tokio::test]
    async fn test_closed_after_shutdown() {
        let (brain, store) = brain().await;
        brain.submit("oi", InputContext::default()).await.unwrap();
        brain.shutdown().await;
        // shutdown flushes after the first-pass save
        assert_eq!(store.save_count("emotion").await, 2);
        let err = brain.submit("de novo", InputContext::default()).await.unwrap_err();
        assert!(matches!(err, BrainError::Closed));
        assert!(brain.flush().await.is_err());
        // second shutdown is a no-op
        brain.shutdown().await;
    }

    #[tokio::test]
    async fn test_subscribe_sees_passes() {
        let (brain, _) = brain().await;
        let mut rx = brain.subscribe();
        brain.submit("oi", InputContext::default()).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().total_interactions, 1);
    }
}
