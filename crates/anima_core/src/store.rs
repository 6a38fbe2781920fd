//! Signal store contract.
//!
//! One document per module. Loading a missing or unreadable document yields
//! `None` and the caller falls back to defaults; save failures are the
//! caller's to log.

use crate::document::ModuleDocument;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[async_trait]
pub trait SignalStore: Send + Sync {
    /// Idempotent and side-effect free.
    async fn load(&self, module: &str) -> Result<Option<ModuleDocument>>;

    async fn save(&self, module: &str, document: &ModuleDocument) -> Result<()>;
}

/// Process-local store keeping serialized documents in a map.
#[derive(Default)]
pub struct InMemoryStore {
    documents: RwLock<HashMap<String, String>>,
    save_counts: RwLock<HashMap<String, usize>>,
    fail_saves: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text as a module's document, valid JSON or not.
    pub async fn insert_raw(&self, module: &str, raw: impl Into<String>) {
        self.documents
            .write()
            .await
            .insert(module.to_string(), raw.into());
    }

    /// Make every following save fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::Relaxed);
    }

    /// Successful saves for `module` so far.
    pub async fn save_count(&self, module: &str) -> usize {
        self.save_counts
            .read()
            .await
            .get(module)
            .copied()
            .unwrap_or(0)
    }

    pub async fn contains(&self, module: &str) -> bool {
        self.documents.read().await.contains_key(module)
    }
}

#[async_trait]
impl SignalStore for InMemoryStore {
    async fn load(&self, module: &str) -> Result<Option<ModuleDocument>> {
        let documents = self.documents.read().await;
        let Some(raw) = documents.get(module) else {
            return Ok(None);
        };
        match ModuleDocument::from_json(raw) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                tracing::warn!("Corrupt document for module '{}': {}", module, e);
                Ok(None)
            }
        }
    }

    async fn save(&self, module: &str, document: &ModuleDocument) -> Result<()> {
        if self.fail_saves.load(Ordering::Relaxed) {
            anyhow::bail!("in-memory store configured to fail saves");
        }
        let json = document.to_json()?;
        self.documents
            .write()
            .await
            .insert(module.to_string(), json);
        *self
            .save_counts
            .write()
            .await
            .entry(module.to_string())
            .or_insert(0) += 1;
        Ok(())
    }
}
