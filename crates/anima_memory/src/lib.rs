pub mod json_dir;
pub mod sqlite;

pub use json_dir::JsonDirStore;
pub use sqlite::SqliteStore;

use anima_core::{InMemoryStore, SignalStore, StoreBackend, StoreConfig};
use anyhow::Result;
use std::sync::Arc;

/// Open the store selected in the config.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn SignalStore>> {
    let store: Arc<dyn SignalStore> = match config.backend {
        StoreBackend::Memory => Arc::new(InMemoryStore::new()),
        StoreBackend::Sqlite => Arc::new(SqliteStore::new(&config.path).await?),
        StoreBackend::JsonDir => Arc::new(JsonDirStore::new(&config.path).await?),
    };
    tracing::info!("Signal store: {:?} ({})", config.backend, config.path);
    Ok(store)
}

#[cfg(test)]
pub(crate) mod testing {
    use anima_core::{HistoryEvent, ModuleDocument, TunableParameters};
    use chrono::Utc;
    use std::collections::BTreeMap;

    pub fn sample_document(level: f32) -> ModuleDocument {
        let now = Utc::now();
        ModuleDocument {
            signals: BTreeMap::from([
                ("level".to_string(), level),
                ("confidence".to_string(), 0.5),
            ]),
            history: vec![HistoryEvent {
                timestamp: now,
                input_excerpt: "eu te amo".to_string(),
                triggering_factors: BTreeMap::from([("love".to_string(), 0.8)]),
                resulting_signals: BTreeMap::from([("level".to_string(), level)]),
            }],
            tunable_parameters: TunableParameters { learning_rate: 0.12 },
            last_update: now,
        }
    }
}
