use anima_core::{ModuleDocument, SignalStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Row, Sqlite};
use std::path::Path;

/// One row per module holding its serialized document.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_url = format!("sqlite://{}?mode=rwc", db_path.as_ref().display());
        let pool = SqlitePoolOptions::new()
            .connect(&db_url)
            .await
            .context("Failed to connect to SQLite database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Private in-memory database. A single connection, since every
    /// SQLite connection would otherwise see its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory SQLite database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS module_documents (
                module TEXT PRIMARY KEY,
                document_json TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create module_documents table")?;
        Ok(())
    }

    /// Names of every module with a stored document, sorted.
    pub async fn list_modules(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT module FROM module_documents ORDER BY module")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list module documents")?;
        Ok(rows.iter().map(|row| row.get("module")).collect())
    }

    /// Store raw text for a module, bypassing serialization.
    pub async fn save_raw(&self, module: &str, json: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO module_documents (module, document_json, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(module) DO UPDATE SET document_json = excluded.document_json, updated_at = excluded.updated_at",
        )
        .bind(module)
        .bind(json)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to save document for module '{}'", module))?;
        Ok(())
    }
}

#[async_trait]
impl SignalStore for SqliteStore {
    async fn load(&self, module: &str) -> Result<Option<ModuleDocument>> {
        let row = sqlx::query("SELECT document_json FROM module_documents WHERE module = ?")
            .bind(module)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to query module_documents")?;

        let Some(row) = row else {
            return Ok(None);
        };
        let json: String = row.get("document_json");
        match ModuleDocument::from_json(&json) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                tracing::warn!("Corrupt document for module '{}': {}", module, e);
                Ok(None)
            }
        }
    }

    async fn save(&self, module: &str, document: &ModuleDocument) -> Result<()> {
        let json = document
            .to_json()
            .context("Failed to serialize module document")?;
        self.save_raw(module, &json).await?;
        tracing::debug!("Module '{}' saved", module);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_document;

    #[tokio::test]
    async fn test_missing_module_is_none() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(store.load("emotion").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_reproduces_document() {
        let store = SqliteStore::in_memory().await.unwrap();
        let doc = sample_document(0.42);
        store.save("attachment", &doc).await.unwrap();
        assert_eq!(store.load("attachment").await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn test_save_upserts() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.save("mood", &sample_document(0.1)).await.unwrap();
        store.save("mood", &sample_document(0.9)).await.unwrap();
        let loaded = store.load("mood").await.unwrap().unwrap();
        assert_eq!(loaded.signals["level"], 0.9);
        assert_eq!(store.list_modules().await.unwrap(), vec!["mood".to_string()]);
    }

    #[tokio::test]
    async fn test_corrupt_row_reads_as_missing() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.save_raw("emotion", "{\"signals\": 3").await.unwrap();
        assert!(store.load("emotion").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anima.db");
        let doc = sample_document(0.7);
        {
            let store = SqliteStore::new(&path).await.unwrap();
            store.save("curiosity", &doc).await.unwrap();
            store.save("emotion", &doc).await.unwrap();
        }
        let reopened = SqliteStore::new(&path).await.unwrap();
        assert_eq!(reopened.load("curiosity").await.unwrap(), Some(doc));
        assert_eq!(
            reopened.list_modules().await.unwrap(),
            vec!["curiosity".to_string(), "emotion".to_string()]
        );
    }
}
