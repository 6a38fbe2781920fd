use anima_core::{ModuleDocument, SignalStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// One `<module>.json` file per module inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-save leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Creates the directory if needed.
    pub async fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create store directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, module: &str) -> Result<PathBuf> {
        let valid = !module.is_empty()
            && !module.starts_with('.')
            && !module.contains(['/', '\\', '\0']);
        if !valid {
            anyhow::bail!("invalid module name for file store: {:?}", module);
        }
        Ok(self.dir.join(format!("{}.json", module)))
    }
}

#[async_trait]
impl SignalStore for JsonDirStore {
    async fn load(&self, module: &str) -> Result<Option<ModuleDocument>> {
        let path = self.path_for(module)?;
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        match ModuleDocument::from_json(&json) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                tracing::warn!("Corrupt document file {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    async fn save(&self, module: &str, document: &ModuleDocument) -> Result<()> {
        let path = self.path_for(module)?;
        let tmp = self.dir.join(format!(".{}.json.tmp", module));
        let json = document
            .to_json()
            .context("Failed to serialize module document")?;
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("Failed to move document into {}", path.display()))?;
        tracing::debug!("Module '{}' saved to {}", module, path.display());
        Ok(())
    }
}
