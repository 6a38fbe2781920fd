use crate::engine::DecayMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnimaConfig {
    pub pipeline: PipelineConfig,
    pub store: StoreConfig,
    /// Per-module overrides keyed by module name.
    pub modules: BTreeMap<String, ModuleOverrides>,
}

impl AnimaConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: AnimaConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Overrides for one module; defaults when the module has no section.
    pub fn module(&self, name: &str) -> ModuleOverrides {
        self.modules.get(name).cloned().unwrap_or_default()
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("ANIMA_STORE_BACKEND") {
            match v.parse() {
                Ok(backend) => self.store.backend = backend,
                Err(e) => tracing::warn!("Ignoring ANIMA_STORE_BACKEND: {}", e),
            }
        }
        if let Ok(v) = std::env::var("ANIMA_STORE_PATH") {
            self.store.path = v;
        }
        if let Ok(v) = std::env::var("ANIMA_PERSIST_WINDOW_SECS") {
            if let Ok(n) = v.parse() {
                self.pipeline.persistence_window_secs = n;
            }
        }
        if let Ok(v) = std::env::var("ANIMA_QUEUE_CAPACITY") {
            if let Ok(n) = v.parse() {
                self.pipeline.queue_capacity = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum seconds between two persistence rounds.
    pub persistence_window_secs: u64,
    /// Requests that may wait behind the active pass before `submit` backs off.
    pub queue_capacity: usize,
    /// Default decay mode for modules without their own.
    pub decay_mode: DecayMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            persistence_window_secs: 30,
            queue_capacity: 256,
            decay_mode: DecayMode::PerPass,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// SQLite file or JSON directory, depending on the backend.
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            path: "anima.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Nothing survives a restart.
    Memory,
    #[default]
    Sqlite,
    JsonDir,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            "json_dir" | "json" => Ok(Self::JsonDir),
            other => anyhow::bail!("unknown store backend '{}'", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModuleOverrides {
    pub learning_rate: Option<f32>,
    pub history_cap: Option<usize>,
    pub decay_mode: Option<DecayMode>,
    /// Disabled modules are left out of the pipeline.
    pub enabled: bool,
}

impl Default for ModuleOverrides {
    fn default() -> Self {
        Self {
            learning_rate: None,
            history_cap: None,
            decay_mode: None,
            enabled: true,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = AnimaConfig::default();
        assert_eq!(cfg.pipeline.persistence_window_secs, 30);
        assert_eq!(cfg.pipeline.decay_mode, DecayMode::PerPass);
        assert_eq!(cfg.store.backend, StoreBackend::Sqlite);
        assert!(cfg.modules.is_empty());
        assert!(cfg.module("emotion").enabled);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[store]
backend = "json_dir"
path = "state"
"#;
        let cfg: AnimaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.store.backend, StoreBackend::JsonDir);
        assert_eq!(cfg.store.path, "state");
        // Defaults for unspecified fields
        assert_eq!(cfg.pipeline.queue_capacity, 256);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[pipeline]
persistence_window_secs = 5
queue_capacity = 16
decay_mode = { wall_clock = { unit_secs = 60.0 } }

[store]
backend = "memory"

[modules.attachment]
learning_rate = 0.2
history_cap = 400
decay_mode = "per_pass"

[modules.dreams]
enabled = false
"#;
        let cfg: AnimaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.pipeline.persistence_window_secs, 5);
        assert_eq!(
            cfg.pipeline.decay_mode,
            DecayMode::WallClock { unit_secs: 60.0 }
        );
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        let attachment = cfg.module("attachment");
        assert_eq!(attachment.learning_rate, Some(0.2));
        assert_eq!(attachment.history_cap, Some(400));
        assert_eq!(attachment.decay_mode, Some(DecayMode::PerPass));
        assert!(attachment.enabled);
        assert!(!cfg.module("dreams").enabled);
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("json-dir".parse::<StoreBackend>().unwrap(), StoreBackend::JsonDir);
        assert_eq!("SQLITE".parse::<StoreBackend>().unwrap(), StoreBackend::Sqlite);
        assert!("redis".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        // Part 1: env overrides
        std::env::set_var("ANIMA_STORE_BACKEND", "memory");
        std::env::set_var("ANIMA_PERSIST_WINDOW_SECS", "7");

        let mut cfg = AnimaConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.pipeline.persistence_window_secs, 7);

        // Clean up env vars before testing defaults
        std::env::remove_var("ANIMA_STORE_BACKEND");
        std::env::remove_var("ANIMA_PERSIST_WINDOW_SECS");

        // Part 2: nonexistent path returns defaults (no env interference)
        let cfg = AnimaConfig::load_or_default("/nonexistent/path.toml");
        assert_eq!(cfg.store.backend, StoreBackend::Sqlite);
        assert_eq!(cfg.pipeline.persistence_window_secs, 30);
    }
}
