//! Persisted per-module document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One history entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub timestamp: DateTime<Utc>,
    pub input_excerpt: String,
    pub triggering_factors: BTreeMap<String, f32>,
    pub resulting_signals: BTreeMap<String, f32>,
}

/// Parameters a module tunes for itself over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TunableParameters {
    pub learning_rate: f32,
}

/// What a module hands to the signal store.
///
/// ```json
/// { "signals": {"level": 0.4}, "history": [...],
///   "tunableParameters": {"learningRate": 0.1}, "lastUpdate": "2024-..." }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDocument {
    pub signals: BTreeMap<String, f32>,
    #[serde(default)]
    pub history: Vec<HistoryEvent>,
    pub tunable_parameters: TunableParameters,
    pub last_update: DateTime<Utc>,
}

impl ModuleDocument {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
