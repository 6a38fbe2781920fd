//! Per-message context handed to every module alongside the raw text.

use crate::module::ModuleResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Optional metadata about an incoming message.
///
/// Every field is optional. Absent fields contribute nothing to factor
/// extraction and are never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputContext {
    /// Social role of the speaker relative to the persona ("mamãe", "amigo", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    /// Caller-supplied emotional intensity in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_intensity_hint: Option<f32>,
    /// Module-specific fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl InputContext {
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_participant(mut self, id: impl Into<String>) -> Self {
        self.participant_id = Some(id.into());
        self
    }

    pub fn with_intensity_hint(mut self, hint: f32) -> Self {
        self.emotional_intensity_hint = Some(hint);
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Intensity hint clamped to `[0, 1]`; non-finite hints are ignored.
    pub fn intensity_hint(&self) -> Option<f32> {
        self.emotional_intensity_hint
            .filter(|h| h.is_finite())
            .map(|h| h.clamp(0.0, 1.0))
    }

    /// Numeric reading of a module-specific field: numbers clamp to `[0, 1]`,
    /// `true` reads as 1. Anything else is no contribution.
    pub fn value_magnitude(&self, key: &str) -> Option<f32> {
        match self.extra.get(key)? {
            serde_json::Value::Bool(true) => Some(1.0),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(|v| v as f32)
                .filter(|v| v.is_finite())
                .map(|v| v.clamp(0.0, 1.0)),
            _ => None,
        }
    }
}

/// Everything a module sees for one pass.
pub struct ModuleInput<'a> {
    pub text: &'a str,
    /// Lowercased text, computed once per module call.
    pub normalized: String,
    pub context: &'a InputContext,
    /// Results of the modules that already ran in this pass, in order.
    pub upstream: &'a [ModuleResult],
    pub now: DateTime<Utc>,
}

impl<'a> ModuleInput<'a> {
    pub fn new(
        text: &'a str,
        context: &'a InputContext,
        upstream: &'a [ModuleResult],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            text,
            normalized: text.to_lowercase(),
            context,
            upstream,
            now,
        }
    }

    /// A signal from an earlier module in the same pass. Failed modules are skipped.
    pub fn upstream_signal(&self, module: &str, signal: &str) -> Option<f32> {
        self.upstream
            .iter()
            .find(|r| r.module == module && r.error.is_none())
            .and_then(|r| r.signals_after.get(signal))
    }

    /// First `max_chars` characters of the raw text.
    pub fn excerpt(&self, max_chars: usize) -> String {
        self.text.chars().take(max_chars).collect()
    }
}
