//! Aggregate view composed from every module's latest output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Orchestrator-owned aggregate. Mutated only after a full pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalState {
    /// Module name → primary signal value.
    pub per_module_summary: BTreeMap<String, f32>,
    pub total_interactions: u64,
    pub last_update_timestamp: Option<DateTime<Utc>>,
}

impl GlobalState {
    pub fn summary(&self, module: &str) -> Option<f32> {
        self.per_module_summary.get(module).copied()
    }

    /// The `n` highest module summaries, highest first. Ties keep name order.
    pub fn most_elevated(&self, n: usize) -> Vec<(&str, f32)> {
        let mut entries: Vec<(&str, f32)> = self
            .per_module_summary
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries.truncate(n);
        entries
    }

    /// Short description for prompt assembly.
    /// NOTE: This describes HOW to behave, not WHAT is felt.
    pub fn describe_for_context(&self) -> String {
        let mut tendencies = Vec::new();

        if let Some(joy) = self.summary("emotion") {
            if joy > 0.7 {
                tendencies.push("fala com alegria e entusiasmo".to_string());
            } else if joy < 0.2 {
                tendencies.push("fala de um jeito mais quieto".to_string());
            }
        }
        if let Some(energy) = self.summary("energy") {
            if energy < 0.25 {
                tendencies.push("respostas curtas, está cansado".to_string());
            }
        }
        if let Some(curiosity) = self.summary("curiosity") {
            if curiosity > 0.7 {
                tendencies.push("faz perguntas e quer saber mais".to_string());
            }
        }

        let elevated: Vec<String> = self
            .most_elevated(3)
            .into_iter()
            .filter(|(_, v)| *v >= 0.5)
            .map(|(name, v)| format!("{} {:.0}%", name, v * 100.0))
            .collect();
        if !elevated.is_empty() {
            tendencies.push(format!("em destaque: {}", elevated.join(", ")));
        }

        if tendencies.is_empty() {
            "responde de forma natural".to_string()
        } else {
            format!("tendências atuais: {}", tendencies.join("; "))
        }
    }
}
