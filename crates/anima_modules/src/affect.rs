//! Fast affect: momentary emotion and the slower mood that follows it.

use crate::lexicon::{CAREGIVERS, EXCITED_PATTERN, LOVE, PRAISE, SCOLDING, TIRED};
use anima_core::{ConfigError, InsightRule, LearningRateSpec, ModuleConfig, Polarity, Rule, SignalSpec};

const ANGER: &[&str] = &["raiva", "bravo", "brava", "odeio", "injusto", "angry"];
const FEAR: &[&str] = &["medo", "escuro", "monstro", "assustad", "scared", "afraid"];

/// Emotion reacts first and hardest; everything downstream reads it.
pub fn emotion() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("emotion")
        .signal(SignalSpec::new("joy", 0.5, 0.95).baseline(0.4))
        .signal(SignalSpec::new("sadness", 0.1, 0.95))
        .signal(SignalSpec::new("anger", 0.05, 0.9))
        .signal(SignalSpec::new("fear", 0.1, 0.93))
        .signal(SignalSpec::new("surprise", 0.1, 0.85))
        .signal(SignalSpec::new("affection", 0.5, 0.98).baseline(0.4))
        .rule(
            Rule::keywords("love", LOVE)
                .magnitude(0.8)
                .scaled_by_role(CAREGIVERS)
                .target("affection", 1.0)
                .target("joy", 0.5),
        )
        .rule(Rule::keywords("praise", PRAISE).magnitude(0.6).target("joy", 0.8))
        .rule(
            Rule::sentiment("positive_tone", Polarity::Positive)
                .target("joy", 0.6)
                .target("sadness", -0.3),
        )
        .rule(
            Rule::sentiment("negative_tone", Polarity::Negative)
                .target("sadness", 0.6)
                .target("joy", -0.4),
        )
        .rule(
            Rule::keywords("anger_words", ANGER)
                .magnitude(0.7)
                .scaled_by_intensity()
                .target("anger", 1.0),
        )
        .rule(Rule::keywords("fear_words", FEAR).magnitude(0.7).target("fear", 1.0))
        .rule(
            Rule::pattern("exclamation", r"\b(uau|nossa|caramba|wow)\b|!{2,}")
                .magnitude(0.6)
                .target("surprise", 1.0),
        )
        .rule(
            Rule::keywords("scolded", SCOLDING)
                .magnitude(0.5)
                .target("sadness", 0.6)
                .target("anger", 0.3),
        )
        .rule(
            Rule::role("caregiver_present", CAREGIVERS)
                .magnitude(0.3)
                .target("affection", 0.5)
                .target("fear", -0.3),
        )
        .insight(InsightRule::rising("joy", 0.8, "está muito feliz agora ({value})"))
        .insight(InsightRule::rising("sadness", 0.6, "ficou triste ({value})"))
        .insight(InsightRule::rising("fear", 0.6, "está com medo ({value})"))
        .insight(InsightRule::rising("affection", 0.85, "sente muito carinho ({value})"))
        .history_cap(300)
        .learning_rate(LearningRateSpec::new(0.15, 0.02, 0.5))
        .build()
}

pub fn mood() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("mood")
        .signal(SignalSpec::new("valence", 0.5, 0.98).baseline(0.5))
        .signal(SignalSpec::new("energy", 0.5, 0.97).baseline(0.5))
        .signal(SignalSpec::new("irritability", 0.1, 0.95))
        .rule(
            Rule::upstream("joyful", "emotion", "joy", 0.6)
                .target("valence", 0.5)
                .target("irritability", -0.3),
        )
        .rule(Rule::upstream("saddened", "emotion", "sadness", 0.4).target("valence", -0.6))
        .rule(
            Rule::upstream("angered", "emotion", "anger", 0.4)
                .target("irritability", 0.8)
                .target("valence", -0.3),
        )
        .rule(
            Rule::keywords("tired", TIRED)
                .magnitude(0.6)
                .target("energy", -1.0)
                .target("irritability", 0.3),
        )
        .rule(Rule::pattern("excited", EXCITED_PATTERN).magnitude(0.5).target("energy", 0.6))
        .rule(Rule::intensity("intensity").target("energy", 0.4))
        .insight(InsightRule::falling("valence", 0.3, "está de mau humor ({value})"))
        .insight(InsightRule::rising("irritability", 0.6, "anda irritado ({value})"))
        .build()
}
