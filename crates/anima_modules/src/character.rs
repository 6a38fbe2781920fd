//! Slow-moving character: personality traits, reflection and the way the
//! persona speaks. All three read heavily from earlier modules in the pass.

use anima_core::{ConfigError, InsightRule, LearningRateSpec, ModuleConfig, Rule, SignalSpec};

const CONFUSION: &[&str] = &[
    "não entendi", "confuso", "confusa", "como assim", "não sei", "confused",
];
const POLITE: &[&str] = &["por favor", "senhor", "senhora", "please"];
const SLANG: &[&str] = &["mano", "tipo assim", " né", "vc ", "tbm", "kkk"];

/// Traits barely move per pass; they integrate what the faster modules report.
pub fn personality() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("personality")
        .signal(SignalSpec::new("warmth", 0.6, 0.999).baseline(0.6))
        .signal(SignalSpec::new("openness", 0.6, 0.999).baseline(0.6))
        .signal(SignalSpec::new("extraversion", 0.5, 0.999).baseline(0.5))
        .signal(SignalSpec::new("stability", 0.6, 0.999).baseline(0.6))
        .rule(Rule::upstream("inquisitive", "curiosity", "curiosity", 0.7).target("openness", 0.5))
        .rule(Rule::upstream("creative", "imagination", "creativity", 0.7).target("openness", 0.3))
        .rule(Rule::upstream("attached", "attachment", "level", 0.8).target("warmth", 0.5))
        .rule(Rule::upstream("caring", "empathy", "compassion", 0.7).target("warmth", 0.4))
        .rule(Rule::upstream("outgoing", "social", "sociability", 0.7).target("extraversion", 0.5))
        .rule(Rule::upstream("withdrawn", "social", "shyness", 0.6).target("extraversion", -0.5))
        .rule(Rule::upstream("irritable", "mood", "irritability", 0.6).target("stability", -0.5))
        .rule(Rule::upstream("secure", "safety", "safety", 0.8).target("stability", 0.3))
        .history_cap(500)
        .learning_rate(LearningRateSpec::new(0.05, 0.01, 0.15).step(0.002))
        .build()
}

pub fn reflection() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("reflection")
        .signal(SignalSpec::new("self_awareness", 0.3, 0.998).baseline(0.3))
        .signal(SignalSpec::new("introspection", 0.2, 0.95))
        .signal(SignalSpec::new("clarity", 0.5, 0.98).baseline(0.5))
        .rule(
            Rule::pattern(
                "asked_about_self",
                r"\b(você é|quem é você|o que você sente|como você está|você acha)|who are you|how do you feel",
            )
            .magnitude(0.8)
            .target("self_awareness", 0.6)
            .target("introspection", 1.0),
        )
        .rule(
            Rule::pattern("asked_why", r"\b(por que|por quê|porque) você\b")
                .magnitude(0.6)
                .target("introspection", 0.6)
                .target("clarity", 0.3),
        )
        .rule(Rule::keywords("confusion", CONFUSION).magnitude(0.6).target("clarity", -0.8))
        .rule(
            Rule::upstream("remorse", "morality", "guilt", 0.5)
                .magnitude(0.5)
                .target("introspection", 0.6),
        )
        .rule(
            Rule::upstream("embarrassed", "self_esteem", "shame", 0.5)
                .magnitude(0.5)
                .target("introspection", 0.4)
                .target("self_awareness", 0.3),
        )
        .rule(Rule::min_length("long_thought", 160).magnitude(0.3).target("introspection", 0.5))
        .insight(InsightRule::rising("introspection", 0.6, "está pensativo ({value})"))
        .build()
}

/// Consumes emotion, mood and language from the same pass.
pub fn speaking_style() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("speaking_style")
        .signal(SignalSpec::new("expressiveness", 0.5, 0.95).baseline(0.5))
        .signal(SignalSpec::new("formality", 0.3, 0.99).baseline(0.3))
        .signal(SignalSpec::new("verbosity", 0.5, 0.95).baseline(0.5))
        .signal(SignalSpec::new("tenderness", 0.4, 0.95).baseline(0.4))
        .rule(Rule::upstream("cheerful", "emotion", "joy", 0.6).target("expressiveness", 0.8))
        .rule(Rule::upstream("tender", "emotion", "affection", 0.6).target("tenderness", 0.8))
        .rule(
            Rule::upstream("subdued", "emotion", "sadness", 0.5)
                .target("expressiveness", -0.5)
                .target("verbosity", -0.4),
        )
        .rule(Rule::upstream("lively", "mood", "energy", 0.6).target("verbosity", 0.5))
        .rule(
            Rule::upstream("cranky", "mood", "irritability", 0.5)
                .target("verbosity", -0.5)
                .target("tenderness", -0.4),
        )
        .rule(
            Rule::upstream("articulate", "language", "fluency", 0.6)
                .target("verbosity", 0.4)
                .target("formality", 0.2),
        )
        .rule(
            Rule::upstream("playful_words", "language", "wordplay", 0.5)
                .target("expressiveness", 0.4),
        )
        .rule(Rule::keywords("polite", POLITE).magnitude(0.5).target("formality", 0.6))
        .rule(Rule::keywords("slang", SLANG).magnitude(0.4).target("formality", -0.6))
        .history_cap(150)
        .build()
}
