//! Cognition: curiosity, learning, language, memory and imagination.

use crate::lexicon::{PRAISE, QUESTION_PATTERN, STORY, TIRED};
use anima_core::{ConfigError, InsightRule, ModuleConfig, Rule, SignalSpec};

const NOVELTY: &[&str] = &[
    "novo", "nova", "descobri", "sabia que", "olha só", "look", "new",
];
const NATURE: &[&str] = &[
    "estrela", "planeta", "dinossauro", "bicho", "animal", "céu", "oceano", "space",
];
const REPETITION: &[&str] = &["de novo", "outra vez", "mesma coisa", "again"];
const TEACHING: &[&str] = &[
    "aprend", "ensinar", "explica", "escola", "lição", "significa", "learn", "teach",
];
const WORDPLAY: &[&str] = &["rima", "trava-língua", "adivinha", "charada", "rhyme"];
const REMEMBER: &[&str] = &[
    "lembra", "lembro", "remember", "ontem", "aquele dia", "da outra vez",
];
const FORGET: &[&str] = &["esquec", "forgot"];
const PRETEND: &[&str] = &[
    "faz de conta", "vamos fingir", "imagina se", "e se ", "pretend", "what if",
];
const ART: &[&str] = &["desenh", "pintar", "cores", "música", "cantar", "draw"];

pub fn curiosity() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("curiosity")
        .signal(SignalSpec::new("curiosity", 0.6, 0.97).baseline(0.5))
        .signal(SignalSpec::new("wonder", 0.4, 0.95))
        .signal(SignalSpec::new("boredom", 0.2, 0.96))
        .rule(
            Rule::pattern("question", QUESTION_PATTERN)
                .magnitude(0.6)
                .target("curiosity", 0.7)
                .target("boredom", -0.5),
        )
        .rule(
            Rule::keywords("novelty", NOVELTY)
                .magnitude(0.6)
                .target("wonder", 0.8)
                .target("curiosity", 0.4),
        )
        .rule(
            Rule::keywords("nature", NATURE)
                .magnitude(0.5)
                .target("wonder", 0.6)
                .target("curiosity", 0.5),
        )
        .rule(
            Rule::keywords("repetition", REPETITION)
                .magnitude(0.4)
                .target("boredom", 0.7)
                .target("curiosity", -0.3),
        )
        .rule(Rule::upstream("surprised", "emotion", "surprise", 0.5).magnitude(0.5).target("wonder", 0.5))
        .insight(InsightRule::rising("curiosity", 0.8, "está curiosíssimo ({value})"))
        .insight(InsightRule::rising("boredom", 0.6, "está entediado ({value})"))
        .history_cap(250)
        .build()
}

pub fn learning() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("learning")
        .signal(SignalSpec::new("knowledge", 0.3, 0.999).baseline(0.3))
        .signal(SignalSpec::new("focus", 0.5, 0.95).baseline(0.5))
        .signal(SignalSpec::new("progress", 0.3, 0.98))
        .rule(
            Rule::keywords("lesson", TEACHING)
                .magnitude(0.7)
                .target("knowledge", 0.6)
                .target("focus", 0.5),
        )
        .rule(
            Rule::pattern("arithmetic", r"\d+\s*(\+|-|x|vezes|mais|menos)\s*\d+")
                .magnitude(0.6)
                .target("progress", 0.8)
                .target("focus", 0.4),
        )
        .rule(Rule::keywords("praised", PRAISE).magnitude(0.5).target("progress", 0.6))
        .rule(
            Rule::upstream("inquisitive", "curiosity", "curiosity", 0.7)
                .magnitude(0.5)
                .target("focus", 0.5),
        )
        .rule(Rule::keywords("tired", TIRED).magnitude(0.5).target("focus", -0.8))
        .insight(InsightRule::rising("progress", 0.7, "está aprendendo rápido ({value})"))
        .history_cap(300)
        .build()
}

pub fn language() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("language")
        .signal(SignalSpec::new("vocabulary", 0.3, 0.999).baseline(0.3))
        .signal(SignalSpec::new("fluency", 0.4, 0.99).baseline(0.4))
        .signal(SignalSpec::new("wordplay", 0.3, 0.95))
        .primary("fluency")
        .rule(
            Rule::min_length("long_message", 60)
                .magnitude(0.5)
                .target("vocabulary", 0.4)
                .target("fluency", 0.3),
        )
        .rule(
            Rule::pattern("new_word", r"o que (é|significa)|what does .+ mean|\bpalavra\b")
                .magnitude(0.7)
                .target("vocabulary", 0.8),
        )
        .rule(Rule::keywords("word_games", WORDPLAY).magnitude(0.6).target("wordplay", 1.0))
        .rule(
            Rule::pattern("english", r"\b(the|and|you|hello|please)\b")
                .magnitude(0.4)
                .target("vocabulary", 0.3),
        )
        .build()
}

/// Salience tracks how strongly the current moment will be remembered.
pub fn memory() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("memory")
        .signal(SignalSpec::new("recall", 0.5, 0.98).baseline(0.5))
        .signal(SignalSpec::new("salience", 0.2, 0.9))
        .signal(SignalSpec::new("nostalgia", 0.1, 0.96))
        .rule(
            Rule::keywords("reminded", REMEMBER)
                .magnitude(0.7)
                .target("recall", 0.8)
                .target("nostalgia", 0.5),
        )
        .rule(Rule::keywords("forgetting", FORGET).magnitude(0.6).target("recall", -0.6))
        .rule(Rule::intensity("vivid").target("salience", 1.0))
        .rule(
            Rule::upstream("happy_moment", "emotion", "joy", 0.8)
                .magnitude(0.6)
                .target("salience", 0.6),
        )
        .rule(
            Rule::upstream("scary_moment", "emotion", "fear", 0.6)
                .magnitude(0.6)
                .target("salience", 0.8),
        )
        .history_cap(500)
        .build()
}

pub fn imagination() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("imagination")
        .signal(SignalSpec::new("creativity", 0.5, 0.98).baseline(0.5))
        .signal(SignalSpec::new("fantasy", 0.3, 0.95))
        .signal(SignalSpec::new("storytelling", 0.3, 0.96))
        .rule(
            Rule::keywords("story", STORY)
                .magnitude(0.7)
                .target("storytelling", 1.0)
                .target("fantasy", 0.5),
        )
        .rule(
            Rule::keywords("pretend", PRETEND)
                .magnitude(0.7)
                .target("fantasy", 1.0)
                .target("creativity", 0.4),
        )
        .rule(Rule::keywords("art", ART).magnitude(0.6).target("creativity", 0.8))
        .rule(
            Rule::upstream("wondering", "curiosity", "wonder", 0.6)
                .magnitude(0.5)
                .target("creativity", 0.4)
                .target("fantasy", 0.3),
        )
        .insight(InsightRule::rising("fantasy", 0.7, "está no mundo da imaginação ({value})"))
        .build()
}
