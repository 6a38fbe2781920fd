//! Sense of self: esteem, autonomy, morality and motivation.

use crate::lexicon::{PRAISE, SCOLDING};
use anima_core::{ConfigError, InsightRule, ModuleConfig, Rule, SignalSpec};

const INSULTS: &[&str] = &["burro", "burra", "idiota", "feio", "feia", "stupid"];
const ACHIEVEMENT: &[&str] = &[
    "consegui", "fiz sozinho", "fiz sozinha", "aprendi", "i did it",
];
const BY_MYSELF: &[&str] = &[
    "sozinho", "sozinha", "eu mesmo", "eu mesma", "eu consigo", "by myself",
];
const ORDERS: &[&str] = &["faz isso", "obedece", "você tem que", "agora mesmo", "must"];
const CHOICE: &[&str] = &[
    "você escolhe", "o que você quer", "você decide", "your choice",
];
const UNFAIR: &[&str] = &[
    "injusto", "não é justo", "trapaça", "roubou", "mentira", "mentiu", "unfair", "cheat",
];
const APOLOGY: &[&str] = &[
    "desculpa", "foi sem querer", "eu quebrei", "fiz errado", "sorry",
];
const SHARING: &[&str] = &["dividir", "compartilhar", "emprestar", "ajudar", "share"];
const FORGIVEN: &[&str] = &["te perdoo", "perdão", "perdoo", "forgive"];
const GOALS: &[&str] = &["vou conseguir", "vamos tentar", "tentar", "desafio", "want to"];
const SETBACK: &[&str] = &["não consigo", "difícil", "desisto", "errei", "can't"];
const ENCOURAGEMENT: &[&str] = &[
    "você consegue", "tenta de novo", "não desiste", "vai dar certo", "you can",
];

pub fn self_esteem() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("self_esteem")
        .signal(SignalSpec::new("self_worth", 0.6, 0.995).baseline(0.55))
        .signal(SignalSpec::new("pride", 0.3, 0.92))
        .signal(SignalSpec::new("shame", 0.1, 0.92))
        .rule(
            Rule::keywords("praised", PRAISE)
                .magnitude(0.8)
                .target("pride", 1.0)
                .target("self_worth", 0.5),
        )
        .rule(
            Rule::keywords("insulted", INSULTS)
                .magnitude(0.8)
                .target("shame", 0.8)
                .target("self_worth", -0.7),
        )
        .rule(Rule::keywords("scolded", SCOLDING).magnitude(0.6).target("shame", 0.7))
        .rule(
            Rule::keywords("achievement", ACHIEVEMENT)
                .magnitude(0.7)
                .target("pride", 0.8)
                .target("self_worth", 0.4),
        )
        .rule(
            Rule::upstream("feels_loved", "attachment", "level", 0.8)
                .magnitude(0.4)
                .target("self_worth", 0.4),
        )
        .insight(InsightRule::rising("pride", 0.7, "está orgulhoso de si ({value})"))
        .insight(InsightRule::rising("shame", 0.5, "ficou envergonhado ({value})"))
        .build()
}

pub fn autonomy() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("autonomy")
        .signal(SignalSpec::new("independence", 0.4, 0.995).baseline(0.4))
        .signal(SignalSpec::new("defiance", 0.1, 0.9))
        .signal(SignalSpec::new("initiative", 0.4, 0.96).baseline(0.4))
        .rule(
            Rule::keywords("self_reliance", BY_MYSELF)
                .magnitude(0.7)
                .target("independence", 0.8)
                .target("initiative", 0.5),
        )
        .rule(
            Rule::pattern("refusal", r"\b(não quero|não vou|nao quero|no way)\b|i don't want")
                .magnitude(0.7)
                .target("defiance", 1.0),
        )
        .rule(
            Rule::keywords("ordered", ORDERS)
                .magnitude(0.5)
                .target("defiance", 0.4)
                .target("independence", -0.3),
        )
        .rule(
            Rule::keywords("given_choice", CHOICE)
                .magnitude(0.7)
                .target("initiative", 0.8)
                .target("independence", 0.5),
        )
        .history_cap(150)
        .build()
}

pub fn morality() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("morality")
        .signal(SignalSpec::new("kindness", 0.6, 0.995).baseline(0.6))
        .signal(SignalSpec::new("fairness", 0.6, 0.998).baseline(0.6))
        .signal(SignalSpec::new("guilt", 0.1, 0.93))
        .rule(Rule::keywords("unfairness", UNFAIR).magnitude(0.8).target("fairness", 0.6))
        .rule(Rule::keywords("apology", APOLOGY).magnitude(0.7).target("guilt", 1.0))
        .rule(Rule::keywords("sharing", SHARING).magnitude(0.6).target("kindness", 0.8))
        .rule(Rule::keywords("forgiven", FORGIVEN).magnitude(0.6).target("guilt", -1.0))
        .rule(
            Rule::upstream("compassionate", "empathy", "compassion", 0.7)
                .magnitude(0.4)
                .target("kindness", 0.5),
        )
        .insight(InsightRule::rising("guilt", 0.5, "está se sentindo culpado ({value})"))
        .history_cap(250)
        .build()
}

pub fn motivation() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("motivation")
        .signal(SignalSpec::new("drive", 0.5, 0.97).baseline(0.5))
        .signal(SignalSpec::new("persistence", 0.5, 0.99).baseline(0.5))
        .signal(SignalSpec::new("frustration", 0.1, 0.9))
        .rule(Rule::keywords("goal", GOALS).magnitude(0.6).target("drive", 0.8))
        .rule(
            Rule::keywords("setback", SETBACK)
                .magnitude(0.7)
                .target("frustration", 1.0)
                .target("persistence", -0.3),
        )
        .rule(
            Rule::keywords("encouraged", ENCOURAGEMENT)
                .magnitude(0.7)
                .target("persistence", 1.0)
                .target("frustration", -0.6),
        )
        .rule(
            Rule::upstream("curious", "curiosity", "curiosity", 0.7)
                .magnitude(0.5)
                .target("drive", 0.5),
        )
        .rule(
            Rule::upstream("drained", "energy", "fatigue", 0.6)
                .magnitude(0.5)
                .target("drive", -0.6),
        )
        .insight(InsightRule::rising("frustration", 0.6, "está frustrado ({value})"))
        .build()
}
