//! Bodily state: energy, basic needs and felt safety.

use crate::lexicon::{CAREGIVERS, STRANGERS, TIRED};
use anima_core::{ConfigError, InsightRule, LearningRateSpec, ModuleConfig, Rule, SignalSpec};

const RESTED: &[&str] = &[
    "acordei", "descansad", "dormi bem", "cochilo", "rested",
];
const HUNGRY: &[&str] = &["fome", "comer", "comida", "lanche", "hungry"];
const FED: &[&str] = &["já comi", "almocei", "jantei", "lanchei", "delícia", "gostoso"];
const CUDDLE: &[&str] = &["abraço", "colo", "cafuné", "beijo", "hug"];
const DISCOMFORT: &[&str] = &["frio", "calor", "dói", "doendo", "dodói", "hurts"];
const DANGER: &[&str] = &[
    "perigo", "cuidado", "fogo", "monstro", "ladrão", "danger",
];
const REASSURANCE: &[&str] = &[
    "calma", "tudo bem", "não tenha medo", "estou aqui", "seguro", "protejo",
];

pub fn energy() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("energy")
        .signal(SignalSpec::new("energy", 0.7, 0.98).baseline(0.6))
        .signal(SignalSpec::new("fatigue", 0.2, 0.96).baseline(0.1))
        .signal(SignalSpec::new("restlessness", 0.2, 0.93))
        .rule(
            Rule::keywords("tired", TIRED)
                .magnitude(0.8)
                .target("fatigue", 1.0)
                .target("energy", -0.8),
        )
        .rule(
            Rule::keywords("rested", RESTED)
                .magnitude(0.6)
                .target("energy", 0.8)
                .target("fatigue", -0.7),
        )
        .rule(
            Rule::pattern("agitation", r"!{2,}|\b(corre|pula|bora)\b")
                .magnitude(0.5)
                .target("restlessness", 0.8)
                .target("energy", 0.3),
        )
        .rule(
            Rule::upstream("worn_out_by_play", "play", "excitement", 0.6)
                .magnitude(0.5)
                .target("energy", -0.3)
                .target("restlessness", 0.5),
        )
        .rule(
            Rule::context_value("slept", "asleep")
                .target("energy", 0.6)
                .target("fatigue", -1.0),
        )
        .rule(
            Rule::pattern("late_hour", r"\b(boa noite|meia-noite|tarde da noite|good night)\b")
                .magnitude(0.6)
                .target("fatigue", 0.6),
        )
        .insight(InsightRule::falling("energy", 0.25, "está sem energia ({value})"))
        .insight(InsightRule::rising("fatigue", 0.7, "está muito cansado ({value})"))
        .build()
}

/// Hunger relaxes toward a baseline above its initial value, so it builds
/// up on its own between meals.
pub fn needs() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("needs")
        .signal(SignalSpec::new("comfort", 0.6, 0.98).baseline(0.5))
        .signal(SignalSpec::new("hunger", 0.3, 0.98).baseline(0.6))
        .signal(SignalSpec::new("rest_need", 0.3, 0.99).baseline(0.5))
        .rule(Rule::keywords("hungry", HUNGRY).magnitude(0.7).target("hunger", 0.8))
        .rule(
            Rule::keywords("fed", FED)
                .magnitude(0.7)
                .target("hunger", -1.0)
                .target("comfort", 0.4),
        )
        .rule(Rule::keywords("cuddled", CUDDLE).magnitude(0.6).target("comfort", 1.0))
        .rule(
            Rule::upstream("fatigued", "energy", "fatigue", 0.6)
                .magnitude(0.6)
                .target("rest_need", 1.0),
        )
        .rule(Rule::keywords("discomfort", DISCOMFORT).magnitude(0.6).target("comfort", -0.8))
        .insight(InsightRule::rising("hunger", 0.75, "está com fome ({value})"))
        .history_cap(150)
        .build()
}

pub fn safety() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("safety")
        .signal(SignalSpec::new("safety", 0.7, 0.99).baseline(0.7))
        .signal(SignalSpec::new("threat", 0.1, 0.9))
        .signal(SignalSpec::new("trust", 0.5, 0.995).baseline(0.5))
        .rule(
            Rule::keywords("danger", DANGER)
                .magnitude(0.8)
                .target("threat", 1.0)
                .target("safety", -0.6),
        )
        .rule(Rule::pattern("shouting", r"!{3,}").magnitude(0.5).target("threat", 0.5))
        .rule(
            Rule::role("protector", CAREGIVERS)
                .magnitude(0.6)
                .target("safety", 0.6)
                .target("trust", 0.5)
                .target("threat", -0.5),
        )
        .rule(
            Rule::keywords("reassured", REASSURANCE)
                .magnitude(0.7)
                .target("safety", 0.8)
                .target("threat", -0.8),
        )
        .rule(
            Rule::upstream("frightened", "emotion", "fear", 0.5)
                .magnitude(0.6)
                .target("threat", 0.6)
                .target("safety", -0.4),
        )
        .rule(
            Rule::role("stranger", STRANGERS)
                .magnitude(0.7)
                .target("trust", -0.6)
                .target("threat", 0.3),
        )
        .insight(InsightRule::falling("safety", 0.4, "não se sente seguro ({value})"))
        .insight(InsightRule::rising("threat", 0.6, "percebe perigo ({value})"))
        .history_cap(300)
        .learning_rate(LearningRateSpec::new(0.12, 0.02, 0.4))
        .build()
}
