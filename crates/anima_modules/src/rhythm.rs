//! Daily rhythm and dreams.

use anima_core::{ConfigError, InsightRule, ModuleConfig, Rule, SignalSpec};

const CHORES: &[&str] = &[
    "almoço", "jantar", "banho", "escovar", "café da manhã", "lunch", "bath",
];
const CHANGE: &[&str] = &[
    "mudança", "viagem", "diferente", "hoje não", "cancelou", "surpresa",
];
const LATER: &[&str] = &["amanhã", "depois", "mais tarde", "fim de semana", "tomorrow"];
const DREAM: &[&str] = &["sonhei", "sonho", "sonhar", "dream"];
const WISH: &[&str] = &["quando eu crescer", "quero ser", "um dia", "desejo", "wish"];
const NIGHTMARE: &[&str] = &["pesadelo", "nightmare"];

pub fn routine() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("routine")
        .signal(SignalSpec::new("regularity", 0.5, 0.995).baseline(0.5))
        .signal(SignalSpec::new("anticipation", 0.3, 0.95))
        .signal(SignalSpec::new("disruption", 0.1, 0.9))
        .rule(
            Rule::pattern("time_of_day", r"\b(bom dia|boa tarde|boa noite|hora d[eoa])\b")
                .magnitude(0.6)
                .target("regularity", 0.6)
                .target("disruption", -0.3),
        )
        .rule(Rule::keywords("chores", CHORES).magnitude(0.6).target("regularity", 0.5))
        .rule(
            Rule::keywords("change_of_plans", CHANGE)
                .magnitude(0.6)
                .target("disruption", 1.0)
                .target("regularity", -0.4),
        )
        .rule(Rule::keywords("looking_ahead", LATER).magnitude(0.6).target("anticipation", 0.8))
        .insight(InsightRule::rising("disruption", 0.5, "estranha a mudança de rotina ({value})"))
        .build()
}

pub fn dreams() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("dreams")
        .signal(SignalSpec::new("dreaminess", 0.3, 0.95))
        .signal(SignalSpec::new("hope", 0.5, 0.99).baseline(0.5))
        .signal(SignalSpec::new("nightmare", 0.05, 0.85))
        .rule(Rule::keywords("dreaming", DREAM).magnitude(0.8).target("dreaminess", 1.0))
        .rule(
            Rule::keywords("wish", WISH)
                .magnitude(0.7)
                .target("hope", 0.8)
                .target("dreaminess", 0.4),
        )
        .rule(
            Rule::keywords("bad_dream", NIGHTMARE)
                .magnitude(0.8)
                .target("nightmare", 1.0)
                .target("hope", -0.3),
        )
        .rule(
            Rule::upstream("sleepy", "energy", "fatigue", 0.7)
                .magnitude(0.5)
                .target("dreaminess", 0.6),
        )
        .rule(
            Rule::upstream("fantasizing", "imagination", "fantasy", 0.6)
                .magnitude(0.4)
                .target("dreaminess", 0.5)
                .target("hope", 0.3),
        )
        .insight(InsightRule::rising("nightmare", 0.4, "ainda pensa no pesadelo ({value})"))
        .history_cap(150)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{pass, upstream_result};
    use anima_core::InputContext;

    #[test]
    fn test_change_of_plans_disrupts() {
        let result = pass(routine().unwrap(), "hoje não tem escola, vamos viajar de surpresa", &InputContext::default(), &[]);
        assert!(result.delta("disruption").unwrap() > 0.0);
        assert!(result.delta("regularity").unwrap() < 0.0);
    }

    #[test]
    fn test_nightmare() {
        let result = pass(dreams().unwrap(), "tive um pesadelo", &InputContext::default(), &[]);
        assert!(result.delta("nightmare").unwrap() > 0.0);
        assert!(result.delta("hope").unwrap() < 0.0);
    }

    #[test]
    fn test_fantasy_spills_into_dreams() {
        let up = upstream_result("imagination", &[("fantasy", 0.9)]);
        let result = pass(dreams().unwrap(), "", &InputContext::default(), &[up]);
        assert!(result.factors.contains_key("fantasizing"));
        assert!(result.delta("hope").unwrap() > 0.0);
    }
}
