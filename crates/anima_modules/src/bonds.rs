//! Relationships: attachment to caregivers, family, friends and empathy.

use crate::lexicon::{CAREGIVERS, FAREWELL, GREETING_PATTERN, LOVE, SOCIAL_CIRCLE, STRANGERS};
use anima_core::{ConfigError, InsightRule, LearningRateSpec, ModuleConfig, Rule, SignalSpec};

const REJECTION: &[&str] = &[
    "vai embora", "não gosto de você", "nao gosto de voce", "te odeio", "me deixa", "go away",
];
const COMFORT: &[&str] = &[
    "estou aqui", "tô aqui", "volto logo", "não vou te deixar", "abraço", "colo",
];
const FAMILY_WORDS: &[&str] = &[
    "família", "familia", "mamãe", "papai", "vovó", "vovô", "irmão", "irmã", "primo", "prima",
    "family",
];
const MISSING: &[&str] = &["saudade", "sinto falta", "miss you"];
const FRIENDS: &[&str] = &["amigo", "amiga", "amizade", "colega", "turma", "friend"];
const GATHERING: &[&str] = &["festa", "aniversário", "todo mundo", "escola", "party"];
const HURT: &[&str] = &[
    "machuc", "dodói", "doente", "chorando", "triste", "hurt", "sick",
];
const HELP: &[&str] = &["me ajuda", "ajuda", "preciso de", "help"];
const THANKS: &[&str] = &["obrigad", "valeu", "thank"];

/// Bond with the people who take care of the persona.
pub fn attachment() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("attachment")
        .signal(SignalSpec::new("level", 0.5, 0.995).baseline(0.3))
        .signal(SignalSpec::new("confidence", 0.5, 0.999).note("confidence in level"))
        .signal(SignalSpec::new("security", 0.5, 0.99).baseline(0.4))
        .signal(SignalSpec::new("separation_anxiety", 0.2, 0.95))
        .rule(
            Rule::keywords("love", LOVE)
                .magnitude(0.8)
                .scaled_by_role(CAREGIVERS)
                .target("level", 1.0)
                .target("security", 0.4),
        )
        .rule(
            Rule::role("caregiver_present", CAREGIVERS)
                .magnitude(0.4)
                .target("security", 0.6)
                .target("separation_anxiety", -0.5),
        )
        .rule(
            Rule::keywords("farewell", FAREWELL)
                .magnitude(0.6)
                .scaled_by_role(CAREGIVERS)
                .target("separation_anxiety", 1.0)
                .target("security", -0.3),
        )
        .rule(
            Rule::keywords("rejection", REJECTION)
                .magnitude(0.8)
                .target("level", -0.6)
                .target("security", -0.8)
                .target("separation_anxiety", 0.5),
        )
        .rule(
            Rule::keywords("comfort", COMFORT)
                .magnitude(0.6)
                .target("security", 0.8)
                .target("separation_anxiety", -0.6)
                .target("confidence", 0.3),
        )
        .insight(InsightRule::rising("level", 0.85, "sente um vínculo forte ({value})"))
        .insight(InsightRule::rising(
            "separation_anxiety",
            0.6,
            "está ansioso com a separação ({value})",
        ))
        .insight(InsightRule::falling("security", 0.3, "está inseguro ({value})"))
        .history_cap(400)
        .learning_rate(LearningRateSpec::new(0.12, 0.02, 0.4))
        .build()
}

pub fn family() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("family")
        .signal(SignalSpec::new("closeness", 0.5, 0.99).baseline(0.4))
        .signal(SignalSpec::new("belonging", 0.5, 0.995).baseline(0.5))
        .signal(SignalSpec::new("missing", 0.1, 0.95))
        .rule(
            Rule::role("family_member", CAREGIVERS)
                .magnitude(0.5)
                .target("closeness", 0.8)
                .target("belonging", 0.5)
                .target("missing", -0.6),
        )
        .rule(Rule::keywords("family_talk", FAMILY_WORDS).magnitude(0.5).target("belonging", 0.6))
        .rule(
            Rule::upstream("bonded", "attachment", "level", 0.7)
                .magnitude(0.6)
                .target("closeness", 0.5),
        )
        .rule(Rule::keywords("longing", MISSING).magnitude(0.7).target("missing", 1.0))
        .insight(InsightRule::rising("missing", 0.6, "está com saudade ({value})"))
        .build()
}

pub fn social() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("social")
        .signal(SignalSpec::new("sociability", 0.6, 0.98).baseline(0.5))
        .signal(SignalSpec::new("shyness", 0.3, 0.97).baseline(0.3))
        .signal(SignalSpec::new("friendship", 0.3, 0.995))
        .rule(
            Rule::pattern("greeting", GREETING_PATTERN)
                .magnitude(0.6)
                .target("sociability", 0.5)
                .target("shyness", -0.3),
        )
        .rule(Rule::role("known_person", SOCIAL_CIRCLE).magnitude(0.5).target("friendship", 0.6))
        .rule(
            Rule::keywords("friends", FRIENDS)
                .magnitude(0.6)
                .target("friendship", 0.7)
                .target("sociability", 0.3),
        )
        .rule(Rule::role("stranger", STRANGERS).magnitude(0.8).target("shyness", 0.8))
        .rule(
            Rule::keywords("gathering", GATHERING)
                .magnitude(0.5)
                .target("sociability", 0.6)
                .target("shyness", 0.2),
        )
        .build()
}

pub fn empathy() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("empathy")
        .signal(SignalSpec::new("concern", 0.3, 0.95))
        .signal(SignalSpec::new("compassion", 0.5, 0.99).baseline(0.5))
        .signal(SignalSpec::new("helpfulness", 0.5, 0.98).baseline(0.4))
        .primary("compassion")
        .rule(
            Rule::keywords("someone_hurt", HURT)
                .magnitude(0.7)
                .target("concern", 1.0)
                .target("compassion", 0.4),
        )
        .rule(Rule::keywords("help_request", HELP).magnitude(0.6).target("helpfulness", 1.0))
        .rule(
            Rule::upstream("shared_sadness", "emotion", "sadness", 0.4)
                .magnitude(0.5)
                .target("compassion", 0.6)
                .target("concern", 0.4),
        )
        .rule(
            Rule::keywords("gratitude", THANKS)
                .magnitude(0.5)
                .target("helpfulness", 0.4)
                .target("compassion", 0.3),
        )
        .history_cap(150)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::pass;
    use anima_core::InputContext;

    #[test]
    fn test_farewell_raises_separation_anxiety() {
        let ctx = InputContext::default().with_role("papai");
        let result = pass(attachment().unwrap(), "tchau, vou sair", &ctx, &[]);
        assert!(result.delta("separation_anxiety").unwrap() > 0.0);
    }

    #[test]
    fn test_rejection_lowers_level() {
        let result = pass(attachment().unwrap(), "vai embora!", &InputContext::default(), &[]);
        assert!(result.delta("level").unwrap() < 0.0);
        assert!(result.delta("security").unwrap() < 0.0);
    }

    #[test]
    fn test_stranger_makes_shy() {
        let ctx = InputContext::default().with_role("estranho");
        let result = pass(social().unwrap(), "oi", &ctx, &[]);
        assert!(result.factors.contains_key("stranger"));
        assert!(result.factors.contains_key("greeting"));
        assert!(!result.factors.contains_key("known_person"));
        assert!(result.delta("friendship").unwrap() < 0.0);
    }

    #[test]
    fn test_empathy_notices_hurt() {
        let result = pass(empathy().unwrap(), "meu amigo se machucou", &InputContext::default(), &[]);
        assert!(result.delta("concern").unwrap() > 0.0);
    }
}
