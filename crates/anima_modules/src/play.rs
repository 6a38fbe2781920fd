//! Play and humor.

use crate::lexicon::{EXCITED_PATTERN, PLAY, SCOLDING, TIRED};
use anima_core::{ConfigError, InsightRule, ModuleConfig, Polarity, Rule, SignalSpec};

const GAME_OUTCOME: &[&str] = &[
    "ganhei", "ganhou", "venci", "perdi", "perdeu", "placar", "won", "lost",
];
const JOKES: &[&str] = &["piada", "engraçad", "palhaç", "bobeira", "funny", "joke"];

pub fn play() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("play")
        .signal(SignalSpec::new("playfulness", 0.6, 0.96).baseline(0.5))
        .signal(SignalSpec::new("excitement", 0.3, 0.9))
        .signal(SignalSpec::new("competitiveness", 0.2, 0.97))
        .rule(
            Rule::keywords("invitation", PLAY)
                .magnitude(0.8)
                .target("playfulness", 1.0)
                .target("excitement", 0.6),
        )
        .rule(
            Rule::keywords("game_outcome", GAME_OUTCOME)
                .magnitude(0.6)
                .target("competitiveness", 1.0)
                .target("excitement", 0.4),
        )
        .rule(Rule::pattern("cheering", EXCITED_PATTERN).magnitude(0.5).target("excitement", 0.8))
        .rule(
            Rule::keywords("tired", TIRED)
                .magnitude(0.6)
                .target("playfulness", -0.6)
                .target("excitement", -0.6),
        )
        .rule(Rule::keywords("scolded", SCOLDING).magnitude(0.5).target("playfulness", -0.5))
        .rule(
            Rule::upstream("joyful", "emotion", "joy", 0.7)
                .magnitude(0.4)
                .target("playfulness", 0.5),
        )
        .insight(InsightRule::rising("excitement", 0.7, "está agitado para brincar ({value})"))
        .history_cap(150)
        .build()
}

pub fn humor() -> Result<ModuleConfig, ConfigError> {
    ModuleConfig::builder("humor")
        .signal(SignalSpec::new("amusement", 0.4, 0.9).baseline(0.3))
        .signal(SignalSpec::new("silliness", 0.3, 0.93))
        .signal(SignalSpec::new("wit", 0.3, 0.995).baseline(0.3))
        .rule(
            Rule::pattern("laughter", r"(ha){2,}|(he){2,}|k{3,}|\brs\b|😂|🤣|\blol\b")
                .magnitude(0.8)
                .target("amusement", 1.0),
        )
        .rule(
            Rule::keywords("joke", JOKES)
                .magnitude(0.7)
                .target("amusement", 0.6)
                .target("silliness", 0.8),
        )
        .rule(
            Rule::upstream("clever_words", "language", "wordplay", 0.5)
                .magnitude(0.5)
                .target("wit", 0.6),
        )
        .rule(
            Rule::upstream("playful", "play", "playfulness", 0.7)
                .magnitude(0.4)
                .target("silliness", 0.5),
        )
        .rule(Rule::sentiment("gloomy", Polarity::Negative).target("amusement", -0.5))
        .history_cap(150)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{pass, upstream_result};
    use anima_core::InputContext;

    #[test]
    fn test_invitation_to_play() {
        let result = pass(play().unwrap(), "vamos brincar de pega-pega!!", &InputContext::default(), &[]);
        assert!(result.factors.contains_key("invitation"));
        assert!(result.factors.contains_key("cheering"));
        assert!(result.delta("excitement").unwrap() > 0.0);
    }

    #[test]
    fn test_laughter() {
        for text in ["hahaha", "kkkkk", "isso foi lol"] {
            let result = pass(humor().unwrap(), text, &InputContext::default(), &[]);
            assert!(result.factors.contains_key("laughter"), "no laughter in {:?}", text);
        }
    }

    #[test]
    fn test_humor_reads_language_wordplay() {
        let words = upstream_result("language", &[("wordplay", 0.6)]);
        let result = pass(humor().unwrap(), "", &InputContext::default(), &[words]);
        assert!(result.delta("wit").unwrap() > 0.0);
    }
}
