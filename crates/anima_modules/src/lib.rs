//! # Anima Modules
//!
//! The persona's cognitive modules. Each one is a [`ModuleConfig`] run by the
//! shared engine in `anima_core`; only the tables differ.
//!
//! Order matters: the pipeline runs modules in [`MODULE_ORDER`] and a module
//! may read the results of any module listed before it.

use anima_core::{AnimaConfig, CognitiveModule, ConfigError, ConfiguredModule, ModuleConfig};

mod affect;
mod body;
mod bonds;
mod character;
pub mod lexicon;
mod mind;
mod play;
mod rhythm;
mod selfhood;

pub use affect::{emotion, mood};
pub use body::{energy, needs, safety};
pub use bonds::{attachment, empathy, family, social};
pub use character::{personality, reflection, speaking_style};
pub use mind::{curiosity, imagination, language, learning, memory};
pub use play::{humor, play};
pub use rhythm::{dreams, routine};
pub use selfhood::{autonomy, morality, motivation, self_esteem};

pub type ModuleFactory = fn() -> Result<ModuleConfig, ConfigError>;

/// Every module in pipeline order.
pub const MODULE_ORDER: &[(&str, ModuleFactory)] = &[
    ("emotion", emotion),
    ("mood", mood),
    ("attachment", attachment),
    ("family", family),
    ("social", social),
    ("empathy", empathy),
    ("curiosity", curiosity),
    ("learning", learning),
    ("language", language),
    ("memory", memory),
    ("imagination", imagination),
    ("play", play),
    ("humor", humor),
    ("energy", energy),
    ("needs", needs),
    ("safety", safety),
    ("self_esteem", self_esteem),
    ("autonomy", autonomy),
    ("morality", morality),
    ("motivation", motivation),
    ("routine", routine),
    ("dreams", dreams),
    ("personality", personality),
    ("reflection", reflection),
    ("speaking_style", speaking_style),
];

pub fn module_names() -> impl Iterator<Item = &'static str> {
    MODULE_ORDER.iter().map(|(name, _)| *name)
}

/// Built-in configuration of one module, without file overrides.
pub fn module_config(name: &str) -> Option<Result<ModuleConfig, ConfigError>> {
    MODULE_ORDER
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, factory)| factory())
}

/// Instantiate every enabled module in pipeline order.
///
/// The pipeline-wide decay mode applies unless a module section overrides it.
pub fn build_modules(config: &AnimaConfig) -> Result<Vec<Box<dyn CognitiveModule>>, ConfigError> {
    let mut modules: Vec<Box<dyn CognitiveModule>> = Vec::with_capacity(MODULE_ORDER.len());
    for (name, factory) in MODULE_ORDER {
        let overrides = config.module(name);
        if !overrides.enabled {
            tracing::info!("Module '{}' disabled by config", name);
            continue;
        }
        let mut module_config = factory()?;
        module_config.decay_mode = config.pipeline.decay_mode;
        let module_config = module_config.with_overrides(&overrides)?;
        modules.push(Box::new(ConfiguredModule::new(module_config)));
    }
    for name in config.modules.keys() {
        if module_config(name).is_none() {
            tracing::warn!("Config section for unknown module '{}' ignored", name);
        }
    }
    Ok(modules)
}


#[cfg(test)]
mod tests {
    use super::*;
    use anima_core::{DecayMode, InputContext, Matcher, ModuleInput, ModuleOverrides};
    use chrono::Utc;
    use std::collections::HashSet;

    #[test]
    fn test_registry_has_25_unique_modules() {
        let names: Vec<&str> = module_names().collect();
        assert_eq!(names.len(), 25);
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), 25);
        assert_eq!(names.first(), Some(&"emotion"));
        assert_eq!(names.last(), Some(&"speaking_style"));
    }

    #[test]
    fn test_every_config_builds_with_name_matching_registry() {
        for (name, factory) in MODULE_ORDER {
            let config = factory().unwrap_or_else(|e| panic!("{} failed: {}", name, e));
            assert_eq!(config.name, *name);
            assert!((100..=500).contains(&config.history_cap), "{} cap", name);
        }
    }

    #[test]
    fn test_factor_names_unique_within_module() {
        for (name, factory) in MODULE_ORDER {
            let config = factory().unwrap();
            let mut seen = HashSet::new();
            for rule in &config.rules {
                assert!(seen.insert(rule.factor), "{} repeats factor {}", name, rule.factor);
            }
        }
    }

    #[test]
    fn test_upstream_rules_only_read_earlier_modules() {
        let order: Vec<&str> = module_names().collect();
        for (position, (name, factory)) in MODULE_ORDER.iter().enumerate() {
            let config = factory().unwrap();
            for rule in &config.rules {
                if let Matcher::Upstream { module, signal, .. } = &rule.matcher {
                    let source = order
                        .iter()
                        .position(|n| n == module)
                        .unwrap_or_else(|| panic!("{} reads unknown module {}", name, module));
                    assert!(source < position, "{} reads later module {}", name, module);
                    let upstream = module_config(module).unwrap().unwrap();
                    assert!(upstream.signal_index(signal).is_some(), "{}.{} missing", module, signal);
                }
            }
        }
    }

    #[test]
    fn test_upstream_thresholds_sit_above_resting_values() {
        // A source signal at rest (initial or baseline) must not fire a
        // downstream rule, or neutral input would keep producing factors.
        for (name, factory) in MODULE_ORDER {
            let config = factory().unwrap();
            for rule in &config.rules {
                if let Matcher::Upstream { module, signal, threshold } = &rule.matcher {
                    let upstream = module_config(module).unwrap().unwrap();
                    let spec = upstream.signal_spec(signal).unwrap();
                    let resting = spec.initial.max(spec.baseline);
                    assert!(
                        *threshold > resting,
                        "{}.{} fires at rest: {}.{} threshold {} <= {}",
                        name,
                        rule.factor,
                        module,
                        signal,
                        threshold,
                        resting
                    );
                }
            }
        }
    }

    #[test]
    fn test_love_from_mother_is_weight_consistent() {
        let ctx = InputContext::default().with_role("mamãe");
        for (module, signal) in [("attachment", "level"), ("emotion", "affection")] {
            let config = module_config(module).unwrap().unwrap();
            let lr = config.learning_rate.initial;
            let input = ModuleInput::new("eu te amo mamãe", &ctx, &[], Utc::now());
            let expected: f32 = config
                .rules
                .iter()
                .filter_map(|rule| rule.evaluate(&input).map(|m| (rule, m)))
                .flat_map(|(rule, m)| {
                    rule.targets
                        .iter()
                        .filter(|(s, _)| *s == signal)
                        .map(move |(_, w)| m * w)
                })
                .sum::<f32>()
                * lr;
            assert!(expected > 0.0);

            let mut instance = ConfiguredModule::new(config);
            let result = instance.process(&input);
            let delta = result.delta(signal).unwrap();
            assert!((delta - expected).abs() < 1e-5, "{}.{}: {} vs {}", module, signal, delta, expected);
        }
    }

    #[test]
    fn test_neutral_input_never_raises_signals_above_baseline() {
        let ctx = InputContext::default();
        for (name, factory) in MODULE_ORDER {
            let config = factory().unwrap();
            let baselines: Vec<f32> = config.signals.iter().map(|s| s.baseline).collect();
            let mut module = ConfiguredModule::new(config);
            for _ in 0..50 {
                let input = ModuleInput::new("", &ctx, &[], Utc::now());
                let result = module.process(&input);
                assert!(result.factors.is_empty(), "{} fired on empty input", name);
                for (reading, baseline) in result.signals_after.iter().zip(&baselines) {
                    let before = result.signals_before.get(&reading.name).unwrap();
                    let toward = (reading.value - baseline).abs() <= (before - baseline).abs() + 1e-6;
                    assert!(toward, "{}.{} moved away from baseline", name, reading.name);
                }
            }
        }
    }

    #[test]
    fn test_build_modules_honors_overrides() {
        let mut config = AnimaConfig::default();
        config.pipeline.decay_mode = DecayMode::WallClock { unit_secs: 60.0 };
        config.modules.insert(
            "dreams".to_string(),
            ModuleOverrides {
                enabled: false,
                ..ModuleOverrides::default()
            },
        );
        config.modules.insert(
            "attachment".to_string(),
            ModuleOverrides {
                learning_rate: Some(0.2),
                ..ModuleOverrides::default()
            },
        );
        let modules = build_modules(&config).unwrap();
        assert_eq!(modules.len(), 24);
        assert!(modules.iter().all(|m| m.name() != "dreams"));
        let attachment = modules.iter().find(|m| m.name() == "attachment").unwrap();
        assert!((attachment.to_document().tunable_parameters.learning_rate - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_build_modules_rejects_invalid_override() {
        let mut config = AnimaConfig::default();
        config.modules.insert(
            "mood".to_string(),
            ModuleOverrides {
                history_cap: Some(0),
                ..ModuleOverrides::default()
            },
        );
        assert!(build_modules(&config).is_err());

        let mut config = AnimaConfig::default();
        config.pipeline.decay_mode = DecayMode::WallClock { unit_secs: 0.0 };
        assert!(matches!(
            build_modules(&config),
            Err(ConfigError::DecayUnit { .. })
        ));
    }
}
