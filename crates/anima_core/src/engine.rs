//! Configurable module engine.
//!
//! Every subsystem of the persona is the same machine with different tables:
//! a [`ModuleConfig`] declares signals, factor rules and insight templates,
//! and [`ConfiguredModule`] runs the shared update cycle over them:
//!
//! 1. factor extraction against the rule table
//! 2. weighted delta scaled by the self-tuning learning rate
//! 3. clamp & apply on targeted signals
//! 4. passive decay toward baseline on everything else
//! 5. history append with FIFO eviction

use crate::config::ModuleOverrides;
use crate::context::ModuleInput;
use crate::document::{HistoryEvent, ModuleDocument, TunableParameters};
use crate::error::ConfigError;
use crate::module::{CognitiveModule, Insight, ModuleResult};
use crate::rules::Rule;
use crate::signal::{clamp_unit, SignalReading, SignalSnapshot, SignalSpec};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// How often decay is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayMode {
    /// Once per processed message, regardless of elapsed time.
    #[default]
    PerPass,
    /// `decay^(elapsed / unit_secs)` since the module's last update.
    WallClock { unit_secs: f32 },
}

impl DecayMode {
    /// Effective multiplier for a signal with per-cycle `decay`.
    pub fn factor(&self, decay: f32, elapsed_secs: f64) -> f32 {
        match *self {
            DecayMode::PerPass => decay,
            DecayMode::WallClock { unit_secs } if unit_secs > 0.0 => {
                let cycles = (elapsed_secs.max(0.0) / unit_secs as f64) as f32;
                decay.powf(cycles)
            }
            DecayMode::WallClock { .. } => decay,
        }
    }
}

/// Bounds and step of a module's self-tuning learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningRateSpec {
    pub initial: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for LearningRateSpec {
    fn default() -> Self {
        Self {
            initial: 0.1,
            min: 0.01,
            max: 0.5,
            step: 0.005,
        }
    }
}

impl LearningRateSpec {
    pub fn new(initial: f32, min: f32, max: f32) -> Self {
        Self {
            initial,
            min,
            max,
            ..Self::default()
        }
    }

    pub fn step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Positive passes speed learning up, negative ones slow it down,
    /// factor-free passes leave it alone.
    pub fn tune(&self, current: f32, net: f32) -> f32 {
        let next = if net > 0.0 {
            current + self.step
        } else if net < 0.0 {
            current - self.step
        } else {
            current
        };
        clamp_unit(next, self.initial).clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Rising,
    Falling,
}

/// Template emitted when `signal` crosses `threshold` in the given direction.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightRule {
    pub signal: &'static str,
    pub threshold: f32,
    pub crossing: Crossing,
    /// `{value}` and `{signal}` are substituted.
    pub template: &'static str,
}

impl InsightRule {
    pub fn rising(signal: &'static str, threshold: f32, template: &'static str) -> Self {
        Self {
            signal,
            threshold,
            crossing: Crossing::Rising,
            template,
        }
    }

    pub fn falling(signal: &'static str, threshold: f32, template: &'static str) -> Self {
        Self {
            signal,
            threshold,
            crossing: Crossing::Falling,
            template,
        }
    }

    fn fires(&self, before: f32, after: f32) -> bool {
        match self.crossing {
            Crossing::Rising => before < self.threshold && after >= self.threshold,
            Crossing::Falling => before > self.threshold && after <= self.threshold,
        }
    }

    fn render(&self, value: f32) -> String {
        self.template
            .replace("{value}", &format!("{:.2}", value))
            .replace("{signal}", self.signal)
    }
}

/// Declarative description of one module.
#[derive(Debug, Clone)]
pub struct ModuleConfig {
    pub name: &'static str,
    pub primary: &'static str,
    pub signals: Vec<SignalSpec>,
    pub rules: Vec<Rule>,
    pub insights: Vec<InsightRule>,
    pub history_cap: usize,
    pub learning_rate: LearningRateSpec,
    pub decay_mode: DecayMode,
    /// Characters of input kept in each history entry.
    pub excerpt_chars: usize,
}

impl ModuleConfig {
    pub fn builder(name: &'static str) -> ModuleConfigBuilder {
        ModuleConfigBuilder {
            name,
            primary: None,
            signals: Vec::new(),
            rules: Vec::new(),
            insights: Vec::new(),
            history_cap: 200,
            learning_rate: LearningRateSpec::default(),
            decay_mode: DecayMode::PerPass,
            excerpt_chars: 120,
        }
    }

    pub fn signal_index(&self, name: &str) -> Option<usize> {
        self.signals.iter().position(|s| s.name == name)
    }

    pub fn signal_spec(&self, name: &str) -> Option<&SignalSpec> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// Apply per-module settings from the config file.
    pub fn with_overrides(mut self, overrides: &ModuleOverrides) -> Result<Self, ConfigError> {
        if let Some(lr) = overrides.learning_rate {
            self.learning_rate.initial = lr;
        }
        if let Some(cap) = overrides.history_cap {
            self.history_cap = cap;
        }
        if let Some(mode) = overrides.decay_mode {
            self.decay_mode = mode;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let module = self.name;
        if self.signals.is_empty() {
            return Err(ConfigError::NoSignals { module });
        }
        if self.signal_index(self.primary).is_none() {
            return Err(ConfigError::UnknownSignal {
                module,
                signal: self.primary.to_string(),
                place: "primary",
            });
        }
        for spec in &self.signals {
            let checks = [
                ("initial", spec.initial, (0.0..=1.0).contains(&spec.initial), "[0, 1]"),
                ("baseline", spec.baseline, (0.0..=1.0).contains(&spec.baseline), "[0, 1]"),
                ("decay", spec.decay, spec.decay > 0.0 && spec.decay <= 1.0, "(0, 1]"),
            ];
            for (field, value, ok, range) in checks {
                if !ok {
                    return Err(ConfigError::OutOfRange {
                        module,
                        signal: spec.name.to_string(),
                        field,
                        value,
                        range,
                    });
                }
            }
        }
        for rule in &self.rules {
            for (signal, _) in &rule.targets {
                if self.signal_index(signal).is_none() {
                    return Err(ConfigError::UnknownSignal {
                        module,
                        signal: signal.to_string(),
                        place: "rule target",
                    });
                }
            }
        }
        for insight in &self.insights {
            if self.signal_index(insight.signal).is_none() {
                return Err(ConfigError::UnknownSignal {
                    module,
                    signal: insight.signal.to_string(),
                    place: "insight",
                });
            }
        }
        if self.history_cap == 0 {
            return Err(ConfigError::ZeroHistoryCap { module });
        }
        if let DecayMode::WallClock { unit_secs } = self.decay_mode {
            if !(unit_secs.is_finite() && unit_secs > 0.0) {
                return Err(ConfigError::DecayUnit { module, unit_secs });
            }
        }
        let lr = self.learning_rate;
        if !(lr.min <= lr.initial && lr.initial <= lr.max) {
            return Err(ConfigError::LearningRate {
                module,
                initial: lr.initial,
                min: lr.min,
                max: lr.max,
            });
        }
        Ok(())
    }
}

pub struct ModuleConfigBuilder {
    name: &'static str,
    primary: Option<&'static str>,
    signals: Vec<SignalSpec>,
    rules: Vec<Rule>,
    insights: Vec<InsightRule>,
    history_cap: usize,
    learning_rate: LearningRateSpec,
    decay_mode: DecayMode,
    excerpt_chars: usize,
}

impl ModuleConfigBuilder {
    /// Defaults to the first declared signal.
    pub fn primary(mut self, signal: &'static str) -> Self {
        self.primary = Some(signal);
        self
    }

    pub fn signal(mut self, spec: SignalSpec) -> Self {
        self.signals.push(spec);
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn insight(mut self, insight: InsightRule) -> Self {
        self.insights.push(insight);
        self
    }

    pub fn history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    pub fn learning_rate(mut self, spec: LearningRateSpec) -> Self {
        self.learning_rate = spec;
        self
    }

    pub fn decay_mode(mut self, mode: DecayMode) -> Self {
        self.decay_mode = mode;
        self
    }

    pub fn excerpt_chars(mut self, chars: usize) -> Self {
        self.excerpt_chars = chars;
        self
    }

    /// Compile patterns and validate.
    pub fn build(self) -> Result<ModuleConfig, ConfigError> {
        let module = self.name;
        let primary = match self.primary {
            Some(p) => p,
            None => self
                .signals
                .first()
                .map(|s| s.name)
                .ok_or(ConfigError::NoSignals { module })?,
        };
        let rules = self
            .rules
            .into_iter()
            .map(|rule| {
                let factor = rule.factor;
                rule.compile()
                    .map_err(|source| ConfigError::InvalidPattern {
                        module,
                        factor,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let config = ModuleConfig {
            name: module,
            primary,
            signals: self.signals,
            rules,
            insights: self.insights,
            history_cap: self.history_cap,
            learning_rate: self.learning_rate,
            decay_mode: self.decay_mode,
            excerpt_chars: self.excerpt_chars,
        };
        config.validate()?;
        Ok(config)
    }
}

/// A [`CognitiveModule`] driven entirely by a [`ModuleConfig`].
pub struct ConfiguredModule {
    config: ModuleConfig,
    /// Indexed like `config.signals`.
    values: Vec<f32>,
    history: VecDeque<HistoryEvent>,
    learning_rate: f32,
    last_update: DateTime<Utc>,
}

impl ConfiguredModule {
    pub fn new(config: ModuleConfig) -> Self {
        let values = config.signals.iter().map(|s| s.initial).collect();
        let learning_rate = config.learning_rate.initial;
        Self {
            config,
            values,
            history: VecDeque::new(),
            learning_rate,
            last_update: Utc::now(),
        }
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    pub fn signal(&self, name: &str) -> Option<f32> {
        self.config.signal_index(name).map(|i| self.values[i])
    }

    /// Overwrite one signal (clamped). Returns false for unknown names.
    pub fn set_signal(&mut self, name: &str, value: f32) -> bool {
        match self.config.signal_index(name) {
            Some(i) => {
                self.values[i] = clamp_unit(value, self.config.signals[i].initial);
                true
            }
            None => false,
        }
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEvent> {
        self.history.iter()
    }

    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    /// Run one update cycle.
    pub fn process(&mut self, input: &ModuleInput<'_>) -> ModuleResult {
        let before = self.snapshot();
        let count = self.values.len();
        let mut factors: BTreeMap<String, f32> = BTreeMap::new();
        let mut raw_delta = vec![0.0f32; count];
        let mut targeted = vec![false; count];
        let mut net = 0.0f32;

        for rule in &self.config.rules {
            let Some(magnitude) = rule.evaluate(input) else {
                continue;
            };
            let slot = factors.entry(rule.factor.to_string()).or_insert(0.0);
            *slot = slot.max(magnitude);
            for (signal, weight) in &rule.targets {
                if let Some(i) = self.config.signal_index(signal) {
                    raw_delta[i] += magnitude * weight;
                    targeted[i] = true;
                    net += magnitude * weight;
                }
            }
        }

        let elapsed_secs = (input.now - self.last_update).num_milliseconds() as f64 / 1000.0;
        let next: Vec<f32> = self
            .config
            .signals
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                if targeted[i] {
                    clamp_unit(self.values[i] + raw_delta[i] * self.learning_rate, spec.initial)
                } else {
                    let factor = self.config.decay_mode.factor(spec.decay, elapsed_secs);
                    spec.relax(self.values[i], factor)
                }
            })
            .collect();

        self.values = next;
        self.learning_rate = self.config.learning_rate.tune(self.learning_rate, net);
        self.last_update = input.now;

        let after = self.snapshot();
        self.push_history(HistoryEvent {
            timestamp: input.now,
            input_excerpt: input.excerpt(self.config.excerpt_chars),
            triggering_factors: factors.clone(),
            resulting_signals: after.to_map(),
        });

        let emitted_insights = self.insights_between(&before, &after);
        if !factors.is_empty() {
            tracing::trace!(
                "{}: factors={:?} lr={:.3}",
                self.config.name,
                factors,
                self.learning_rate
            );
        }

        ModuleResult {
            module: self.config.name.to_string(),
            signals_before: before,
            signals_after: after,
            factors,
            emitted_insights,
            error: None,
        }
    }

    fn push_history(&mut self, event: HistoryEvent) {
        self.history.push_back(event);
        while self.history.len() > self.config.history_cap {
            self.history.pop_front();
        }
    }

    fn insights_between(&self, before: &SignalSnapshot, after: &SignalSnapshot) -> Vec<Insight> {
        self.config
            .insights
            .iter()
            .filter_map(|rule| {
                let b = before.get(rule.signal)?;
                let a = after.get(rule.signal)?;
                rule.fires(b, a).then(|| Insight {
                    module: self.config.name.to_string(),
                    signal: rule.signal.to_string(),
                    value: a,
                    text: rule.render(a),
                })
            })
            .collect()
    }
}

#[async_trait]
impl CognitiveModule for ConfiguredModule {
    fn name(&self) -> &str {
        self.config.name
    }

    fn primary_signal(&self) -> &str {
        self.config.primary
    }

    async fn process_input(&mut self, input: &ModuleInput<'_>) -> anyhow::Result<ModuleResult> {
        Ok(self.process(input))
    }

    fn snapshot(&self) -> SignalSnapshot {
        SignalSnapshot::new(
            self.config
                .signals
                .iter()
                .zip(&self.values)
                .map(|(spec, value)| SignalReading {
                    name: spec.name.to_string(),
                    value: *value,
                })
                .collect(),
        )
    }

    fn default_snapshot(&self) -> SignalSnapshot {
        SignalSnapshot::from_pairs(self.config.signals.iter().map(|s| (s.name, s.initial)))
    }

    fn history_len(&self) -> usize {
        self.history.len()
    }

    fn reset(&mut self) {
        self.values = self.config.signals.iter().map(|s| s.initial).collect();
        self.history.clear();
        self.learning_rate = self.config.learning_rate.initial;
        self.last_update = Utc::now();
    }

    fn to_document(&self) -> ModuleDocument {
        ModuleDocument {
            signals: self.snapshot().to_map(),
            history: self.history.iter().cloned().collect(),
            tunable_parameters: TunableParameters {
                learning_rate: self.learning_rate,
            },
            last_update: self.last_update,
        }
    }

    fn restore(&mut self, document: ModuleDocument) {
        self.values = self
            .config
            .signals
            .iter()
            .map(|spec| match document.signals.get(spec.name) {
                Some(v) => clamp_unit(*v, spec.initial),
                None => spec.initial,
            })
            .collect();

        let skip = document.history.len().saturating_sub(self.config.history_cap);
        self.history = document.history.into_iter().skip(skip).collect();

        let spec = self.config.learning_rate;
        let lr = document.tunable_parameters.learning_rate;
        self.learning_rate = if lr.is_finite() {
            lr.clamp(spec.min, spec.max)
        } else {
            spec.initial
        };
        self.last_update = document.last_update;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::InputContext;
    use crate::rules::RoleWeights;
    use chrono::Duration;

    const FAMILY: RoleWeights = RoleWeights::new(&[("mamãe", 1.0)], 0.3);

    fn test_config() -> ModuleConfig {
        ModuleConfig::builder("attachment")
            .signal(SignalSpec::new("level", 0.6, 0.95))
            .signal(SignalSpec::new("confidence", 0.5, 0.99).note("confidence in level"))
            .rule(
                Rule::keywords("love", &["te amo"])
                    .magnitude(0.8)
                    .scaled_by_role(FAMILY)
                    .target("level", 1.0),
            )
            .rule(Rule::keywords("rejection", &["vai embora"]).target("level", -1.0))
            .insight(InsightRule::rising("level", 0.9, "{signal} chegou a {value}"))
            .history_cap(5)
            .learning_rate(LearningRateSpec::new(0.2, 0.05, 0.5).step(0.01))
            .build()
            .unwrap()
    }

    fn run(module: &mut ConfiguredModule, text: &str, ctx: &InputContext) -> ModuleResult {
        let input = ModuleInput::new(text, ctx, &[], Utc::now());
        module.process(&input)
    }

    #[test]
    fn test_weighted_delta_uses_learning_rate() {
        let mut module = ConfiguredModule::new(test_config());
        let ctx = InputContext::default().with_role("mamãe");
        let result = run(&mut module, "eu te amo", &ctx);
        let delta = result.delta("level").unwrap();
        assert!((delta - 0.8 * 0.2).abs() < 1e-5, "delta was {}", delta);
        assert_eq!(result.factors.get("love"), Some(&0.8));
    }

    #[test]
    fn test_untargeted_signals_decay() {
        let mut module = ConfiguredModule::new(test_config());
        let result = run(&mut module, "te amo", &InputContext::default());
        let confidence = result.signals_after.get("confidence").unwrap();
        assert!((confidence - 0.5 * 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_neutral_input_decays_monotonically() {
        let mut module = ConfiguredModule::new(test_config());
        let ctx = InputContext::default();
        let mut last = module.signal("level").unwrap();
        assert!((last - 0.6).abs() < 1e-6);
        for _ in 0..200 {
            let result = run(&mut module, "", &ctx);
            assert!(result.factors.is_empty());
            let now = module.signal("level").unwrap();
            assert!(now <= last && now >= 0.0);
            last = now;
        }
        assert!(last < 0.001);
    }

    #[test]
    fn test_saturation_is_stable() {
        let mut module = ConfiguredModule::new(test_config());
        let ctx = InputContext::default().with_role("mamãe");
        for _ in 0..50 {
            run(&mut module, "te amo", &ctx);
        }
        assert_eq!(module.signal("level"), Some(1.0));
        let result = run(&mut module, "te amo", &ctx);
        assert_eq!(result.signals_before.get("level"), Some(1.0));
        assert_eq!(result.signals_after.get("level"), Some(1.0));
    }

    #[test]
    fn test_learning_rate_self_tunes_within_bounds() {
        let mut module = ConfiguredModule::new(test_config());
        let ctx = InputContext::default();
        run(&mut module, "te amo", &ctx);
        assert!((module.learning_rate() - 0.21).abs() < 1e-6);
        run(&mut module, "", &ctx);
        assert!((module.learning_rate() - 0.21).abs() < 1e-6);
        for _ in 0..100 {
            run(&mut module, "vai embora", &ctx);
        }
        assert!((module.learning_rate() - 0.05).abs() < 1e-6);
        for _ in 0..100 {
            run(&mut module, "te amo", &ctx);
        }
        assert!((module.learning_rate() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_history_capped_fifo() {
        let mut module = ConfiguredModule::new(test_config());
        let ctx = InputContext::default();
        for i in 0..12 {
            run(&mut module, &format!("msg {}", i), &ctx);
        }
        assert_eq!(module.history_len(), 5);
        assert_eq!(module.history().next().unwrap().input_excerpt, "msg 7");
    }

    #[test]
    fn test_insight_on_rising_crossing_only() {
        let mut module = ConfiguredModule::new(test_config());
        module.set_signal("level", 0.85);
        let ctx = InputContext::default().with_role("mamãe");
        let result = run(&mut module, "te amo", &ctx);
        assert_eq!(result.emitted_insights.len(), 1);
        assert!(result.emitted_insights[0].text.starts_with("level chegou a"));
        let again = run(&mut module, "te amo", &ctx);
        assert!(again.emitted_insights.is_empty());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut module = ConfiguredModule::new(test_config());
        run(&mut module, "te amo", &InputContext::default());
        module.reset();
        assert_eq!(module.snapshot(), module.default_snapshot());
        assert_eq!(module.history_len(), 0);
        assert!((module.learning_rate() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_restore_then_document_is_identity() {
        let mut module = ConfiguredModule::new(test_config());
        for text in ["te amo", "", "vai embora"] {
            run(&mut module, text, &InputContext::default());
        }
        let doc = module.to_document();
        let json = doc.to_json().unwrap();

        let mut fresh = ConfiguredModule::new(test_config());
        fresh.restore(ModuleDocument::from_json(&json).unwrap());
        assert_eq!(fresh.to_document(), doc);
    }

    #[test]
    fn test_restore_sanitizes_foreign_documents() {
        let mut module = ConfiguredModule::new(test_config());
        let mut doc = module.to_document();
        doc.signals.insert("level".to_string(), 7.0);
        doc.signals.insert("confidence".to_string(), f32::NAN);
        doc.signals.insert("unknown".to_string(), 0.3);
        doc.tunable_parameters.learning_rate = 9.0;
        module.restore(doc);
        assert_eq!(module.signal("level"), Some(1.0));
        assert_eq!(module.signal("confidence"), Some(0.5));
        assert!((module.learning_rate() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_wall_clock_decay_uses_elapsed_time() {
        let config = ModuleConfig::builder("clock")
            .signal(SignalSpec::new("level", 0.8, 0.5))
            .decay_mode(DecayMode::WallClock { unit_secs: 10.0 })
            .build()
            .unwrap();
        let mut module = ConfiguredModule::new(config);
        let ctx = InputContext::default();
        let later = module.last_update() + Duration::seconds(20);
        let input = ModuleInput::new("", &ctx, &[], later);
        module.process(&input);
        assert!((module.signal("level").unwrap() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_build_rejects_bad_configs() {
        let no_signals = ModuleConfig::builder("empty").build();
        assert!(matches!(no_signals, Err(ConfigError::NoSignals { .. })));

        let bad_target = ModuleConfig::builder("x")
            .signal(SignalSpec::new("a", 0.1, 0.9))
            .rule(Rule::keywords("f", &["f"]).target("b", 1.0))
            .build();
        assert!(matches!(bad_target, Err(ConfigError::UnknownSignal { .. })));

        let bad_decay = ModuleConfig::builder("x")
            .signal(SignalSpec::new("a", 0.1, 0.0))
            .build();
        assert!(matches!(bad_decay, Err(ConfigError::OutOfRange { .. })));

        let bad_pattern = ModuleConfig::builder("x")
            .signal(SignalSpec::new("a", 0.1, 0.9))
            .rule(Rule::pattern("p", "[").target("a", 1.0))
            .build();
        assert!(matches!(bad_pattern, Err(ConfigError::InvalidPattern { .. })));

        let bad_lr = ModuleConfig::builder("x")
            .signal(SignalSpec::new("a", 0.1, 0.9))
            .learning_rate(LearningRateSpec::new(0.9, 0.01, 0.5))
            .build();
        assert!(matches!(bad_lr, Err(ConfigError::LearningRate { .. })));

        for unit_secs in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            let bad_unit = ModuleConfig::builder("x")
                .signal(SignalSpec::new("a", 0.1, 0.9))
                .decay_mode(DecayMode::WallClock { unit_secs })
                .build();
            assert!(
                matches!(bad_unit, Err(ConfigError::DecayUnit { .. })),
                "unit_secs {} accepted",
                unit_secs
            );
        }
    }

    #[test]
    fn test_overrides_applied_and_validated() {
        let overrides = ModuleOverrides {
            learning_rate: Some(0.3),
            history_cap: Some(50),
            ..ModuleOverrides::default()
        };
        let config = test_config().with_overrides(&overrides).unwrap();
        assert_eq!(config.history_cap, 50);
        assert!((config.learning_rate.initial - 0.3).abs() < 1e-6);

        let too_high = ModuleOverrides {
            learning_rate: Some(0.9),
            ..ModuleOverrides::default()
        };
        assert!(test_config().with_overrides(&too_high).is_err());

        let zero_unit = ModuleOverrides {
            decay_mode: Some(DecayMode::WallClock { unit_secs: 0.0 }),
            ..ModuleOverrides::default()
        };
        assert!(matches!(
            test_config().with_overrides(&zero_unit),
            Err(ConfigError::DecayUnit { .. })
        ));
    }
}
