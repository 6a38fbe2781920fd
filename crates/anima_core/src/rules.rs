//! Factor extraction rules.
//!
//! A [`Rule`] matches the incoming text or context and, when it fires,
//! produces a named factor with a magnitude in `[0, 1]`. The factor is then
//! spread over the rule's target signals with per-target weights (which may be
//! negative).

use crate::context::ModuleInput;
use crate::sentiment::{polarity_magnitude, Polarity};
use regex::Regex;

/// Role → weight lookup used for role matchers and role scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleWeights {
    weights: &'static [(&'static str, f32)],
    /// Weight for a role that is present but not listed.
    unknown: f32,
}

impl RoleWeights {
    pub const fn new(weights: &'static [(&'static str, f32)], unknown: f32) -> Self {
        Self { weights, unknown }
    }

    /// Case-insensitive lookup. Unlisted roles get the fallback weight.
    pub fn weight(&self, role: &str) -> f32 {
        let role = role.trim().to_lowercase();
        self.weights
            .iter()
            .find(|(name, _)| *name == role)
            .map(|(_, w)| *w)
            .unwrap_or(self.unknown)
    }

    /// Weight only if the role is listed.
    pub fn listed_weight(&self, role: &str) -> Option<f32> {
        let role = role.trim().to_lowercase();
        self.weights
            .iter()
            .find(|(name, _)| *name == role)
            .map(|(_, w)| *w)
    }
}

/// What a rule looks at.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Any lowercase substring present in the lowercased text.
    Keywords(&'static [&'static str]),
    /// Uncompiled regex; compiled by [`Rule::compile`].
    PatternSource(String),
    Pattern(Regex),
    /// Context role listed in the table; magnitude is the role weight.
    Role(RoleWeights),
    IntensityHint,
    /// Module-specific context field.
    ContextValue(&'static str),
    /// Signal of an earlier module in this pass, if at least `threshold`.
    Upstream {
        module: &'static str,
        signal: &'static str,
        threshold: f32,
    },
    Sentiment(Polarity),
    /// Message length in characters.
    MinLength(usize),
}

/// Optional context-driven multiplier on a rule's magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scaling {
    None,
    /// Absent role leaves the magnitude unscaled.
    Role(RoleWeights),
    /// Absent hint leaves the magnitude unscaled.
    IntensityHint,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub factor: &'static str,
    pub matcher: Matcher,
    pub magnitude: f32,
    pub scaling: Scaling,
    pub targets: Vec<(&'static str, f32)>,
}

impl Rule {
    fn with_matcher(factor: &'static str, matcher: Matcher) -> Self {
        Self {
            factor,
            matcher,
            magnitude: 1.0,
            scaling: Scaling::None,
            targets: Vec::new(),
        }
    }

    pub fn keywords(factor: &'static str, words: &'static [&'static str]) -> Self {
        Self::with_matcher(factor, Matcher::Keywords(words))
    }

    /// Case-insensitive regular expression.
    pub fn pattern(factor: &'static str, pattern: &str) -> Self {
        Self::with_matcher(factor, Matcher::PatternSource(pattern.to_string()))
    }

    pub fn role(factor: &'static str, weights: RoleWeights) -> Self {
        Self::with_matcher(factor, Matcher::Role(weights))
    }

    pub fn intensity(factor: &'static str) -> Self {
        Self::with_matcher(factor, Matcher::IntensityHint)
    }

    pub fn context_value(factor: &'static str, key: &'static str) -> Self {
        Self::with_matcher(factor, Matcher::ContextValue(key))
    }

    pub fn upstream(
        factor: &'static str,
        module: &'static str,
        signal: &'static str,
        threshold: f32,
    ) -> Self {
        Self::with_matcher(
            factor,
            Matcher::Upstream {
                module,
                signal,
                threshold,
            },
        )
    }

    pub fn sentiment(factor: &'static str, polarity: Polarity) -> Self {
        Self::with_matcher(factor, Matcher::Sentiment(polarity))
    }

    pub fn min_length(factor: &'static str, chars: usize) -> Self {
        Self::with_matcher(factor, Matcher::MinLength(chars))
    }

    pub fn magnitude(mut self, magnitude: f32) -> Self {
        self.magnitude = magnitude;
        self
    }

    pub fn scaled_by_role(mut self, weights: RoleWeights) -> Self {
        self.scaling = Scaling::Role(weights);
        self
    }

    pub fn scaled_by_intensity(mut self) -> Self {
        self.scaling = Scaling::IntensityHint;
        self
    }

    pub fn target(mut self, signal: &'static str, weight: f32) -> Self {
        self.targets.push((signal, weight));
        self
    }

    /// Compile a pattern source into a regex. Other matchers pass through.
    pub fn compile(mut self) -> Result<Self, regex::Error> {
        if let Matcher::PatternSource(source) = &self.matcher {
            let regex = Regex::new(&format!("(?i){}", source))?;
            self.matcher = Matcher::Pattern(regex);
        }
        Ok(self)
    }

    /// Magnitude of this rule's factor for `input`, or `None` if it does not fire.
    pub fn evaluate(&self, input: &ModuleInput<'_>) -> Option<f32> {
        let raw = match &self.matcher {
            Matcher::Keywords(words) => words
                .iter()
                .any(|w| input.normalized.contains(w))
                .then_some(1.0),
            Matcher::Pattern(regex) => regex.is_match(input.text).then_some(1.0),
            // Uncompiled rules never fire.
            Matcher::PatternSource(_) => None,
            Matcher::Role(weights) => input
                .context
                .role
                .as_deref()
                .and_then(|role| weights.listed_weight(role)),
            Matcher::IntensityHint => input.context.intensity_hint(),
            Matcher::ContextValue(key) => input.context.value_magnitude(key),
            Matcher::Upstream {
                module,
                signal,
                threshold,
            } => input
                .upstream_signal(module, signal)
                .filter(|v| *v >= *threshold),
            Matcher::Sentiment(polarity) => polarity_magnitude(&input.normalized, *polarity),
            Matcher::MinLength(chars) => {
                (input.text.chars().count() >= *chars).then_some(1.0)
            }
        }?;

        let scale = match self.scaling {
            Scaling::None => 1.0,
            Scaling::Role(weights) => input
                .context
                .role
                .as_deref()
                .map(|role| weights.weight(role))
                .unwrap_or(1.0),
            Scaling::IntensityHint => input.context.intensity_hint().unwrap_or(1.0),
        };

        let magnitude = (raw * self.magnitude * scale).clamp(0.0, 1.0);
        (magnitude > 0.0).then_some(magnitude)
    }
}
