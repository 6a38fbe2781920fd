//! Bounded scalar signals.
//!
//! Every signal lives in `[0, 1]`. A signal declares where it starts, the
//! baseline it relaxes toward, and the per-cycle decay multiplier that drives
//! the relaxation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Guard against NaN and Infinity in signal values.
/// If the value is NaN or Inf, replace with the provided fallback.
#[inline]
pub fn sanitize_f32(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        tracing::warn!("NaN/Inf detected in signal, resetting to fallback {}", fallback);
        fallback
    }
}

/// Sanitize and clamp into the unit interval.
#[inline]
pub fn clamp_unit(v: f32, fallback: f32) -> f32 {
    sanitize_f32(v, fallback).clamp(0.0, 1.0)
}

/// Static declaration of one signal owned by a module.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSpec {
    pub name: &'static str,
    /// Value after construction or `reset()`.
    pub initial: f32,
    /// Value passive decay relaxes toward.
    pub baseline: f32,
    /// Multiplier in `(0, 1]` applied to the distance from baseline per cycle.
    pub decay: f32,
    /// Free-form metadata, e.g. which signal this one qualifies.
    pub note: Option<&'static str>,
}

impl SignalSpec {
    pub fn new(name: &'static str, initial: f32, decay: f32) -> Self {
        Self {
            name,
            initial,
            baseline: 0.0,
            decay,
            note: None,
        }
    }

    pub fn baseline(mut self, baseline: f32) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }

    /// Relax `value` toward the baseline by `factor` (already exponentiated
    /// for wall-clock decay).
    pub fn relax(&self, value: f32, factor: f32) -> f32 {
        let relaxed = self.baseline + (value - self.baseline) * factor;
        clamp_unit(relaxed, self.initial)
    }
}

/// One named value inside a [`SignalSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReading {
    pub name: String,
    pub value: f32,
}

/// Ordered, read-only view of a module's signals.
///
/// Order is declaration order, which is also the tie-break order for
/// [`SignalSnapshot::dominant`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalSnapshot {
    readings: Vec<SignalReading>,
}

impl SignalSnapshot {
    pub fn new(readings: Vec<SignalReading>) -> Self {
        Self { readings }
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self {
            readings: pairs
                .into_iter()
                .map(|(name, value)| SignalReading {
                    name: name.into(),
                    value,
                })
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.readings
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignalReading> {
        self.readings.iter()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Highest-valued signal. Ties go to the first declared signal.
    pub fn dominant(&self) -> Option<&SignalReading> {
        let mut best: Option<&SignalReading> = None;
        for reading in &self.readings {
            match best {
                Some(b) if reading.value <= b.value => {}
                _ => best = Some(reading),
            }
        }
        best
    }

    /// Difference `self[name] - earlier[name]`, when both contain the signal.
    pub fn delta_from(&self, earlier: &SignalSnapshot, name: &str) -> Option<f32> {
        Some(self.get(name)? - earlier.get(name)?)
    }

    pub fn to_map(&self) -> BTreeMap<String, f32> {
        self.readings
            .iter()
            .map(|r| (r.name.clone(), r.value))
            .collect()
    }
}
