use thiserror::Error;

/// A module configuration that cannot be turned into a working module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("module '{module}' declares no signals")]
    NoSignals { module: &'static str },

    #[error("module '{module}' names unknown signal '{signal}' ({place})")]
    UnknownSignal {
        module: &'static str,
        signal: String,
        place: &'static str,
    },

    #[error("module '{module}': signal '{signal}' has {field} {value} outside {range}")]
    OutOfRange {
        module: &'static str,
        signal: String,
        field: &'static str,
        value: f32,
        range: &'static str,
    },

    #[error("module '{module}' has a history cap of zero")]
    ZeroHistoryCap { module: &'static str },

    #[error("module '{module}': wall-clock decay unit {unit_secs} must be a positive number of seconds")]
    DecayUnit { module: &'static str, unit_secs: f32 },

    #[error("module '{module}': learning rate {initial} outside [{min}, {max}]")]
    LearningRate {
        module: &'static str,
        initial: f32,
        min: f32,
        max: f32,
    },

    #[error("module '{module}': invalid pattern for factor '{factor}': {source}")]
    InvalidPattern {
        module: &'static str,
        factor: &'static str,
        #[source]
        source: regex::Error,
    },
}
