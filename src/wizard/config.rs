use std::time::Duration;
use thiserror::Error;

use crate::tracker::DEFAULT_TICK;

pub const TRACKER_INTERVAL_VAR: &str = "LOCALSHYP_TRACKER_INTERVAL_MS";
pub const CHECKOUT_DELAY_VAR: &str = "LOCALSHYP_CHECKOUT_DELAY_MS";

const DEFAULT_CHECKOUT_DELAY: Duration = Duration::from_millis(2400);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected milliseconds, got '{value}'")]
    InvalidMillis { var: &'static str, value: String },

    #[error("{0}: tracker interval must be greater than zero")]
    ZeroInterval(&'static str),
}

/// Timing knobs for the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardConfig {
    /// Time between tracking status updates.
    pub tracker_interval: Duration,
    /// Simulated payment processing before a checkout completes.
    /// Only the async event loop waits for it.
    pub checkout_delay: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            tracker_interval: DEFAULT_TICK,
            checkout_delay: DEFAULT_CHECKOUT_DELAY,
        }
    }
}

impl WizardConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read overrides through `lookup`; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(interval) = millis(&lookup, TRACKER_INTERVAL_VAR)? {
            if interval.is_zero() {
                return Err(ConfigError::ZeroInterval(TRACKER_INTERVAL_VAR));
            }
            config.tracker_interval = interval;
        }
        if let Some(delay) = millis(&lookup, CHECKOUT_DELAY_VAR)? {
            config.checkout_delay = delay;
        }

        Ok(config)
    }
}

fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<u64>()
        .map(|ms| Some(Duration::from_millis(ms)))
        .map_err(|_| ConfigError::InvalidMillis { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults() {
        let config = WizardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.tracker_interval, Duration::from_millis(4000));
        assert_eq!(config.checkout_delay, Duration::from_millis(2400));
    }

    #[test]
    fn overrides() {
        let config = WizardConfig::from_lookup(lookup(&[
            (TRACKER_INTERVAL_VAR, "250"),
            (CHECKOUT_DELAY_VAR, " 0 "),
        ]))
        .unwrap();
        assert_eq!(config.tracker_interval, Duration::from_millis(250));
        assert_eq!(config.checkout_delay, Duration::ZERO);
    }

    #[test]
    fn malformed_value_is_an_error() {
        let err = WizardConfig::from_lookup(lookup(&[(CHECKOUT_DELAY_VAR, "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidMillis {
                var: CHECKOUT_DELAY_VAR,
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn zero_tracker_interval_is_an_error() {
        let err = WizardConfig::from_lookup(lookup(&[(TRACKER_INTERVAL_VAR, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroInterval(TRACKER_INTERVAL_VAR));
    }
}
