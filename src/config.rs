/*!
 * Termination Configuration
 *
 * Timing policy for the bounded wait and graceful-then-forced shutdown
 * helpers. Defaults come from `limits`; every field can be overridden
 * through the environment (milliseconds):
 * - SIMKIT_GRACE_PERIOD_MS
 * - SIMKIT_KILL_TIMEOUT_MS
 * - SIMKIT_POLL_INTERVAL_MS
 */

use crate::limits::{
    DEFAULT_GRACE_PERIOD, DEFAULT_KILL_TIMEOUT, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const GRACE_PERIOD_ENV: &str = "SIMKIT_GRACE_PERIOD_MS";
pub const KILL_TIMEOUT_ENV: &str = "SIMKIT_KILL_TIMEOUT_MS";
pub const POLL_INTERVAL_ENV: &str = "SIMKIT_POLL_INTERVAL_MS";

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} (expected milliseconds)")]
    InvalidDuration { key: &'static str, value: String },
}

/// Timing used when waiting for or terminating a child process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Time a process gets to honor a graceful exit request
    pub grace_period: Duration,
    /// Time to wait for a forced kill to take effect
    pub kill_timeout: Duration,
    /// Delay between status polls
    pub poll_interval: Duration,
}

impl TerminationConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self {
            grace_period: DEFAULT_GRACE_PERIOD,
            kill_timeout: DEFAULT_KILL_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Skip the grace period and kill straight away
    pub fn immediate() -> Self {
        Self {
            grace_period: Duration::ZERO,
            ..Self::new()
        }
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(grace) = parse_millis(&lookup, GRACE_PERIOD_ENV)? {
            config.grace_period = grace;
        }
        if let Some(kill) = parse_millis(&lookup, KILL_TIMEOUT_ENV)? {
            config.kill_timeout = kill;
        }
        if let Some(poll) = parse_millis(&lookup, POLL_INTERVAL_ENV)? {
            config = config.with_poll_interval(poll);
        }

        Ok(config)
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn with_kill_timeout(mut self, kill_timeout: Duration) -> Self {
        self.kill_timeout = kill_timeout;
        self
    }

    /// Set the poll delay, raised to `MIN_POLL_INTERVAL` if shorter
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        self
    }
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_millis<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| ConfigError::InvalidDuration { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TerminationConfig::default();
        assert_eq!(config.grace_period, DEFAULT_GRACE_PERIOD);
        assert_eq!(config.kill_timeout, DEFAULT_KILL_TIMEOUT);
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
        assert_eq!(TerminationConfig::immediate().grace_period, Duration::ZERO);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = TerminationConfig::from_lookup(lookup_from(&[
            (GRACE_PERIOD_ENV, "250"),
            (POLL_INTERVAL_ENV, " 20 "),
        ]))
        .unwrap();

        assert_eq!(config.grace_period, Duration::from_millis(250));
        assert_eq!(config.kill_timeout, DEFAULT_KILL_TIMEOUT);
        assert_eq!(config.poll_interval, Duration::from_millis(20));
    }

    #[test]
    fn test_invalid_override() {
        let err = TerminationConfig::from_lookup(lookup_from(&[(KILL_TIMEOUT_ENV, "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDuration {
                key: KILL_TIMEOUT_ENV,
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_poll_interval_floor() {
        let config = TerminationConfig::new().with_poll_interval(Duration::ZERO);
        assert_eq!(config.poll_interval, MIN_POLL_INTERVAL);
    }

    #[test]
    fn test_serialization() {
        let config = TerminationConfig::new().with_grace_period(Duration::from_secs(2));
        let json = serde_json::to_string(&config).unwrap();
        let back: TerminationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
