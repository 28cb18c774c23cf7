//! Pipeline configuration.

use std::time::Duration;

/// Modes planned when a request names none.
pub const DEFAULT_MODES: [&str; 3] = ["driving-car", "cycling-regular", "foot-walking"];

/// How often to call an upstream before giving up on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,

    /// Fixed pause between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Same attempt count, no pause between attempts.
    pub fn without_delay(self) -> Self {
        Self {
            delay: Duration::ZERO,
            ..self
        }
    }

    pub(crate) fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::from_millis(500),
        }
    }
}

/// Configuration parameters for candidate generation.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Retry policy for the directions provider.
    pub directions_retry: RetryPolicy,

    /// Retry policy for the delay predictor.
    pub predictor_retry: RetryPolicy,

    /// Plan all modes of a request at once instead of one after another.
    /// Candidate order still follows the request.
    pub concurrent_modes: bool,

    /// Modes used when the request lists none.
    pub default_modes: Vec<String>,
}

impl PipelineConfig {
    /// Drop all inter-attempt pauses (for tests and batch tools).
    pub fn without_delays(mut self) -> Self {
        self.directions_retry = self.directions_retry.without_delay();
        self.predictor_retry = self.predictor_retry.without_delay();
        self
    }

    pub fn with_concurrent_modes(mut self, concurrent: bool) -> Self {
        self.concurrent_modes = concurrent;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            directions_retry: RetryPolicy::default(),
            predictor_retry: RetryPolicy::default(),
            concurrent_modes: false,
            default_modes: DEFAULT_MODES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PipelineConfig::default();

        assert_eq!(config.directions_retry.max_attempts, 2);
        assert_eq!(config.directions_retry.delay, Duration::from_millis(500));
        assert_eq!(config.predictor_retry, config.directions_retry);
        assert!(!config.concurrent_modes);
        assert_eq!(
            config.default_modes,
            vec!["driving-car", "cycling-regular", "foot-walking"]
        );
    }

    #[test]
    fn without_delays_keeps_attempts() {
        let config = PipelineConfig::default().without_delays();

        assert_eq!(config.directions_retry.max_attempts, 2);
        assert_eq!(config.directions_retry.delay, Duration::ZERO);
        assert_eq!(config.predictor_retry.delay, Duration::ZERO);
    }

    #[test]
    fn zero_attempts_means_one() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(policy.attempts(), 1);
        assert_eq!(RetryPolicy::default().attempts(), 2);
    }
}
