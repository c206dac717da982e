//! Poll cadence, poll budget and duration parsing.

use crate::config::PollingConfig;
use crate::error::{MobscanError, Result};
use std::time::Duration;

/// How often to poll scan logs and when to give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Interval between log fetches
    pub interval: Duration,
    /// Maximum number of log fetches; 0 disables the limit
    pub max_attempts: u32,
    /// Maximum time spent polling; zero disables the limit
    pub max_duration: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 120,
            max_duration: Duration::from_secs(15 * 60),
        }
    }
}

impl PollPolicy {
    pub fn from_config(config: &PollingConfig) -> Result<Self> {
        Ok(Self {
            interval: parse_duration(&config.interval)?,
            max_attempts: config.max_attempts,
            max_duration: parse_duration(&config.max_duration)?,
        })
    }

    /// Unbounded polling at `interval`.
    #[must_use]
    pub const fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: 0,
            max_duration: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Whether another poll would exceed the budget.
    #[must_use]
    pub fn exhausted(&self, attempts: u32, elapsed: Duration) -> bool {
        (self.max_attempts > 0 && attempts >= self.max_attempts)
            || (!self.max_duration.is_zero() && elapsed >= self.max_duration)
    }

    /// Message for a scan that ran out of budget.
    #[must_use]
    pub fn timeout_message(&self, attempts: u32, elapsed: Duration) -> String {
        format!(
            "Scan did not finish after {attempts} poll(s) in {}s; giving up",
            elapsed.as_secs()
        )
    }
}

/// Parse a human-readable duration string into a [`Duration`].
///
/// Supported suffixes: `ms` (milliseconds), `s` (seconds), `m` (minutes),
/// `h` (hours). A bare `0` means zero.
///
/// ```
/// use mobscan::lifecycle::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
/// assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let invalid =
        || MobscanError::validation(format!("invalid duration '{s}': expected format like 500ms, 5s, 15m"));

    let (num_str, unit) = if let Some(stripped) = s.strip_suffix("ms") {
        (stripped, "ms")
    } else if s.ends_with('s') || s.ends_with('m') || s.ends_with('h') {
        (&s[..s.len() - 1], &s[s.len() - 1..])
    } else {
        return Err(invalid());
    };

    let value: u64 = num_str.parse().map_err(|_| invalid())?;

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value.saturating_mul(60))),
        "h" => Ok(Duration::from_secs(value.saturating_mul(3600))),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn test_parse_duration_with_whitespace() {
        assert_eq!(parse_duration("  10s  ").unwrap(), Duration::from_secs(10));
    }

    #[test]
    fn test_parse_duration_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("0s").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("10x").is_err());
        assert!(parse_duration("abcs").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("100").is_err());
        assert!(parse_duration("s").is_err());
    }

    #[test]
    fn test_policy_from_config() {
        let policy = PollPolicy::from_config(&PollingConfig::default()).unwrap();
        assert_eq!(policy, PollPolicy::default());
    }

    #[test]
    fn test_budget() {
        let policy = PollPolicy::default();
        assert!(!policy.exhausted(119, Duration::from_secs(60)));
        assert!(policy.exhausted(120, Duration::from_secs(60)));
        assert!(policy.exhausted(3, Duration::from_secs(15 * 60)));

        let unbounded = PollPolicy::unbounded(Duration::from_secs(5));
        assert!(!unbounded.exhausted(u32::MAX, Duration::from_secs(86_400)));
    }
}
