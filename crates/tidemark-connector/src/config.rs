//! Connector framework configuration types
//!
//! Polling cadence settings shared by all source kinds.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{SourceError, SourceResult};

/// Polling interval configuration, in milliseconds.
///
/// `standard_interval_ms` is always present. The two link-specific intervals
/// apply only to `OData` sources; when absent the standard interval is used —
/// absence never produces a zero or unbounded interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalConfig {
    /// Delay between scheduled polls.
    #[serde(default = "default_standard_interval_ms")]
    pub standard_interval_ms: u64,

    /// Delay while draining `@odata.nextLink` pages. NextLink pagination is
    /// usually a burst of many pages that should drain quickly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_link_interval_ms: Option<u64>,

    /// Delay while holding an `@odata.deltaLink`. A delta link represents an
    /// already-caught-up incremental stream that can be polled sparsely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_link_interval_ms: Option<u64>,
}

fn default_standard_interval_ms() -> u64 {
    60_000
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            standard_interval_ms: default_standard_interval_ms(),
            next_link_interval_ms: None,
            delta_link_interval_ms: None,
        }
    }
}

impl IntervalConfig {
    /// Create interval configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the standard poll interval.
    pub fn with_standard_interval_ms(mut self, ms: u64) -> Self {
        self.standard_interval_ms = ms;
        self
    }

    /// Set the nextLink poll interval.
    pub fn with_next_link_interval_ms(mut self, ms: u64) -> Self {
        self.next_link_interval_ms = Some(ms);
        self
    }

    /// Set the deltaLink poll interval.
    pub fn with_delta_link_interval_ms(mut self, ms: u64) -> Self {
        self.delta_link_interval_ms = Some(ms);
        self
    }

    /// Get the standard interval as a Duration.
    pub fn standard_interval(&self) -> Duration {
        Duration::from_millis(self.standard_interval_ms)
    }

    /// Get the nextLink interval, falling back to the standard interval.
    pub fn next_link_interval(&self) -> Duration {
        Duration::from_millis(
            self.next_link_interval_ms
                .unwrap_or(self.standard_interval_ms),
        )
    }

    /// Get the deltaLink interval, falling back to the standard interval.
    pub fn delta_link_interval(&self) -> Duration {
        Duration::from_millis(
            self.delta_link_interval_ms
                .unwrap_or(self.standard_interval_ms),
        )
    }

    /// Validate the configuration.
    pub fn validate(&self) -> SourceResult<()> {
        if self.standard_interval_ms == 0 {
            return Err(SourceError::invalid_configuration(
                "standard_interval_ms must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IntervalConfig::default();
        assert_eq!(config.standard_interval_ms, 60_000);
        assert!(config.next_link_interval_ms.is_none());
        assert!(config.delta_link_interval_ms.is_none());
    }

    #[test]
    fn test_absent_link_intervals_fall_back_to_standard() {
        let config = IntervalConfig::new().with_standard_interval_ms(45_000);
        assert_eq!(config.next_link_interval(), Duration::from_millis(45_000));
        assert_eq!(config.delta_link_interval(), Duration::from_millis(45_000));
    }

    #[test]
    fn test_configured_link_intervals() {
        let config = IntervalConfig::new()
            .with_standard_interval_ms(60_000)
            .with_next_link_interval_ms(5_000)
            .with_delta_link_interval_ms(300_000);

        assert_eq!(config.next_link_interval(), Duration::from_millis(5_000));
        assert_eq!(
            config.delta_link_interval(),
            Duration::from_millis(300_000)
        );
    }

    #[test]
    fn test_validate_rejects_zero_standard_interval() {
        let config = IntervalConfig::new().with_standard_interval_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let config: IntervalConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, IntervalConfig::default());
    }
}
