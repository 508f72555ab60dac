//! Reconciler configuration.

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::Semaphore;

/// What a cancelled reconciliation returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Report cancelled regions as not deployable
    #[default]
    Degrade,
    /// Fail the whole reconciliation
    Abort,
}

/// Reconciler configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Maximum concurrent probe calls (unbounded when unset)
    pub max_concurrency: Option<usize>,
    /// Per-probe timeout in milliseconds (none when unset)
    pub probe_timeout_ms: Option<u64>,
    /// Behaviour on cancellation
    pub cancel_policy: CancelPolicy,
}

impl ReconcilerConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ReconcilerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Cap the number of concurrent probe calls.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    /// Set the per-probe timeout. Sub-millisecond durations round up to 1 ms.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        let mut millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        if millis == 0 && !timeout.is_zero() {
            millis = 1;
        }
        self.probe_timeout_ms = Some(millis);
        self
    }

    /// Set the cancel policy.
    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }

    pub fn probe_timeout(&self) -> Option<Duration> {
        self.probe_timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == Some(0) {
            return Err(Error::InvalidConfig("max_concurrency must be at least 1".to_string()));
        }
        if let Some(limit) = self.max_concurrency {
            if limit > Semaphore::MAX_PERMITS {
                return Err(Error::InvalidConfig(format!(
                    "max_concurrency must not exceed {}",
                    Semaphore::MAX_PERMITS
                )));
            }
        }
        if self.probe_timeout_ms == Some(0) {
            return Err(Error::InvalidConfig("probe_timeout_ms must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReconcilerConfig::default();
        assert_eq!(config.max_concurrency, None);
        assert_eq!(config.probe_timeout(), None);
        assert_eq!(config.cancel_policy, CancelPolicy::Degrade);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let config = ReconcilerConfig::from_json(
            r#"{"max_concurrency": 8, "probe_timeout_ms": 1500, "cancel_policy": "abort"}"#,
        )
        .unwrap();
        assert_eq!(config.max_concurrency, Some(8));
        assert_eq!(config.probe_timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.cancel_policy, CancelPolicy::Abort);

        let partial = ReconcilerConfig::from_json(r#"{"max_concurrency": 4}"#).unwrap();
        assert_eq!(partial.cancel_policy, CancelPolicy::Degrade);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            ReconcilerConfig::from_json(r#"{"max_concurrency": 0}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ReconcilerConfig::from_json(r#"{"probe_timeout_ms": 0}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ReconcilerConfig::from_json("not json"),
            Err(Error::SerializationError(_))
        ));
    }

    #[test]
    fn test_max_concurrency_above_semaphore_limit() {
        assert!(matches!(
            ReconcilerConfig::from_json(r#"{"max_concurrency": 18446744073709551615}"#),
            Err(Error::InvalidConfig(_))
        ));
        let config = ReconcilerConfig::default().with_max_concurrency(Semaphore::MAX_PERMITS + 1);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = ReconcilerConfig::default().with_max_concurrency(Semaphore::MAX_PERMITS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sub_millisecond_timeout_rounds_up() {
        let config = ReconcilerConfig::default().with_probe_timeout(Duration::from_micros(300));
        assert_eq!(config.probe_timeout_ms, Some(1));
        assert!(config.validate().is_ok());

        let config = ReconcilerConfig::default().with_probe_timeout(Duration::from_micros(2500));
        assert_eq!(config.probe_timeout_ms, Some(2));

        let config = ReconcilerConfig::default().with_probe_timeout(Duration::MAX);
        assert_eq!(config.probe_timeout_ms, Some(u64::MAX));
    }
}
