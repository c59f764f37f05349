//! Criteria: one eviction policy's configuration.

use crate::error::{KickerError, Result};
use std::time::Duration;

/// Name of the built-in strategy that paces removals across the population.
pub const STRATEGY_SPREAD: &str = "spread";

/// Name of the built-in strategy that removes every expired candidate, up
/// to the limit, as soon as the cooldown allows.
pub const STRATEGY_IMMEDIATE: &str = "immediate";

pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_STRATEGY: &str = STRATEGY_SPREAD;
pub const DEFAULT_MAX_AGE_SECS: i64 = 86_400;
pub const DEFAULT_MIN_AGE_SECS: i64 = 90;
pub const DEFAULT_LIMIT: i64 = 1;
pub const DEFAULT_GRACE_PERIOD_SECS: i64 = 30;
pub const DEFAULT_COOL_DOWN_SECS: i64 = 300;

/// Configuration for one eviction policy.
///
/// Numeric fields are whole seconds (or a count, for `limit`). Zero or
/// negative values mean "use the default" and are replaced by
/// [`validate`](Criteria::validate).
///
/// # Examples
///
/// ```
/// use kicker::config::{Criteria, STRATEGY_IMMEDIATE};
///
/// let mut criteria = Criteria::new("worker")
///     .with_strategy(STRATEGY_IMMEDIATE)
///     .with_max_age_secs(3600)
///     .with_limit(2);
/// criteria.validate().unwrap();
///
/// assert_eq!(criteria.namespace, "default");
/// assert_eq!(criteria.cool_down_secs, 300);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Criteria {
    /// Name prefix of the targeted candidates. Required.
    pub name: String,

    /// Namespace of the targeted candidates; also used for removal.
    pub namespace: String,

    /// Registered strategy name.
    pub strategy: String,

    /// Candidates strictly older than this are eligible. Must exceed `min_age_secs`.
    pub max_age_secs: i64,

    /// Lower age bound; must be below `max_age_secs`.
    pub min_age_secs: i64,

    /// Maximum removals per evaluation.
    pub limit: i64,

    /// Grace period handed to the removal request.
    pub grace_period_secs: i64,

    /// Dead time after any removal before the strategy may act again.
    pub cool_down_secs: i64,
}

impl Criteria {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = strategy.into();
        self
    }

    pub fn with_max_age_secs(mut self, secs: i64) -> Self {
        self.max_age_secs = secs;
        self
    }

    pub fn with_min_age_secs(mut self, secs: i64) -> Self {
        self.min_age_secs = secs;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_grace_period_secs(mut self, secs: i64) -> Self {
        self.grace_period_secs = secs;
        self
    }

    pub fn with_cool_down_secs(mut self, secs: i64) -> Self {
        self.cool_down_secs = secs;
        self
    }

    /// Applies defaults to unset fields, then checks the invariants.
    pub fn validate(&mut self) -> Result<()> {
        if self.name.is_empty() {
            return Err(KickerError::invalid_criteria("", "criteria must have a name"));
        }
        if self.namespace.is_empty() {
            self.namespace = DEFAULT_NAMESPACE.to_string();
        }
        if self.min_age_secs <= 0 {
            self.min_age_secs = DEFAULT_MIN_AGE_SECS;
        }
        if self.max_age_secs <= 0 {
            self.max_age_secs = DEFAULT_MAX_AGE_SECS;
        }
        if self.max_age_secs <= self.min_age_secs {
            return Err(KickerError::invalid_criteria(
                &self.name,
                format!(
                    "max_age {}s must be greater than min_age {}s",
                    self.max_age_secs, self.min_age_secs
                ),
            ));
        }
        if self.strategy.is_empty() {
            self.strategy = DEFAULT_STRATEGY.to_string();
        }
        if self.limit <= 0 {
            self.limit = DEFAULT_LIMIT;
        }
        if self.grace_period_secs <= 0 {
            self.grace_period_secs = DEFAULT_GRACE_PERIOD_SECS;
        }
        if self.cool_down_secs <= 0 {
            self.cool_down_secs = DEFAULT_COOL_DOWN_SECS;
        }
        Ok(())
    }

    pub fn max_age(&self) -> Duration {
        secs(self.max_age_secs)
    }

    pub fn min_age(&self) -> Duration {
        secs(self.min_age_secs)
    }

    pub fn grace_period(&self) -> Duration {
        secs(self.grace_period_secs)
    }

    pub fn cool_down(&self) -> Duration {
        secs(self.cool_down_secs)
    }

    /// Per-evaluation removal limit as a count.
    pub fn limit(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(0)
    }
}

fn secs(value: i64) -> Duration {
    Duration::from_secs(u64::try_from(value).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let mut c = Criteria::new("worker");
        c.validate().unwrap();
        assert_eq!(c.namespace, DEFAULT_NAMESPACE);
        assert_eq!(c.strategy, STRATEGY_SPREAD);
        assert_eq!(c.max_age_secs, DEFAULT_MAX_AGE_SECS);
        assert_eq!(c.min_age_secs, DEFAULT_MIN_AGE_SECS);
        assert_eq!(c.limit, DEFAULT_LIMIT);
        assert_eq!(c.grace_period_secs, DEFAULT_GRACE_PERIOD_SECS);
        assert_eq!(c.cool_down_secs, DEFAULT_COOL_DOWN_SECS);
    }

    #[test]
    fn test_negative_values_defaulted() {
        let mut c = Criteria::new("worker")
            .with_limit(-3)
            .with_grace_period_secs(-1)
            .with_cool_down_secs(0);
        c.validate().unwrap();
        assert_eq!(c.limit(), 1);
        assert_eq!(c.grace_period(), Duration::from_secs(30));
        assert_eq!(c.cool_down(), Duration::from_secs(300));
    }

    #[test]
    fn test_explicit_values_kept() {
        let mut c = Criteria::new("worker")
            .with_namespace("batch")
            .with_strategy(STRATEGY_IMMEDIATE)
            .with_max_age_secs(3600)
            .with_min_age_secs(90)
            .with_limit(2)
            .with_cool_down_secs(300);
        c.validate().unwrap();
        assert_eq!(c.namespace, "batch");
        assert_eq!(c.strategy, "immediate");
        assert_eq!(c.max_age(), Duration::from_secs(3600));
        assert_eq!(c.min_age(), Duration::from_secs(90));
        assert_eq!(c.limit(), 2);
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut c = Criteria::default();
        assert!(matches!(c.validate(), Err(KickerError::InvalidCriteria { .. })));
    }

    #[test]
    fn test_min_age_above_max_age_rejected() {
        let mut c = Criteria::new("worker").with_min_age_secs(100).with_max_age_secs(50);
        let err = c.validate().unwrap_err();
        assert!(matches!(err, KickerError::InvalidCriteria { ref name, .. } if name == "worker"));
    }

    #[test]
    fn test_equal_ages_rejected() {
        let mut c = Criteria::new("worker").with_min_age_secs(60).with_max_age_secs(60);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_max_age_below_default_min_rejected() {
        // min age defaults to 90s, which a 60s max age cannot exceed
        let mut c = Criteria::new("worker").with_max_age_secs(60);
        assert!(c.validate().is_err());
    }
}
