//! Policy configuration.
//!
//! - [`Criteria`]: one named eviction policy (target, strategy, ages,
//!   limits, grace period, cooldown)
//! - [`KickerConfig`]: the check interval plus the ordered list of
//!   Criteria the control loop runs
//!
//! Both follow the same contract: unset or non-positive numeric fields are
//! replaced with defaults by `validate`, which then rejects what cannot be
//! repaired (missing name, `max_age <= min_age`, no criteria at all).

mod criteria;
mod settings;

pub use criteria::{
    Criteria, DEFAULT_COOL_DOWN_SECS, DEFAULT_GRACE_PERIOD_SECS, DEFAULT_LIMIT,
    DEFAULT_MAX_AGE_SECS, DEFAULT_MIN_AGE_SECS, DEFAULT_NAMESPACE, DEFAULT_STRATEGY,
    STRATEGY_IMMEDIATE, STRATEGY_SPREAD,
};
pub use settings::{KickerConfig, DEFAULT_CHECK_INTERVAL_SECS, DEFAULT_CONFIG_FILE_NAME};
