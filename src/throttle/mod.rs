//! Temporal throttles.
//!
//! Throttles wrap an inner [`Evaluator`](crate::pipeline::Evaluator) and
//! suppress its output based on timers carried between invocations. The
//! timer logic lives in plain state structs ([`CoolDownState`],
//! [`SpreadState`]) that take `now` explicitly, so it can be tested
//! without a clock.
//!
//! - [`CoolDownStage`]: fixed dead time after any non-empty result.
//! - [`SpreadStage`]: dead time of `max_age / population` after a
//!   non-empty result, lifted early when the population grows.
//!
//! Both must be invoked at most once per control-loop cycle: every call
//! may advance their state.

mod stages;
mod state;

pub use stages::{CoolDownStage, SpreadStage};
pub use state::{CoolDownState, SpreadState};
