//! Throttle timer state.

use std::time::{Duration, SystemTime};

/// When a throttle next lets evaluation through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Deadline {
    #[default]
    Open,
    At(SystemTime),
    /// The wait ran past the representable time range.
    Never,
}

impl Deadline {
    fn after(now: SystemTime, wait: Duration) -> Self {
        now.checked_add(wait).map_or(Deadline::Never, Deadline::At)
    }

    fn passed(self, now: SystemTime) -> bool {
        match self {
            Deadline::Open => true,
            Deadline::At(next) => now >= next,
            Deadline::Never => false,
        }
    }

    fn at(self) -> Option<SystemTime> {
        match self {
            Deadline::At(next) => Some(next),
            Deadline::Open | Deadline::Never => None,
        }
    }
}

/// Timer state for a fixed cooldown.
///
/// Unset on creation, so the first evaluation is never blocked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoolDownState {
    next_eligible: Deadline,
}

impl CoolDownState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if evaluation may run at `now`.
    pub fn admits(&self, now: SystemTime) -> bool {
        self.next_eligible.passed(now)
    }

    /// Records an action at `now`; blocks until `now + cooldown`.
    ///
    /// A deadline beyond the representable range blocks for good.
    pub fn arm(&mut self, now: SystemTime, cooldown: Duration) {
        self.next_eligible = Deadline::after(now, cooldown);
    }

    /// The end of the current wait. `None` when unarmed or blocked for good.
    pub fn next_eligible(&self) -> Option<SystemTime> {
        self.next_eligible.at()
    }

    /// Returns `true` once armed with a wait that never ends.
    pub fn is_blocked_for_good(&self) -> bool {
        self.next_eligible == Deadline::Never
    }
}

/// Timer state for population-proportional pacing.
///
/// After an action on a population of `N`, further actions are held off
/// for `max_age / N`, unless the population observed since has grown
/// beyond `N`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpreadState {
    next_eligible: Deadline,
    /// Population size at the last action. `None` until the first one.
    last_count: Option<usize>,
}

impl SpreadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if evaluation of a population of `count` may run at `now`.
    pub fn admits(&self, now: SystemTime, count: usize) -> bool {
        let waiting = !self.next_eligible.passed(now);
        let grown = self.last_count.map_or(true, |last| count > last);
        !waiting || grown
    }

    /// Records an action on a population of `count` at `now`.
    ///
    /// `count` must be non-zero.
    pub fn arm(&mut self, now: SystemTime, max_age: Duration, count: usize) {
        debug_assert!(count > 0, "spread armed with an empty population");
        self.next_eligible = Deadline::after(now, pacing_interval(max_age, count));
        self.last_count = Some(count);
    }

    /// The end of the current wait. `None` when unarmed or when the wait
    /// ran past the representable range; growth still lifts the latter.
    pub fn next_eligible(&self) -> Option<SystemTime> {
        self.next_eligible.at()
    }

    pub fn last_count(&self) -> Option<usize> {
        self.last_count
    }
}

/// Returns `max_age / count`, with `count` clamped to at least one.
pub(crate) fn pacing_interval(max_age: Duration, count: usize) -> Duration {
    let divisor = u32::try_from(count.max(1)).unwrap_or(u32::MAX);
    max_age / divisor
}
