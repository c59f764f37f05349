//! Throttle stages wrapping an inner evaluator.

use super::state::{CoolDownState, SpreadState};
use crate::candidate::Candidate;
use crate::pipeline::Evaluator;
use std::time::{Duration, SystemTime};
use tracing::debug;

/// Suppresses the inner evaluator for a fixed duration after it selects
/// anything.
///
/// While cooling down the inner evaluator is not invoked at all, so any
/// throttle state it carries stays untouched.
pub struct CoolDownStage<E> {
    cooldown: Duration,
    inner: E,
    state: CoolDownState,
}

impl<E: Evaluator> CoolDownStage<E> {
    pub fn new(cooldown: Duration, inner: E) -> Self {
        Self {
            cooldown,
            inner,
            state: CoolDownState::new(),
        }
    }

    pub fn state(&self) -> &CoolDownState {
        &self.state
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: Evaluator> Evaluator for CoolDownStage<E> {
    fn name(&self) -> &str {
        "cool-down"
    }

    fn evaluate(&mut self, candidates: Vec<Candidate>, now: SystemTime) -> Vec<Candidate> {
        if !self.state.admits(now) {
            debug!(next_eligible = ?self.state.next_eligible(), "cool down active, skipping evaluation");
            return Vec::new();
        }

        let selected = self.inner.evaluate(candidates, now);
        if !selected.is_empty() {
            debug!(cooldown = ?self.cooldown, selected = selected.len(), "arming cool down");
            self.state.arm(now, self.cooldown);
        }
        selected
    }
}

/// Paces the inner evaluator so that, on average, one candidate turns over
/// per `max_age / population` interval.
///
/// After a non-empty result on an input of `N` candidates, evaluation is
/// skipped until `now + max_age / N`, except when a later input is larger
/// than `N`. An empty input never reaches the inner evaluator.
pub struct SpreadStage<E> {
    max_age: Duration,
    inner: E,
    state: SpreadState,
}

impl<E: Evaluator> SpreadStage<E> {
    pub fn new(max_age: Duration, inner: E) -> Self {
        Self {
            max_age,
            inner,
            state: SpreadState::new(),
        }
    }

    pub fn state(&self) -> &SpreadState {
        &self.state
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: Evaluator> Evaluator for SpreadStage<E> {
    fn name(&self) -> &str {
        "spread"
    }

    fn evaluate(&mut self, candidates: Vec<Candidate>, now: SystemTime) -> Vec<Candidate> {
        let population = candidates.len();
        if population == 0 {
            return Vec::new();
        }
        if !self.state.admits(now, population) {
            debug!(
                population,
                last_count = ?self.state.last_count(),
                next_eligible = ?self.state.next_eligible(),
                "spread pacing active, skipping evaluation"
            );
            return Vec::new();
        }

        let selected = self.inner.evaluate(candidates, now);
        if !selected.is_empty() {
            self.state.arm(now, self.max_age, population);
            debug!(population, next_eligible = ?self.state.next_eligible(), "arming spread pacing");
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Phase;
    use crate::pipeline::{FnStage, LimitStage};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn pods(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| Candidate::new(format!("pod-{i}"), "default", at(i as u64), Phase::Running))
            .collect()
    }

    /// Passes through at most one candidate and counts invocations.
    fn counting_first(
        calls: Arc<AtomicUsize>,
    ) -> FnStage<impl FnMut(Vec<Candidate>, SystemTime) -> Vec<Candidate> + Send> {
        FnStage::new("counting", move |cs: Vec<Candidate>, now: SystemTime| {
            calls.fetch_add(1, Ordering::SeqCst);
            LimitStage::new(1).evaluate(cs, now)
        })
    }

    #[test]
    fn test_cooldown_blocks_then_reopens() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut stage = CoolDownStage::new(Duration::from_secs(300), counting_first(calls.clone()));

        assert_eq!(stage.evaluate(pods(3), at(1_000)).len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // [T, T+D) is silent and never reaches the inner evaluator
        assert!(stage.evaluate(pods(3), at(1_000)).is_empty());
        assert!(stage.evaluate(pods(3), at(1_299)).is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(stage.evaluate(pods(3), at(1_300)).len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cooldown_not_armed_by_empty_result() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut stage = CoolDownStage::new(Duration::from_secs(300), counting_first(calls.clone()));

        assert!(stage.evaluate(Vec::new(), at(1_000)).is_empty());
        assert_eq!(stage.state().next_eligible(), None);
        assert_eq!(stage.evaluate(pods(1), at(1_001)).len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_spread_paces_by_population() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut stage = SpreadStage::new(Duration::from_secs(3600), counting_first(calls.clone()));

        assert_eq!(stage.evaluate(pods(4), at(1_000)).len(), 1);
        assert_eq!(stage.state().next_eligible(), Some(at(1_900)));
        assert_eq!(stage.state().last_count(), Some(4));

        // same or smaller population before T + M/N: skipped
        assert!(stage.evaluate(pods(4), at(1_500)).is_empty());
        assert!(stage.evaluate(pods(2), at(1_899)).is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(stage.evaluate(pods(4), at(1_900)).len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_spread_grown_population_reaches_inner() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut stage = SpreadStage::new(Duration::from_secs(3600), counting_first(calls.clone()));

        stage.evaluate(pods(4), at(1_000));
        assert_eq!(stage.evaluate(pods(5), at(1_001)).len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // re-armed on the larger population
        assert_eq!(stage.state().last_count(), Some(5));
        assert_eq!(stage.state().next_eligible(), Some(at(1_001 + 720)));
    }

    #[test]
    fn test_spread_uses_pre_inner_population() {
        let mut stage = SpreadStage::new(Duration::from_secs(100), LimitStage::new(1));
        stage.evaluate(pods(10), at(0));
        assert_eq!(stage.state().last_count(), Some(10));
        assert_eq!(stage.state().next_eligible(), Some(at(10)));
    }

    #[test]
    fn test_spread_empty_input_never_reaches_inner() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut stage = SpreadStage::new(Duration::from_secs(3600), counting_first(calls.clone()));
        assert!(stage.evaluate(Vec::new(), at(0)).is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(stage.state().last_count(), None);
    }

    #[test]
    fn test_cooldown_shields_inner_spread_state() {
        let mut stage = CoolDownStage::new(
            Duration::from_secs(300),
            SpreadStage::new(Duration::from_secs(60), LimitStage::new(1)),
        );
        stage.evaluate(pods(6), at(0));
        let armed = *stage.inner().state();
        assert_eq!(armed.next_eligible(), Some(at(10)));

        // spread alone would allow a grown population now; the cooldown does not,
        // and the spread state is left exactly as it was
        assert!(stage.evaluate(pods(12), at(20)).is_empty());
        assert_eq!(*stage.inner().state(), armed);
    }
}
