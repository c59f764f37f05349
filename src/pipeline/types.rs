//! Core evaluator trait.

use crate::candidate::Candidate;
use std::time::SystemTime;

/// A transformation from a candidate sequence to a subsequence.
///
/// Most evaluators are pure functions of `(candidates, now)`. Throttle
/// stages additionally carry timer state between calls, so `evaluate`
/// takes `&mut self` and an evaluator must not be shared between callers.
///
/// # Examples
///
/// ```
/// use kicker::candidate::{Candidate, Phase};
/// use kicker::pipeline::{ComposeStage, Evaluator, LimitStage, SortStage};
/// use std::time::{Duration, SystemTime};
///
/// let t0 = SystemTime::UNIX_EPOCH;
/// let pods = vec![
///     Candidate::new("b", "default", t0 + Duration::from_secs(20), Phase::Running),
///     Candidate::new("a", "default", t0 + Duration::from_secs(10), Phase::Running),
/// ];
///
/// let mut oldest = ComposeStage::new().then(SortStage).then(LimitStage::new(1));
/// let out = oldest.evaluate(pods, SystemTime::now());
/// assert_eq!(out[0].name, "a");
/// ```
pub trait Evaluator: Send {
    /// Returns a short name used in logs.
    fn name(&self) -> &str;

    /// Evaluates `candidates` at wall-clock time `now`.
    fn evaluate(&mut self, candidates: Vec<Candidate>, now: SystemTime) -> Vec<Candidate>;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&mut self, candidates: Vec<Candidate>, now: SystemTime) -> Vec<Candidate> {
        (**self).evaluate(candidates, now)
    }
}
