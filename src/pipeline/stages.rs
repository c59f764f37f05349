//! Stateless pipeline stages.

use super::types::Evaluator;
use crate::candidate::{Candidate, CandidateId};
use crate::predicate::Predicate;
use std::collections::HashSet;
use std::time::{Duration, SystemTime};
use tracing::trace;

/// Keeps the candidates satisfying a predicate, preserving order.
pub struct FilterStage<P> {
    predicate: P,
}

impl<P: Predicate> FilterStage<P> {
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }
}

impl<P: Predicate> Evaluator for FilterStage<P> {
    fn name(&self) -> &str {
        "filter"
    }

    fn evaluate(&mut self, mut candidates: Vec<Candidate>, _now: SystemTime) -> Vec<Candidate> {
        let before = candidates.len();
        candidates.retain(|c| self.predicate.matches(c));
        trace!(before, after = candidates.len(), "filter applied");
        candidates
    }
}

/// Stable sort by creation time, oldest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortStage;

impl Evaluator for SortStage {
    fn name(&self) -> &str {
        "sort-by-age"
    }

    fn evaluate(&mut self, mut candidates: Vec<Candidate>, _now: SystemTime) -> Vec<Candidate> {
        candidates.sort_by_key(|c| c.created_at);
        candidates
    }
}

/// Keeps candidates created strictly before `now - max_age`.
///
/// A candidate exactly `max_age` old is not selected.
#[derive(Debug, Clone, Copy)]
pub struct AgeStage {
    max_age: Duration,
}

impl AgeStage {
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }
}

impl Evaluator for AgeStage {
    fn name(&self) -> &str {
        "older-than"
    }

    fn evaluate(&mut self, mut candidates: Vec<Candidate>, now: SystemTime) -> Vec<Candidate> {
        let before = candidates.len();
        match now.checked_sub(self.max_age) {
            Some(threshold) => candidates.retain(|c| c.created_at < threshold),
            // nothing can be older than the start of representable time
            None => candidates.clear(),
        }
        trace!(before, after = candidates.len(), max_age = ?self.max_age, "age cut applied");
        candidates
    }
}

/// Truncates the sequence to at most `limit` candidates.
#[derive(Debug, Clone, Copy)]
pub struct LimitStage {
    limit: usize,
}

impl LimitStage {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Evaluator for LimitStage {
    fn name(&self) -> &str {
        "limit"
    }

    fn evaluate(&mut self, mut candidates: Vec<Candidate>, _now: SystemTime) -> Vec<Candidate> {
        candidates.truncate(self.limit);
        candidates
    }
}

/// Drops candidates whose `(name, namespace)` was already removed.
///
/// The control loop uses this between strategies so that a candidate
/// selected by one strategy is never offered to the next one in the same
/// cycle.
#[derive(Debug, Clone, Default)]
pub struct ExcludeStage {
    removed: HashSet<CandidateId>,
}

impl ExcludeStage {
    pub fn new<I>(removed: I) -> Self
    where
        I: IntoIterator<Item = CandidateId>,
    {
        Self {
            removed: removed.into_iter().collect(),
        }
    }

    /// Builds the exclusion set from previously selected candidates.
    pub fn from_candidates(selected: &[Candidate]) -> Self {
        Self::new(selected.iter().map(Candidate::id))
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

impl Evaluator for ExcludeStage {
    fn name(&self) -> &str {
        "exclude"
    }

    fn evaluate(&mut self, mut candidates: Vec<Candidate>, _now: SystemTime) -> Vec<Candidate> {
        if self.removed.is_empty() {
            return candidates;
        }
        candidates.retain(|c| !self.removed.contains(&c.id()));
        candidates
    }
}

/// Adapts a closure into a named evaluator.
pub struct FnStage<F> {
    name: String,
    f: F,
}

impl<F> FnStage<F>
where
    F: FnMut(Vec<Candidate>, SystemTime) -> Vec<Candidate> + Send,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Evaluator for FnStage<F>
where
    F: FnMut(Vec<Candidate>, SystemTime) -> Vec<Candidate> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&mut self, candidates: Vec<Candidate>, now: SystemTime) -> Vec<Candidate> {
        (self.f)(candidates, now)
    }
}
