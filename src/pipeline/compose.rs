//! Short-circuiting stage composition.

use super::types::Evaluator;
use crate::candidate::Candidate;
use std::time::SystemTime;
use tracing::trace;

/// Threads candidates through each stage in order.
///
/// Once the sequence is empty, either on entry or after any stage, no
/// further stage is invoked and the empty sequence is returned.
#[derive(Default)]
pub struct ComposeStage {
    stages: Vec<Box<dyn Evaluator>>,
}

impl ComposeStage {
    /// Creates an empty composition. An empty composition is the identity.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage.
    pub fn then<E: Evaluator + 'static>(mut self, stage: E) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns the names of all stages in order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Evaluator for ComposeStage {
    fn name(&self) -> &str {
        "compose"
    }

    fn evaluate(&mut self, mut candidates: Vec<Candidate>, now: SystemTime) -> Vec<Candidate> {
        for stage in &mut self.stages {
            if candidates.is_empty() {
                return candidates;
            }
            let before = candidates.len();
            candidates = stage.evaluate(candidates, now);
            trace!(stage = stage.name(), before, after = candidates.len(), "stage evaluated");
        }
        candidates
    }
}

/// Composes boxed stages in order.
pub fn compose(stages: Vec<Box<dyn Evaluator>>) -> ComposeStage {
    ComposeStage { stages }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Phase;
    use crate::pipeline::{FilterStage, FnStage, LimitStage, SortStage};
    use crate::predicate::NamePrefix;
    use proptest::prelude::*;
    use std::time::Duration;

    fn pod(name: &str, created_secs: u64) -> Candidate {
        Candidate::new(
            name,
            "default",
            SystemTime::UNIX_EPOCH + Duration::from_secs(created_secs),
            Phase::Running,
        )
    }

    fn exploding() -> FnStage<impl FnMut(Vec<Candidate>, SystemTime) -> Vec<Candidate> + Send> {
        FnStage::new("exploding", |_: Vec<Candidate>, _: SystemTime| -> Vec<Candidate> {
            panic!("stage after an empty result must not run")
        })
    }

    #[test]
    fn test_threads_in_order() {
        let mut pipeline = ComposeStage::new()
            .then(FilterStage::new(NamePrefix::new("worker")))
            .then(SortStage)
            .then(LimitStage::new(2));
        assert_eq!(pipeline.stage_names(), vec!["filter", "sort-by-age", "limit"]);

        let out = pipeline.evaluate(
            vec![pod("worker-c", 30), pod("web", 1), pod("worker-a", 10), pod("worker-b", 20)],
            SystemTime::UNIX_EPOCH,
        );
        let names: Vec<_> = out.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["worker-a", "worker-b"]);
    }

    #[test]
    fn test_short_circuits_after_empty_stage() {
        let mut pipeline = ComposeStage::new()
            .then(FilterStage::new(NamePrefix::new("nothing-matches")))
            .then(exploding());
        let out = pipeline.evaluate(vec![pod("worker-a", 1)], SystemTime::UNIX_EPOCH);
        assert!(out.is_empty());
    }

    #[test]
    fn test_short_circuits_on_empty_input() {
        let mut pipeline = ComposeStage::new().then(exploding());
        assert!(pipeline.evaluate(Vec::new(), SystemTime::UNIX_EPOCH).is_empty());
    }

    #[test]
    fn test_empty_composition_is_identity() {
        let mut pipeline = compose(Vec::new());
        assert_eq!(pipeline.stage_count(), 0);
        let out = pipeline.evaluate(vec![pod("a", 1)], SystemTime::UNIX_EPOCH);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_nested_compose() {
        let inner = ComposeStage::new().then(SortStage);
        let stages: Vec<Box<dyn Evaluator>> = vec![Box::new(inner), Box::new(LimitStage::new(1))];
        let mut pipeline = compose(stages);
        let out = pipeline.evaluate(vec![pod("new", 9), pod("old", 1)], SystemTime::UNIX_EPOCH);
        assert_eq!(out[0].name, "old");
    }

    proptest! {
        #[test]
        fn prop_limit_zero_never_reaches_later_stages(count in 0usize..20) {
            let pods: Vec<Candidate> = (0..count).map(|i| pod(&format!("p{i}"), i as u64)).collect();
            let mut pipeline = ComposeStage::new().then(LimitStage::new(0)).then(exploding());
            prop_assert!(pipeline.evaluate(pods, SystemTime::UNIX_EPOCH).is_empty());
        }
    }
}
