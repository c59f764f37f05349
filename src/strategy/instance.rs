//! A Criteria bound to its stateful evaluator.

use crate::candidate::Candidate;
use crate::config::Criteria;
use crate::pipeline::Evaluator;
use std::time::SystemTime;
use tracing::debug;

/// One configured eviction policy.
///
/// Owns its evaluator, and with it any throttle state. Strategies are
/// built once at startup and evaluated by a single caller, once per cycle.
pub struct Strategy {
    criteria: Criteria,
    evaluator: Box<dyn Evaluator>,
}

impl Strategy {
    pub fn new(criteria: Criteria, evaluator: Box<dyn Evaluator>) -> Self {
        Self { criteria, evaluator }
    }

    /// The Criteria this strategy was built from.
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Selects the candidates to remove at `now`.
    pub fn evaluate(&mut self, candidates: Vec<Candidate>, now: SystemTime) -> Vec<Candidate> {
        debug!(
            criteria = %self.criteria.name,
            strategy = %self.criteria.strategy,
            candidates = candidates.len(),
            "evaluating strategy"
        );
        self.evaluator.evaluate(candidates, now)
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("criteria", &self.criteria)
            .field("evaluator", &self.evaluator.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Phase;
    use crate::strategy::StrategyRegistry;
    use std::time::Duration;

    #[test]
    fn test_each_strategy_owns_its_state() {
        let registry = StrategyRegistry::with_builtins();
        let mut criteria = Criteria::new("worker")
            .with_strategy("immediate")
            .with_max_age_secs(100);
        criteria.min_age_secs = 10;
        criteria.validate().unwrap();

        let mut first = registry.build(&criteria).unwrap();
        let mut second = registry.build(&criteria).unwrap();

        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(10_000);
        let old = vec![Candidate::new("worker-1", "default", SystemTime::UNIX_EPOCH, Phase::Running)];

        assert_eq!(first.evaluate(old.clone(), now).len(), 1);
        // the first strategy's cooldown does not leak into the second
        assert_eq!(second.evaluate(old.clone(), now).len(), 1);
        assert!(first.evaluate(old, now).is_empty());
    }

    #[test]
    fn test_criteria_accessor_and_debug() {
        let mut criteria = Criteria::new("worker");
        criteria.validate().unwrap();
        let strategy = StrategyRegistry::with_builtins().build(&criteria).unwrap();
        assert_eq!(strategy.criteria(), &criteria);
        assert!(format!("{strategy:?}").contains("cool-down"));
    }
}
