//! Built-in policies: `immediate` and `spread`.

use crate::candidate::Phase;
use crate::config::Criteria;
use crate::pipeline::{AgeStage, ComposeStage, Evaluator, FilterStage, LimitStage, SortStage};
use crate::predicate::{all, All, NamePrefix, NamespaceIs, PhaseIs};
use crate::throttle::{CoolDownStage, SpreadStage};

/// Running candidates in the criteria's namespace whose name starts with
/// the criteria's name.
pub fn target_predicate(criteria: &Criteria) -> All {
    all(vec![
        Box::new(NamePrefix::new(criteria.name.clone())),
        Box::new(NamespaceIs::new(criteria.namespace.clone())),
        Box::new(PhaseIs(Phase::Running)),
    ])
}

/// The oldest `limit` targeted candidates strictly older than `max_age`.
pub fn core_pipeline(criteria: &Criteria) -> ComposeStage {
    ComposeStage::new()
        .then(FilterStage::new(target_predicate(criteria)))
        .then(SortStage)
        .then(AgeStage::new(criteria.max_age()))
        .then(LimitStage::new(criteria.limit()))
}

/// Removes expired candidates as soon as the cooldown allows.
pub fn immediate(criteria: &Criteria) -> Box<dyn Evaluator> {
    Box::new(CoolDownStage::new(
        criteria.cool_down(),
        core_pipeline(criteria),
    ))
}

/// Paces removals by `max_age / population`, with the cooldown as a hard
/// minimum gap between removals.
pub fn spread(criteria: &Criteria) -> Box<dyn Evaluator> {
    Box::new(CoolDownStage::new(
        criteria.cool_down(),
        SpreadStage::new(criteria.max_age(), core_pipeline(criteria)),
    ))
}
