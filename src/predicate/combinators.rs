//! Boolean combinators.

use super::types::Predicate;
use crate::candidate::Candidate;

/// Conjunction. Evaluates left to right and stops at the first `false`.
pub struct All(pub Vec<Box<dyn Predicate>>);

impl Predicate for All {
    fn matches(&self, candidate: &Candidate) -> bool {
        self.0.iter().all(|p| p.matches(candidate))
    }
}

/// Disjunction. Evaluates left to right and stops at the first `true`.
pub struct Any(pub Vec<Box<dyn Predicate>>);

impl Predicate for Any {
    fn matches(&self, candidate: &Candidate) -> bool {
        self.0.iter().any(|p| p.matches(candidate))
    }
}

/// Negation.
pub struct Not(pub Box<dyn Predicate>);

impl Predicate for Not {
    fn matches(&self, candidate: &Candidate) -> bool {
        !self.0.matches(candidate)
    }
}

/// Builds an [`All`] from boxed predicates.
pub fn all(predicates: Vec<Box<dyn Predicate>>) -> All {
    All(predicates)
}

/// Builds an [`Any`] from boxed predicates.
pub fn any(predicates: Vec<Box<dyn Predicate>>) -> Any {
    Any(predicates)
}

/// Negates a predicate.
pub fn not<P: Predicate + 'static>(predicate: P) -> Not {
    Not(Box::new(predicate))
}
