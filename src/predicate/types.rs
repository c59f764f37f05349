//! Core predicate trait and atomic predicates.

use crate::candidate::{Candidate, Phase};

/// A side-effect-free boolean test over one candidate.
///
/// Any `Fn(&Candidate) -> bool` closure is a predicate.
///
/// # Examples
///
/// ```
/// use kicker::candidate::{Candidate, Phase};
/// use kicker::predicate::{NamePrefix, Predicate};
/// use std::time::SystemTime;
///
/// let pod = Candidate::new("worker-1", "default", SystemTime::now(), Phase::Running);
/// assert!(NamePrefix::new("worker").matches(&pod));
///
/// let custom = |c: &Candidate| c.name.ends_with("-1");
/// assert!(custom.matches(&pod));
/// ```
pub trait Predicate: Send + Sync {
    /// Returns `true` if the candidate satisfies this predicate.
    fn matches(&self, candidate: &Candidate) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Candidate) -> bool + Send + Sync,
{
    fn matches(&self, candidate: &Candidate) -> bool {
        self(candidate)
    }
}

/// Matches candidates whose namespace equals the given one.
#[derive(Debug, Clone)]
pub struct NamespaceIs(pub String);

impl NamespaceIs {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self(namespace.into())
    }
}

impl Predicate for NamespaceIs {
    fn matches(&self, candidate: &Candidate) -> bool {
        candidate.namespace == self.0
    }
}

/// Matches candidates whose name starts with the given prefix.
#[derive(Debug, Clone)]
pub struct NamePrefix(pub String);

impl NamePrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }
}

impl Predicate for NamePrefix {
    fn matches(&self, candidate: &Candidate) -> bool {
        candidate.name.starts_with(&self.0)
    }
}

/// Matches candidates in the given lifecycle phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseIs(pub Phase);

impl Predicate for PhaseIs {
    fn matches(&self, candidate: &Candidate) -> bool {
        candidate.phase == self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn pod(name: &str, ns: &str, phase: Phase) -> Candidate {
        Candidate::new(name, ns, SystemTime::UNIX_EPOCH, phase)
    }

    #[test]
    fn test_namespace() {
        let p = NamespaceIs::new("default");
        assert!(p.matches(&pod("a", "default", Phase::Running)));
        assert!(!p.matches(&pod("a", "kube-system", Phase::Running)));
    }

    #[test]
    fn test_name_prefix() {
        let p = NamePrefix::new("worker");
        assert!(p.matches(&pod("worker-abc", "default", Phase::Running)));
        assert!(p.matches(&pod("worker", "default", Phase::Running)));
        assert!(!p.matches(&pod("web-worker", "default", Phase::Running)));
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        assert!(NamePrefix::new("").matches(&pod("anything", "x", Phase::Unknown)));
    }

    #[test]
    fn test_phase() {
        let p = PhaseIs(Phase::Running);
        assert!(p.matches(&pod("a", "default", Phase::Running)));
        assert!(!p.matches(&pod("a", "default", Phase::Pending)));
    }

    #[test]
    fn test_closure_and_box() {
        let boxed: Box<dyn Predicate> = Box::new(|c: &Candidate| c.name.len() > 3);
        assert!(boxed.matches(&pod("long-name", "default", Phase::Running)));
        assert!(!boxed.matches(&pod("ab", "default", Phase::Running)));
    }
}
