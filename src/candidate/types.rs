//! Candidate data model.

use std::fmt;
use std::time::{Duration, SystemTime};

/// Lifecycle phase of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

/// Identity of a candidate: `(name, namespace)`.
///
/// Two candidates with the same identity are the same workload instance,
/// regardless of the rest of their state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateId {
    pub name: String,
    pub namespace: String,
}

impl CandidateId {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// A workload instance eligible for evaluation.
///
/// # Examples
///
/// ```
/// use kicker::candidate::{Candidate, Phase};
/// use std::time::SystemTime;
///
/// let pod = Candidate::new("worker-7f9c", "default", SystemTime::now(), Phase::Running);
/// assert_eq!(pod.id().to_string(), "default/worker-7f9c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub namespace: String,
    pub created_at: SystemTime,
    pub phase: Phase,
}

impl Candidate {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        created_at: SystemTime,
        phase: Phase,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            created_at,
            phase,
        }
    }

    /// Returns the `(name, namespace)` identity.
    pub fn id(&self) -> CandidateId {
        CandidateId::new(self.name.clone(), self.namespace.clone())
    }

    /// Returns `true` if `id` names this workload instance.
    pub fn same_identity(&self, id: &CandidateId) -> bool {
        self.name == id.name && self.namespace == id.namespace
    }

    /// Age of the candidate at `now`. Zero if created in the future.
    pub fn age_at(&self, now: SystemTime) -> Duration {
        now.duration_since(self.created_at).unwrap_or(Duration::ZERO)
    }
}
