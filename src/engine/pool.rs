//! The candidate source/sink seam.

use crate::candidate::Candidate;
use crate::config::Criteria;
use crate::error::PoolError;
use std::sync::Arc;
use std::time::Duration;

/// How dependents of a removed candidate are treated.
///
/// The control loop always issues [`Propagation::Foreground`]. The other
/// policies are for pool implementations and callers that build their own
/// requests, e.g. a pool that retries a stuck removal with
/// [`RemovalRequest::with_propagation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Dependents are removed before the candidate is considered gone.
    #[default]
    Foreground,
    /// The candidate goes first; dependents are collected afterwards.
    Background,
    /// Dependents are left in place.
    Orphan,
}

/// A request to remove one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRequest {
    pub name: String,
    pub namespace: String,
    pub grace_period: Duration,
    pub propagation: Propagation,
}

impl RemovalRequest {
    /// Removal of `candidate` under `criteria`'s namespace and grace period,
    /// with foreground propagation.
    pub fn for_candidate(candidate: &Candidate, criteria: &Criteria) -> Self {
        Self {
            name: candidate.name.clone(),
            namespace: criteria.namespace.clone(),
            grace_period: criteria.grace_period(),
            propagation: Propagation::Foreground,
        }
    }

    pub fn with_propagation(mut self, propagation: Propagation) -> Self {
        self.propagation = propagation;
        self
    }

    /// Grace period in whole seconds, as most cluster APIs take it.
    pub fn grace_period_secs(&self) -> i64 {
        i64::try_from(self.grace_period.as_secs()).unwrap_or(i64::MAX)
    }
}

/// Where candidates come from and where removals go.
///
/// Implementations wrap a cluster API. Removing an already-removed
/// candidate should be reported as an error; the control loop treats it
/// as non-fatal.
pub trait CandidatePool {
    /// Lists every candidate currently known.
    fn list_candidates(&self) -> Result<Vec<Candidate>, PoolError>;

    /// Requests removal of one candidate.
    fn remove_candidate(&self, request: &RemovalRequest) -> Result<(), PoolError>;
}

impl<P: CandidatePool + ?Sized> CandidatePool for Arc<P> {
    fn list_candidates(&self) -> Result<Vec<Candidate>, PoolError> {
        (**self).list_candidates()
    }

    fn remove_candidate(&self, request: &RemovalRequest) -> Result<(), PoolError> {
        (**self).remove_candidate(request)
    }
}
