//! Workload instances under evaluation.
//!
//! A [`Candidate`] is the engine's view of one long-lived workload
//! instance: its identity, creation time and lifecycle phase. The engine
//! never mutates candidates; stages only reorder or drop them.

mod types;

pub use types::{Candidate, CandidateId, Phase};
