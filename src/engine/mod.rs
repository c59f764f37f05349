//! Control loop.
//!
//! One cycle: list every candidate from the [`CandidatePool`], run each
//! [`Strategy`](crate::strategy::Strategy) in configuration order over the
//! shrinking candidate set, request removal of whatever it selects, then
//! sleep for the check interval.
//!
//! A candidate selected by one strategy is removed from the set before the
//! next strategy runs, so no two strategies act on the same candidate in a
//! cycle. Removal failures are logged and skipped; a listing failure stops
//! the loop.

mod pool;
mod runner;

pub use pool::{CandidatePool, Propagation, RemovalRequest};
pub use runner::{CycleReport, Kicker, KickerResult};
