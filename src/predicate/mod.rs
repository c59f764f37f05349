//! Predicate algebra over single candidates.
//!
//! Atomic predicates test one property of a [`Candidate`](crate::candidate::Candidate);
//! combinators compose them:
//!
//! - [`All`]: true iff every predicate holds. Left-to-right, stops at the
//!   first `false`. Empty is vacuously `true`.
//! - [`Any`]: true iff some predicate holds. Stops at the first `true`.
//!   Empty is vacuously `false`.
//! - [`Not`]: negation.
//!
//! Order inside a combinator only affects cost, never the result. Put the
//! cheapest and most selective predicates first.

mod combinators;
mod types;

pub use combinators::{all, any, not, All, Any, Not};
pub use types::{NamePrefix, NamespaceIs, PhaseIs, Predicate};
