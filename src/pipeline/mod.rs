//! Evaluator pipeline.
//!
//! An [`Evaluator`] maps an ordered candidate sequence to a subsequence.
//! Stages are small and single-purpose; [`ComposeStage`] threads the
//! sequence through them in order and stops as soon as one yields nothing.
//!
//! # Key Types
//!
//! - [`FilterStage`]: keeps candidates matching a predicate
//! - [`SortStage`]: stable oldest-first ordering
//! - [`AgeStage`]: keeps candidates created strictly before `now - max_age`
//! - [`LimitStage`]: keeps at most `n` candidates
//! - [`ExcludeStage`]: drops candidates whose identity is in a removed set
//! - [`ComposeStage`]: ordered, short-circuiting composition
//!
//! Sorting oldest-first before [`AgeStage`] and [`LimitStage`] yields the
//! "oldest `n` expired candidates" every built-in policy relies on.

mod compose;
mod stages;
mod types;

pub use compose::{compose, ComposeStage};
pub use stages::{AgeStage, ExcludeStage, FilterStage, FnStage, LimitStage, SortStage};
pub use types::Evaluator;
