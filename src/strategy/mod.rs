//! Named eviction strategies.
//!
//! A strategy constructor turns one [`Criteria`](crate::config::Criteria)
//! into a stateful [`Evaluator`](crate::pipeline::Evaluator). Constructors
//! are registered by name in a [`StrategyRegistry`]; a [`Strategy`] binds
//! one Criteria to the evaluator built for it.
//!
//! # Built-in policies
//!
//! Both share the same core: keep running candidates matching the name
//! prefix and namespace, sort oldest first, keep those older than
//! `max_age`, take at most `limit`.
//!
//! - [`immediate`]: `CoolDown(cool_down, core)`
//! - [`spread`]: `CoolDown(cool_down, Spread(max_age, core))`

mod builtin;
mod instance;
mod registry;

pub use builtin::{core_pipeline, immediate, spread, target_predicate};
pub use instance::Strategy;
pub use registry::{StrategyConstructor, StrategyRegistry};
