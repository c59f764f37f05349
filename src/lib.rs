//! Policy-driven workload eviction engine.
//!
//! Periodically scans a pool of long-lived workload instances
//! ("candidates") and removes ("kicks") a subset of them according to
//! named, configurable policies, trading workload freshness against
//! cluster churn.
//!
//! - **Predicates** ([`predicate`]): boolean tests over one candidate,
//!   composable with short-circuiting AND / OR / NOT.
//! - **Pipeline** ([`pipeline`]): filter, oldest-first sort, age cut and
//!   limit stages, threaded through a short-circuiting composition.
//! - **Throttles** ([`throttle`]): cooldown and population-paced spread
//!   stages carrying timer state between cycles.
//! - **Strategies** ([`strategy`]): a registry of named constructors and
//!   the built-in `immediate` and `spread` policies.
//! - **Engine** ([`engine`]): the control loop over an abstract
//!   [`CandidatePool`](engine::CandidatePool).
//!
//! # Architecture
//!
//! Fetching and removing candidates is delegated to a `CandidatePool`
//! implementation; this crate contains no cluster client. Evaluation is
//! strictly sequential: throttle state and cross-strategy exclusion depend
//! on strategies running one after another within a cycle.
//!
//! ```
//! use kicker::candidate::{Candidate, Phase};
//! use kicker::config::{Criteria, KickerConfig};
//! use kicker::engine::{CandidatePool, Kicker, RemovalRequest};
//! use kicker::error::PoolError;
//! use kicker::strategy::StrategyRegistry;
//! use std::time::{Duration, SystemTime};
//!
//! struct Fixed(Vec<Candidate>);
//!
//! impl CandidatePool for Fixed {
//!     fn list_candidates(&self) -> Result<Vec<Candidate>, PoolError> {
//!         Ok(self.0.clone())
//!     }
//!     fn remove_candidate(&self, _: &RemovalRequest) -> Result<(), PoolError> {
//!         Ok(())
//!     }
//! }
//!
//! let now = SystemTime::now();
//! let day = Duration::from_secs(86_400);
//! let pool = Fixed(vec![
//!     Candidate::new("worker-old", "default", now - 2 * day, Phase::Running),
//!     Candidate::new("worker-new", "default", now, Phase::Running),
//! ]);
//!
//! let mut config = KickerConfig::default()
//!     .with_criteria(Criteria::new("worker").with_strategy("immediate"));
//! config.validate().unwrap();
//!
//! let mut kicker = Kicker::from_config(pool, &config, &StrategyRegistry::with_builtins()).unwrap();
//! let report = kicker.run_cycle(now).unwrap();
//! assert_eq!(report.kicked.len(), 1);
//! assert_eq!(report.kicked[0].name, "worker-old");
//! ```

pub mod candidate;
pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod predicate;
pub mod strategy;
pub mod throttle;

pub use error::{KickerError, Result};
