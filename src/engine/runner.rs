//! Control-loop execution.

use super::pool::{CandidatePool, RemovalRequest};
use crate::candidate::CandidateId;
use crate::config::KickerConfig;
use crate::error::{KickerError, Result};
use crate::pipeline::{Evaluator, ExcludeStage};
use crate::strategy::{Strategy, StrategyRegistry};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, info, warn};

/// Longest uninterrupted sleep between cancellation checks.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Outcome of one control-loop cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Candidates listed at the start of the cycle.
    pub candidates_seen: usize,

    /// Strategies that were evaluated.
    pub strategies_run: usize,

    /// Candidates whose removal request succeeded, in request order.
    pub kicked: Vec<CandidateId>,

    /// Candidates whose removal request failed.
    pub failed: Vec<CandidateId>,
}

/// Outcome of a run that ended by cancellation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KickerResult {
    /// Completed cycles.
    pub cycles: usize,

    /// Successful removals across all cycles.
    pub kicked: usize,

    /// Failed removals across all cycles.
    pub failed: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// The control loop: a candidate pool plus the ordered strategies run
/// against it every cycle.
pub struct Kicker<P> {
    pool: P,
    strategies: Vec<Strategy>,
    check_interval: Duration,
}

impl<P: CandidatePool> Kicker<P> {
    pub fn new(pool: P, strategies: Vec<Strategy>, check_interval: Duration) -> Self {
        Self {
            pool,
            strategies,
            check_interval,
        }
    }

    /// Resolves every Criteria of a validated config against `registry`.
    ///
    /// Fails with [`KickerError::UnknownStrategy`] before anything runs if
    /// a Criteria names an unregistered strategy.
    pub fn from_config(pool: P, config: &KickerConfig, registry: &StrategyRegistry) -> Result<Self> {
        let strategies = registry.build_group(&config.criteria)?;
        Ok(Self::new(pool, strategies, config.check_interval()))
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    pub fn check_interval(&self) -> Duration {
        self.check_interval
    }

    /// Runs one cycle at `now`.
    ///
    /// Returns [`KickerError::Fetch`] if the pool cannot be listed. Removal
    /// failures are logged and reported in [`CycleReport::failed`].
    pub fn run_cycle(&mut self, now: SystemTime) -> Result<CycleReport> {
        let mut remaining = self
            .pool
            .list_candidates()
            .map_err(|source| KickerError::Fetch { source })?;

        info!(
            candidates = remaining.len(),
            strategies = self.strategies.len(),
            "running strategies"
        );

        let mut report = CycleReport {
            candidates_seen: remaining.len(),
            ..CycleReport::default()
        };

        for strategy in &mut self.strategies {
            if remaining.is_empty() {
                debug!("no candidates left, skipping remaining strategies");
                break;
            }
            report.strategies_run += 1;

            let selected = strategy.evaluate(remaining.clone(), now);
            if selected.is_empty() {
                continue;
            }

            let criteria = strategy.criteria();
            for candidate in &selected {
                let request = RemovalRequest::for_candidate(candidate, criteria);
                info!(
                    candidate = %candidate.name,
                    namespace = %request.namespace,
                    criteria = %criteria.name,
                    grace_period_secs = request.grace_period_secs(),
                    "kicking candidate"
                );
                match self.pool.remove_candidate(&request) {
                    Ok(()) => report.kicked.push(candidate.id()),
                    Err(source) => {
                        let err = KickerError::Removal {
                            name: request.name.clone(),
                            namespace: request.namespace.clone(),
                            source,
                        };
                        warn!(error = %err, "removal failed, continuing");
                        report.failed.push(candidate.id());
                    }
                }
            }

            remaining = ExcludeStage::from_candidates(&selected).evaluate(remaining, now);
        }

        Ok(report)
    }

    /// Runs cycles until a listing failure.
    pub fn run(&mut self) -> Result<KickerResult> {
        self.run_with_cancel(None)
    }

    /// Runs cycles until a listing failure or until `cancel` is set.
    ///
    /// The flag is checked before every cycle and throughout the sleep
    /// between cycles.
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> Result<KickerResult> {
        let mut result = KickerResult::default();

        loop {
            if is_cancelled(cancel.as_deref()) {
                result.cancelled = true;
                break;
            }

            let report = self.run_cycle(SystemTime::now())?;
            result.cycles += 1;
            result.kicked += report.kicked.len();
            result.failed += report.failed.len();

            debug!(interval = ?self.check_interval, "sleeping");
            if !sleep_unless_cancelled(self.check_interval, cancel.as_deref()) {
                result.cancelled = true;
                break;
            }
        }

        info!(
            cycles = result.cycles,
            kicked = result.kicked,
            failed = result.failed,
            "kicker stopped"
        );
        Ok(result)
    }
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Sleeps for `duration`. Returns `false` if cancelled before it elapsed.
fn sleep_unless_cancelled(duration: Duration, cancel: Option<&AtomicBool>) -> bool {
    let Some(flag) = cancel else {
        std::thread::sleep(duration);
        return true;
    };

    let deadline = Instant::now() + duration;
    loop {
        if flag.load(Ordering::Relaxed) {
            return false;
        }
        let left = deadline.saturating_duration_since(Instant::now());
        if left.is_zero() {
            return true;
        }
        std::thread::sleep(left.min(SLEEP_SLICE));
    }
}
