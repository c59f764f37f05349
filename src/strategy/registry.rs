//! Name -> constructor registry.

use super::builtin;
use super::instance::Strategy;
use crate::config::{Criteria, STRATEGY_IMMEDIATE, STRATEGY_SPREAD};
use crate::error::{KickerError, Result};
use crate::pipeline::Evaluator;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Builds a fresh evaluator for one Criteria.
pub type StrategyConstructor = Arc<dyn Fn(&Criteria) -> Box<dyn Evaluator> + Send + Sync>;

/// Registry of named strategy constructors.
///
/// Entries are write-once: registering a taken name fails with
/// [`KickerError::DuplicateStrategy`]. Registration is expected at startup;
/// lookups may come from any thread afterwards.
///
/// # Examples
///
/// ```
/// use kicker::error::KickerError;
/// use kicker::strategy::StrategyRegistry;
///
/// let registry = StrategyRegistry::with_builtins();
/// assert_eq!(registry.names(), vec!["immediate", "spread"]);
///
/// let err = registry.lookup("bogus").err().unwrap();
/// assert!(matches!(err, KickerError::UnknownStrategy(_)));
/// ```
#[derive(Default)]
pub struct StrategyRegistry {
    constructors: RwLock<HashMap<String, StrategyConstructor>>,
}

impl StrategyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the `immediate` and `spread` policies.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register_builtins();
        registry
    }

    fn register_builtins(&self) {
        let mut map = self.write();
        map.insert(STRATEGY_IMMEDIATE.to_string(), Arc::new(builtin::immediate));
        map.insert(STRATEGY_SPREAD.to_string(), Arc::new(builtin::spread));
    }

    /// Binds `name` to `constructor`.
    pub fn register<F>(&self, name: impl Into<String>, constructor: F) -> Result<()>
    where
        F: Fn(&Criteria) -> Box<dyn Evaluator> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut map = self.write();
        if map.contains_key(&name) {
            return Err(KickerError::DuplicateStrategy(name));
        }
        debug!(strategy = %name, "registered strategy");
        map.insert(name, Arc::new(constructor));
        Ok(())
    }

    /// Returns the constructor bound to `name`.
    pub fn lookup(&self, name: &str) -> Result<StrategyConstructor> {
        self.read()
            .get(name)
            .cloned()
            .ok_or_else(|| KickerError::UnknownStrategy(name.to_string()))
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Builds a strategy for one validated Criteria.
    pub fn build(&self, criteria: &Criteria) -> Result<Strategy> {
        let constructor = self.lookup(&criteria.strategy)?;
        Ok(Strategy::new(criteria.clone(), constructor(criteria)))
    }

    /// Builds one strategy per Criteria, preserving order. Fails on the
    /// first unknown strategy name.
    pub fn build_group(&self, criteria: &[Criteria]) -> Result<Vec<Strategy>> {
        criteria.iter().map(|c| self.build(c)).collect()
    }

    // Entries are never partially written, so a poisoned lock still holds a
    // consistent map.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, StrategyConstructor>> {
        self.constructors.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, StrategyConstructor>> {
        self.constructors.write().unwrap_or_else(PoisonError::into_inner)
    }
}
