//! Top-level kicker configuration and file loading.

use super::criteria::Criteria;
use crate::error::{KickerError, Result};
use std::time::Duration;

/// Default interval between control-loop cycles, in seconds.
pub const DEFAULT_CHECK_INTERVAL_SECS: i64 = 60;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "kicker.toml";

/// Configuration for the whole control loop.
///
/// # Examples
///
/// ```
/// use kicker::config::{Criteria, KickerConfig};
///
/// let mut config = KickerConfig::default()
///     .with_check_interval_secs(30)
///     .with_criteria(Criteria::new("worker"));
/// config.validate().unwrap();
/// assert_eq!(config.check_interval().as_secs(), 30);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KickerConfig {
    /// Seconds between cycles. Non-positive means the default.
    pub check_interval_secs: i64,

    /// Policies, evaluated in this order every cycle. At least one is required.
    pub criteria: Vec<Criteria>,
}

impl KickerConfig {
    pub fn with_check_interval_secs(mut self, secs: i64) -> Self {
        self.check_interval_secs = secs;
        self
    }

    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria.push(criteria);
        self
    }

    /// Applies defaults and validates every Criteria.
    pub fn validate(&mut self) -> Result<()> {
        if self.check_interval_secs <= 0 {
            self.check_interval_secs = DEFAULT_CHECK_INTERVAL_SECS;
        }
        if self.criteria.is_empty() {
            return Err(KickerError::InvalidConfig(
                "must provide at least one criteria".into(),
            ));
        }
        for criteria in &mut self.criteria {
            criteria.validate()?;
        }
        Ok(())
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(u64::try_from(self.check_interval_secs).unwrap_or(0))
    }
}

#[cfg(feature = "serde")]
impl KickerConfig {
    /// Parses and validates a TOML document.
    ///
    /// `origin` only labels errors.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        let mut config: KickerConfig =
            toml::from_str(content).map_err(|e| KickerError::ConfigParse {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration file at `path`, or [`DEFAULT_CONFIG_FILE_NAME`]
    /// in the working directory when `path` is `None`.
    ///
    /// The file is TOML, not the YAML `kicker.yaml` read by earlier kicker
    /// releases. Porting one means rewriting each `criteria` entry as a
    /// `[[criteria]]` table and renaming the camelCase keys to their
    /// snake_case `_secs` forms (`checkInterval` becomes
    /// `check_interval_secs`, `maxAge` becomes `max_age_secs`, and so on).
    pub fn load(path: Option<&std::path::Path>) -> Result<Self> {
        let path = path
            .map(std::path::Path::to_path_buf)
            .unwrap_or_else(|| std::path::Path::new(".").join(DEFAULT_CONFIG_FILE_NAME));
        let shown = path.display().to_string();

        let content = std::fs::read_to_string(&path).map_err(|source| KickerError::ConfigRead {
            path: shown.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&content, &shown)?;
        tracing::info!(
            path = %shown,
            criteria = config.criteria.len(),
            check_interval_secs = config.check_interval_secs,
            "loaded kicker config"
        );
        Ok(config)
    }
}
