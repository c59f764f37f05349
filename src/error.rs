//! Error taxonomy for the kicker engine.
//!
//! Startup failures ([`InvalidCriteria`](KickerError::InvalidCriteria),
//! [`InvalidConfig`](KickerError::InvalidConfig), registry errors, config
//! file errors) are fatal before the control loop starts. At runtime only
//! [`Fetch`](KickerError::Fetch) is fatal; [`Removal`](KickerError::Removal)
//! is recorded and the cycle carries on.

use thiserror::Error;

/// Error reported by a [`CandidatePool`](crate::engine::CandidatePool)
/// implementation.
pub type PoolError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, KickerError>;

/// Errors produced by the kicker engine.
#[derive(Debug, Error)]
pub enum KickerError {
    /// A Criteria record failed validation.
    #[error("invalid criteria '{name}': {reason}")]
    InvalidCriteria { name: String, reason: String },

    /// The top-level configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A strategy name was registered twice.
    #[error("strategy '{0}' is already registered")]
    DuplicateStrategy(String),

    /// A Criteria referenced a strategy nobody registered.
    #[error("strategy '{0}' is not registered for use")]
    UnknownStrategy(String),

    /// The candidate pool could not be listed.
    #[error("failed to list candidates: {source}")]
    Fetch {
        #[source]
        source: PoolError,
    },

    /// A single candidate could not be removed.
    #[error("error kicking candidate '{namespace}/{name}': {source}")]
    Removal {
        name: String,
        namespace: String,
        #[source]
        source: PoolError,
    },

    /// The configuration file could not be read.
    #[error("error loading config file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed.
    #[error("error parsing config file '{path}': {message}")]
    ConfigParse { path: String, message: String },
}

impl KickerError {
    pub(crate) fn invalid_criteria(name: &str, reason: impl Into<String>) -> Self {
        KickerError::InvalidCriteria {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors that must stop the process.
    ///
    /// Removal failures are the only recoverable kind.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, KickerError::Removal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_is_not_fatal() {
        let err = KickerError::Removal {
            name: "worker-1".into(),
            namespace: "default".into(),
            source: "not found".into(),
        };
        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "error kicking candidate 'default/worker-1': not found"
        );
    }

    #[test]
    fn test_fetch_is_fatal() {
        let err = KickerError::Fetch {
            source: "connection refused".into(),
        };
        assert!(err.is_fatal());
        assert!(KickerError::UnknownStrategy("bogus".into()).is_fatal());
    }

    #[test]
    fn test_invalid_criteria_message() {
        let err = KickerError::invalid_criteria("worker", "name missing");
        assert_eq!(err.to_string(), "invalid criteria 'worker': name missing");
    }
}
