//! Verifier configuration with environment variable support.
//!
//! # Example
//!
//! ```rust
//! use fieldcheck::{EmptyReportPolicy, NumericMode, VerifierConfig};
//!
//! let config = VerifierConfig::default()
//!     .numeric_mode(NumericMode::Legacy)
//!     .empty_report(EmptyReportPolicy::Pass);
//! assert_eq!(config.numeric_mode, NumericMode::Legacy);
//! ```
//!
//! With the `config` feature, the same settings can be read from
//! `FIELDCHECK_NUMERIC_MODE` and `FIELDCHECK_EMPTY_REPORT`.

use serde::{Deserialize, Serialize};

/// How Min, Max and Interval compare numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericMode {
    /// Compare once, in `f64`.
    #[default]
    Canonical,
    /// Compare under six representations (double, float, int, long, byte,
    /// short) and require every comparison to hold. Narrowing can make an
    /// in-range value fail.
    Legacy,
}

/// What `Report::passed_all` answers for a report without evaluations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReportPolicy {
    /// Fail with `VerifyError::EmptyReport`.
    #[default]
    Reject,
    /// Report success.
    Pass,
}

/// Settings for a [`Verifier`](crate::Verifier).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Numeric comparison semantics of the standard registry
    pub numeric_mode: NumericMode,
    /// Behaviour of `passed_all` on empty reports
    pub empty_report: EmptyReportPolicy,
}

impl VerifierConfig {
    /// Set the numeric comparison semantics.
    pub fn numeric_mode(mut self, mode: NumericMode) -> Self {
        self.numeric_mode = mode;
        self
    }

    /// Set the empty report policy.
    pub fn empty_report(mut self, policy: EmptyReportPolicy) -> Self {
        self.empty_report = policy;
        self
    }
}

#[cfg(feature = "config")]
mod env {
    use super::VerifierConfig;
    use thiserror::Error;

    /// Prefix of the environment variables read by [`VerifierConfig::from_env`].
    pub const ENV_PREFIX: &str = "FIELDCHECK_";

    /// Error type for configuration loading failures.
    #[derive(Debug, Error)]
    pub enum ConfigError {
        /// An environment variable held a value that does not parse.
        #[error("Configuration error: {0}")]
        Envy(#[from] envy::Error),
    }

    /// Load environment variables from a `.env` file, if present.
    ///
    /// Returns the path of the loaded file.
    pub fn load_dotenv() -> Option<std::path::PathBuf> {
        dotenvy::dotenv().ok()
    }

    impl VerifierConfig {
        /// Read the configuration from `FIELDCHECK_*` environment variables.
        ///
        /// Unset variables keep their defaults.
        pub fn from_env() -> Result<Self, ConfigError> {
            Self::from_vars(std::env::vars())
        }

        /// Read the configuration from an iterator of `(name, value)` pairs,
        /// using the same names as [`from_env`](Self::from_env).
        pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
        where
            I: IntoIterator<Item = (String, String)>,
        {
            let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
            tracing::debug!(?config, "loaded verifier configuration");
            Ok(config)
        }
    }
}

#[cfg(feature = "config")]
pub use env::{load_dotenv, ConfigError, ENV_PREFIX};
