//! Errors raised while turning a `tock.toml` into a [`TockConfig`](crate::TockConfig).

use std::io;
use std::path::PathBuf;

/// Why a configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The content is not TOML, or does not match the `tock.toml` schema.
    #[error("malformed tock.toml: {0}")]
    Malformed(#[from] toml::de::Error),

    /// A key parsed but holds a value the bench cannot use.
    #[error("bad value for `{key}`: {reason}")]
    BadValue {
        /// Dotted key, e.g. `bench.steps`.
        key: &'static str,
        /// What the value must satisfy.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn bad_value(key: &'static str, reason: impl Into<String>) -> Self {
        Self::BadValue {
            key,
            reason: reason.into(),
        }
    }
}
