//! Error type shared by instance loading, configuration and report output.
//!
//! The topology and analysis algorithms themselves never fail: empty or
//! degenerate inputs produce empty results. Only the I/O boundaries return
//! errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The instance text does not follow the `n / station / motes` layout.
    #[error("malformed instance (line {line}): {reason}")]
    MalformedInstance { line: usize, reason: String },

    /// The configuration file is not valid TOML for `SimulationConfig`.
    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration parsed but holds out-of-range values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedInstance { line, reason: reason.into() }
    }
}
