use spacemap_core::ScanError;
use thiserror::Error;

/// Failure of the render loop.
#[derive(Debug, Error)]
pub enum AppError {
    /// The terminal could not be set up, read, or written.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The background scan failed; surfaced once, after terminal teardown.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Invalid configuration value taken from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a positive number of milliseconds, got {value:?}")]
    InvalidRefresh { name: &'static str, value: String },

    #[error("{name} must be one of 1, 0, true, false, got {value:?}")]
    InvalidFlag { name: &'static str, value: String },
}
