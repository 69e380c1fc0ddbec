//! Error types for the diff crate.
//!
//! Computing a diff never fails. Errors only arise while loading or
//! validating configuration.

/// Errors that can occur while configuring the diff engine.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file is not valid TOML for [`crate::Config`].
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Reading the configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for fallible diff-crate operations.
pub type Result<T> = std::result::Result<T, DiffError>;
