//! Error types for SweetCheck

use thiserror::Error;

use crate::soft_assert::SoftAssertionError;

/// Result type alias using SweetCheck Error
pub type Result<T> = std::result::Result<T, Error>;

/// SweetCheck error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown environment: {0} (expected dev, staging or prod)")]
    UnknownEnvironment(String),

    #[error(transparent)]
    SoftAssertion(#[from] SoftAssertionError),
}
