//! Crate-wide error type and `Result` alias.
//!
//! Network-facing probe failures have their own taxonomy in
//! [`crate::core::probe::ProbeError`]; this type covers everything above that
//! boundary (configuration, permissions, and the Discord framework itself).

use thiserror::Error;

/// Top-level error for configuration, command, and framework failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration, including out-of-range user input.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O failure outside the probe boundary (e.g. reading the config file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable was missing or unreadable.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// A privileged command was invoked by a non-privileged identity.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Serenity/Poise framework error.
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Error::Framework(Box::new(value))
    }
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
