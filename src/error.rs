//! Error types for the overlap layout.
//!
//! Only construction and state decoding can fail. Everything the container does at
//! runtime is total: calls made out of order are ignored, not reported.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlapError {
    /// A style option has an unrecognized code, the wrong type or an out of range value.
    #[error("invalid configuration for '{key}': {reason}")]
    InvalidConfiguration {
        /// Option name as it appears in the attribute map.
        key: String,
        reason: String,
    },

    /// The configuration document is not valid TOML.
    #[error("configuration parse error: {0}")]
    ConfigSyntax(#[from] toml::de::Error),

    /// Saved instance state could not be decoded.
    #[error("corrupt saved state: {0}")]
    CorruptSnapshot(String),
}

impl OverlapError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OverlapError>;
