//! Settings error types.

use splitconf_decode::DecodeError;
use thiserror::Error;

/// Settings-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key is empty or has an empty path segment.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// Value could not be decoded into the target type.
    #[error("failed to decode {}: {}", display_key(.key), .source)]
    Decode {
        /// The key being decoded, empty for the whole store.
        key: String,
        /// The underlying decode error.
        #[source]
        source: DecodeError,
    },
}

fn display_key(key: &str) -> String {
    if key.is_empty() {
        "settings".to_string()
    } else {
        format!("key '{key}'")
    }
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
