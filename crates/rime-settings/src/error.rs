//! Error types for settings resolution.

use thiserror::Error;

/// Settings-level errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The backend configuration source could not be opened.
    #[error("failed to open config source '{name}': {source}")]
    BackendOpen {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
