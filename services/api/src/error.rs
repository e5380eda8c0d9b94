//! services/api/src/error.rs
//!
//! Startup failures of the `api` binary. Request-time failures never reach this
//! type; handlers turn them into status codes directly.

use crate::config::ConfigError;
use astrologer_core::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A malformed environment variable, e.g. an unknown `LLM_PROVIDER` tag
    /// or a non-numeric `SESSION_TTL_SECS`.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The answer provider could not be built (the shared HTTP client failed
    /// to initialise).
    #[error("Answer provider error: {0}")]
    Port(#[from] PortError),

    /// Binding the listen socket or serving connections failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Startup settings that only fail once applied, such as an unparsable CORS origin.
    #[error("Startup error: {0}")]
    Internal(String),
}
