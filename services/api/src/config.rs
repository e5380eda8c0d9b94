//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use astrologer_core::ProviderTag;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Everything needed to build the answer provider.
#[derive(Clone)]
pub struct LlmSettings {
    /// `None` leaves the engine unconfigured.
    pub provider: Option<ProviderTag>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    /// Replaces the vendor URL (the API base for Gemini).
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: None,
            api_key: None,
            model: None,
            endpoint: None,
            timeout: Duration::from_secs(60),
        }
    }
}

// Hand-written so the key never reaches a log line.
impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("provider", &self.provider)
            .field("has_api_key", &self.api_key.is_some())
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub cors_origin: String,
    /// Sessions unused for longer than this are discarded.
    pub session_ttl: Duration,
    pub llm: LlmSettings,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // --- Load Server Settings ---
        let bind_address_str = get("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = get("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin =
            get("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        let session_ttl = match get("SESSION_TTL_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidValue(
                        "SESSION_TTL_SECS".to_string(),
                        "must be greater than zero".to_string(),
                    ))
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => {
                    return Err(ConfigError::InvalidValue(
                        "SESSION_TTL_SECS".to_string(),
                        e.to_string(),
                    ))
                }
            },
            None => Duration::from_secs(3600),
        };

        // --- Load Answer Provider Settings ---
        let provider = get("LLM_PROVIDER")
            .map(|tag| tag.parse::<ProviderTag>())
            .transpose()
            .map_err(|e| ConfigError::InvalidValue("LLM_PROVIDER".to_string(), e.to_string()))?;

        let timeout = match get("LLM_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::InvalidValue("LLM_TIMEOUT_SECS".to_string(), e.to_string()))?,
            None => LlmSettings::default().timeout,
        };

        let llm = LlmSettings {
            provider,
            api_key: get("LLM_API_KEY"),
            model: get("LLM_MODEL"),
            endpoint: get("LLM_ENDPOINT"),
            timeout,
        };

        Ok(Self {
            bind_address,
            log_level,
            cors_origin,
            session_ttl,
            llm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_leave_the_provider_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.llm.provider.is_none());
        assert_eq!(config.llm.timeout, Duration::from_secs(60));
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn session_ttl_is_read_and_must_be_positive() {
        let config = load(&[("SESSION_TTL_SECS", "90")]).unwrap();
        assert_eq!(config.session_ttl, Duration::from_secs(90));
        assert!(load(&[("SESSION_TTL_SECS", "0")]).is_err());
        assert!(load(&[("SESSION_TTL_SECS", "soon")]).is_err());
    }

    #[test]
    fn provider_settings_are_read() {
        let config = load(&[
            ("LLM_PROVIDER", "Gemini"),
            ("LLM_API_KEY", "secret-key"),
            ("LLM_MODEL", "gemini-1.5-pro"),
            ("LLM_TIMEOUT_SECS", "15"),
        ])
        .unwrap();
        assert_eq!(config.llm.provider, Some(ProviderTag::Gemini));
        assert_eq!(config.llm.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(config.llm.timeout, Duration::from_secs(15));
        assert!(!format!("{:?}", config).contains("secret-key"));
    }

    #[test]
    fn blank_provider_means_unconfigured() {
        let config = load(&[("LLM_PROVIDER", "  ")]).unwrap();
        assert!(config.llm.provider.is_none());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = load(&[("LLM_PROVIDER", "cohere")]).unwrap_err();
        assert!(err.to_string().contains("LLM_PROVIDER"));
        assert!(err.to_string().contains("Unsupported LLM provider: cohere"));
    }

    #[test]
    fn bad_log_level_is_rejected() {
        assert!(load(&[("RUST_LOG", "chatty")]).is_err());
    }
}
