//! crates/astrologer_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like LLM vendors or the
//! wall clock.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

use crate::domain::AstrologyContext;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// Errors an answer provider can surface to its caller.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("{provider} API key required")]
    MissingCredential { provider: ProviderTag },

    #[error("{provider} API error: {status} - {body}")]
    Status {
        provider: ProviderTag,
        status: u16,
        body: String,
    },

    #[error("{provider} request failed: {message}")]
    Transport {
        provider: ProviderTag,
        message: String,
    },

    #[error("AI service not configured. Please check your API key settings.")]
    NotConfigured,

    #[error("Unsupported LLM provider: {0}. Please check your configuration.")]
    UnsupportedProvider(String),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Provider Selection
//=========================================================================================

/// The vendors an answer provider can be backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderTag {
    OpenAi,
    Anthropic,
    Gemini,
    Local,
}

impl ProviderTag {
    /// The configuration spelling of the tag.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderTag::OpenAi => "openai",
            ProviderTag::Anthropic => "anthropic",
            ProviderTag::Gemini => "gemini",
            ProviderTag::Local => "local",
        }
    }

    /// Human-facing vendor name used in error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderTag::OpenAi => "OpenAI",
            ProviderTag::Anthropic => "Anthropic",
            ProviderTag::Gemini => "Gemini",
            ProviderTag::Local => "Local LLM",
        }
    }
}

impl fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProviderTag {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderTag::OpenAi),
            "anthropic" => Ok(ProviderTag::Anthropic),
            "gemini" => Ok(ProviderTag::Gemini),
            "local" => Ok(ProviderTag::Local),
            _ => Err(PortError::UnsupportedProvider(s.to_string())),
        }
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Produces a free-text answer to `question` for the person described by `context`.
    async fn produce_answer(&self, question: &str, context: &AstrologyContext)
        -> PortResult<String>;

    /// The vendor behind this provider, or `None` when nothing is configured.
    fn tag(&self) -> Option<ProviderTag>;
}

/// Stand-in used when no vendor has been configured. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredProvider;

#[async_trait]
impl AnswerProvider for UnconfiguredProvider {
    async fn produce_answer(
        &self,
        _question: &str,
        _context: &AstrologyContext,
    ) -> PortResult<String> {
        Err(PortError::NotConfigured)
    }

    fn tag(&self) -> Option<ProviderTag> {
        None
    }
}

/// Source of "now" for ages and response timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant. Used by tests and replayed sessions.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
