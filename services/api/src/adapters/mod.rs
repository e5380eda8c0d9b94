//! services/api/src/adapters/mod.rs
//!
//! Vendor adapters implementing the `AnswerProvider` port, plus the plumbing
//! they share: the HTTP client, the request/response round trip and answer
//! extraction.

pub mod anthropic_llm;
pub mod gemini_llm;
pub mod local_llm;
pub mod openai_llm;

pub use anthropic_llm::AnthropicAnswerAdapter;
pub use gemini_llm::GeminiAnswerAdapter;
pub use local_llm::LocalAnswerAdapter;
pub use openai_llm::OpenAiAnswerAdapter;

use crate::config::LlmSettings;
use astrologer_core::ports::{
    AnswerProvider, PortError, PortResult, ProviderTag, UnconfiguredProvider,
};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Returned in place of an answer when a successful response has no text where
/// the vendor normally puts it.
pub const NO_ANSWER_PLACEHOLDER: &str = "Unable to generate response";

/// Shared sampling settings for every vendor.
pub(crate) const TEMPERATURE: f64 = 0.7;
pub(crate) const MAX_TOKENS: u32 = 300;

/// Builds the one answer provider the service will use, selected by `settings.provider`.
pub fn build_answer_provider(settings: &LlmSettings) -> PortResult<Arc<dyn AnswerProvider>> {
    let Some(tag) = settings.provider else {
        warn!("LLM_PROVIDER is not set; provider-backed questions will be refused.");
        return Ok(Arc::new(UnconfiguredProvider));
    };

    info!(
        provider = tag.as_str(),
        has_api_key = settings.api_key.is_some(),
        model = settings.model.as_deref().unwrap_or("default"),
        "Initializing answer provider."
    );

    let client = build_http_client(settings.timeout)?;
    let provider: Arc<dyn AnswerProvider> = match tag {
        ProviderTag::OpenAi => Arc::new(OpenAiAnswerAdapter::new(client, settings)),
        ProviderTag::Anthropic => Arc::new(AnthropicAnswerAdapter::new(client, settings)),
        ProviderTag::Gemini => Arc::new(GeminiAnswerAdapter::new(client, settings)),
        ProviderTag::Local => Arc::new(LocalAnswerAdapter::new(client, settings)),
    };
    Ok(provider)
}

pub fn build_http_client(timeout: Duration) -> PortResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| PortError::Unexpected(format!("Failed to build HTTP client: {}", e)))
}

/// Returns the configured key, or the missing-credential error for `provider`.
pub(crate) fn require_key(provider: ProviderTag, api_key: Option<&str>) -> PortResult<&str> {
    api_key.ok_or(PortError::MissingCredential { provider })
}

/// Sends a prepared request and returns the parsed body of a successful response.
///
/// A success whose body is not JSON yields `Value::Null`, which the extractors
/// turn into the placeholder answer.
pub(crate) async fn send_json(provider: ProviderTag, request: RequestBuilder) -> PortResult<Value> {
    let response = request.send().await.map_err(|e| {
        error!(provider = provider.as_str(), "HTTP request failed: {}", e);
        PortError::Transport {
            provider,
            message: e.to_string(),
        }
    })?;

    let status = response.status();
    info!(provider = provider.as_str(), status = %status, "Answer provider responded.");

    let text = response.text().await.map_err(|e| PortError::Transport {
        provider,
        message: e.to_string(),
    })?;

    if !status.is_success() {
        error!(provider = provider.as_str(), status = %status, "API error response: {}", text);
        return Err(PortError::Status {
            provider,
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
        warn!(provider = provider.as_str(), "Response body is not JSON: {}", e);
        Value::Null
    }))
}

/// Reads the string at a JSON pointer, falling back to the placeholder when it
/// is absent, not a string, or empty.
pub(crate) fn answer_at(data: &Value, pointer: &str) -> String {
    match data.pointer(pointer).and_then(Value::as_str) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            warn!(pointer, "No answer text in provider response.");
            NO_ANSWER_PLACEHOLDER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answer_at_reads_nested_text() {
        let data = json!({ "choices": [{ "message": { "content": "Stars align." } }] });
        assert_eq!(answer_at(&data, "/choices/0/message/content"), "Stars align.");
    }

    #[test]
    fn answer_at_falls_back_on_odd_shapes() {
        for data in [
            json!({}),
            json!({ "choices": [] }),
            json!({ "choices": [{ "message": { "content": "" } }] }),
            json!({ "choices": [{ "message": { "content": 7 } }] }),
            Value::Null,
        ] {
            assert_eq!(answer_at(&data, "/choices/0/message/content"), NO_ANSWER_PLACEHOLDER);
        }
    }

    #[test]
    fn unset_provider_builds_the_unconfigured_stand_in() {
        let provider = build_answer_provider(&LlmSettings::default()).unwrap();
        assert!(provider.tag().is_none());
    }

    #[test]
    fn each_tag_builds_its_own_adapter() {
        for tag in [
            ProviderTag::OpenAi,
            ProviderTag::Anthropic,
            ProviderTag::Gemini,
            ProviderTag::Local,
        ] {
            let settings = LlmSettings {
                provider: Some(tag),
                ..LlmSettings::default()
            };
            let provider = build_answer_provider(&settings).unwrap();
            assert_eq!(provider.tag(), Some(tag));
        }
    }
}
