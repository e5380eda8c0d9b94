//! services/api/src/adapters/anthropic_llm.rs
//!
//! Adapter for the Anthropic messages endpoint.

use async_trait::async_trait;
use astrologer_core::{
    domain::AstrologyContext,
    ports::{AnswerProvider, PortResult, ProviderTag},
    prompt::build_astrology_prompt,
};
use reqwest::Client;
use serde_json::json;
use tracing::info;

use super::{answer_at, require_key, send_json, MAX_TOKENS};
use crate::config::LlmSettings;

const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
const API_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct AnthropicAnswerAdapter {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl AnthropicAnswerAdapter {
    pub fn new(client: Client, settings: &LlmSettings) -> Self {
        Self {
            client,
            endpoint: settings
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key: settings.api_key.clone(),
            model: settings
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl AnswerProvider for AnthropicAnswerAdapter {
    async fn produce_answer(
        &self,
        question: &str,
        context: &AstrologyContext,
    ) -> PortResult<String> {
        let api_key = require_key(ProviderTag::Anthropic, self.api_key.as_deref())?;

        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [
                { "role": "user", "content": build_astrology_prompt(question, context) },
            ],
        });

        info!(model = %self.model, url = %self.endpoint, "Calling Anthropic API");
        let request = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body);

        let data = send_json(ProviderTag::Anthropic, request).await?;
        Ok(answer_at(&data, "/content/0/text"))
    }

    fn tag(&self) -> Option<ProviderTag> {
        Some(ProviderTag::Anthropic)
    }
}
