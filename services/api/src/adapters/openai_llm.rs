//! services/api/src/adapters/openai_llm.rs
//!
//! This module contains the adapter for OpenAI-style chat completions.
//! It implements the `AnswerProvider` port from the `core` crate.

use async_trait::async_trait;
use astrologer_core::{
    domain::AstrologyContext,
    ports::{AnswerProvider, PortResult, ProviderTag},
    prompt::{build_astrology_prompt, SYSTEM_INSTRUCTIONS},
};
use reqwest::Client;
use serde_json::json;
use tracing::info;

use super::{answer_at, require_key, send_json, MAX_TOKENS, TEMPERATURE};
use crate::config::LlmSettings;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `AnswerProvider` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiAnswerAdapter {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiAnswerAdapter {
    /// Creates a new `OpenAiAnswerAdapter`.
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

//=========================================================================================
// `AnswerProvider` Trait Implementation
//=========================================================================================

#[async_trait]
impl AnswerProvider for OpenAiAnswerAdapter {
    async fn produce_answer(
        &self,
        question: &str,
        context: &AstrologyContext,
    ) -> PortResult<String> {
        let api_key = require_key(ProviderTag::OpenAi, self.api_key.as_deref())?;

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_INSTRUCTIONS },
                { "role": "user", "content": build_astrology_prompt(question, context) },
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });

        info!(model = %self.model, url = %self.endpoint, "Calling OpenAI API");
        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body);

        let data = send_json(ProviderTag::OpenAi, request).await?;
        Ok(answer_at(&data, "/choices/0/message/content"))
    }

    fn tag(&self) -> Option<ProviderTag> {
        Some(ProviderTag::OpenAi)
    }
}
