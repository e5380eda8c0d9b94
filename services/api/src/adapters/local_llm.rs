//! services/api/src/adapters/local_llm.rs
//!
//! Adapter for a locally hosted, Ollama-style generate endpoint. No credential.

use async_trait::async_trait;
use astrologer_core::{
    domain::AstrologyContext,
    ports::{AnswerProvider, PortResult, ProviderTag},
    prompt::build_astrology_prompt,
};
use reqwest::Client;
use serde_json::json;
use tracing::info;

use super::{answer_at, send_json, MAX_TOKENS, TEMPERATURE};
use crate::config::LlmSettings;

const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
const DEFAULT_MODEL: &str = "llama2";

#[derive(Clone)]
pub struct LocalAnswerAdapter {
    client: Client,
    endpoint: String,
    model: String,
}

impl LocalAnswerAdapter {
    pub fn new(client: Client, settings: &LlmSettings) -> Self {
        Self {
            client,
            endpoint: settings
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: settings
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl AnswerProvider for LocalAnswerAdapter {
    async fn produce_answer(
        &self,
        question: &str,
        context: &AstrologyContext,
    ) -> PortResult<String> {
        let body = json!({
            "model": self.model,
            "prompt": build_astrology_prompt(question, context),
            "stream": false,
            "options": {
                "temperature": TEMPERATURE,
                "num_predict": MAX_TOKENS,
            },
        });

        info!(model = %self.model, url = %self.endpoint, "Calling local LLM");
        let request = self.client.post(&self.endpoint).json(&body);

        let data = send_json(ProviderTag::Local, request).await?;
        Ok(answer_at(&data, "/response"))
    }

    fn tag(&self) -> Option<ProviderTag> {
        Some(ProviderTag::Local)
    }
}
