//! services/api/src/adapters/gemini_llm.rs
//!
//! Adapter for Gemini's `generateContent` endpoint. The key travels as a query
//! parameter, so URLs are only ever logged without it.

use async_trait::async_trait;
use astrologer_core::{
    domain::AstrologyContext,
    ports::{AnswerProvider, PortResult, ProviderTag},
    prompt::build_astrology_prompt,
};
use reqwest::Client;
use serde_json::json;
use tracing::info;

use super::{answer_at, require_key, send_json, MAX_TOKENS, TEMPERATURE};
use crate::config::LlmSettings;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Clone)]
pub struct GeminiAnswerAdapter {
    client: Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiAnswerAdapter {
    pub fn new(client: Client, settings: &LlmSettings) -> Self {
        let api_base = settings
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();
        Self {
            client,
            api_base,
            api_key: settings.api_key.clone(),
            model: settings
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl AnswerProvider for GeminiAnswerAdapter {
    async fn produce_answer(
        &self,
        question: &str,
        context: &AstrologyContext,
    ) -> PortResult<String> {
        let api_key = require_key(ProviderTag::Gemini, self.api_key.as_deref())?;

        let body = json!({
            "contents": [{
                "parts": [{ "text": build_astrology_prompt(question, context) }]
            }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_TOKENS,
            },
        });

        let url = self.url();
        info!(model = %self.model, url = %url, "Calling Gemini API");
        let request = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body);

        let data = send_json(ProviderTag::Gemini, request).await?;
        Ok(answer_at(&data, "/candidates/0/content/parts/0/text"))
    }

    fn tag(&self) -> Option<ProviderTag> {
        Some(ProviderTag::Gemini)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_model() {
        let settings = LlmSettings {
            endpoint: Some("http://127.0.0.1:9000/v1beta/".to_string()),
            model: Some("gemini-pro".to_string()),
            ..LlmSettings::default()
        };
        let adapter = GeminiAnswerAdapter::new(Client::new(), &settings);
        assert_eq!(
            adapter.url(),
            "http://127.0.0.1:9000/v1beta/models/gemini-pro:generateContent"
        );
    }
}
