//! crates/astrologer_core/src/engine.rs
//!
//! The facade the outer layers talk to: readings on one side, provider-backed
//! answers on the other.

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::domain::{AstrologyContext, BirthDetails, QuestionResponse, Reading, Sign};
use crate::ports::{AnswerProvider, Clock, PortError, UnconfiguredProvider};
use crate::reading::{answer_question_rule_based, generate_reading};
use crate::resolver::{compute_age, resolve_sign};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("AI service not configured. Please check your API key settings.")]
    NotConfigured,

    #[error("AI service error: {0}. Please check your API key and try again.")]
    Provider(#[source] PortError),
}

pub struct AstrologyEngine {
    provider: Arc<dyn AnswerProvider>,
    clock: Arc<dyn Clock>,
}

impl AstrologyEngine {
    pub fn new(provider: Arc<dyn AnswerProvider>, clock: Arc<dyn Clock>) -> Self {
        match provider.tag() {
            Some(tag) => info!(provider = tag.as_str(), "Astrology engine ready."),
            None => info!("Astrology engine ready without an answer provider."),
        }
        Self { provider, clock }
    }

    /// An engine that can produce readings but refuses provider-backed questions.
    pub fn unconfigured(clock: Arc<dyn Clock>) -> Self {
        Self::new(Arc::new(UnconfiguredProvider), clock)
    }

    /// Swaps the answer provider for every later call.
    pub fn reconfigure(&mut self, provider: Arc<dyn AnswerProvider>) {
        info!(
            provider = provider.tag().map(|t| t.as_str()).unwrap_or("none"),
            "Answer provider reconfigured."
        );
        self.provider = provider;
    }

    pub fn is_configured(&self) -> bool {
        self.provider.tag().is_some()
    }

    pub fn provider(&self) -> &Arc<dyn AnswerProvider> {
        &self.provider
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    fn sign_and_age(&self, details: &BirthDetails) -> (&'static Sign, i32) {
        let sign = resolve_sign(details.date_of_birth);
        let age = compute_age(details.date_of_birth, self.clock.today());
        (sign, age)
    }

    pub fn generate_reading(&self, details: &BirthDetails) -> Reading {
        let (sign, age) = self.sign_and_age(details);
        debug!(sign = %sign.name, age, "Generating reading.");
        generate_reading(sign, age)
    }

    pub fn create_context(&self, details: &BirthDetails) -> AstrologyContext {
        let (sign, age) = self.sign_and_age(details);
        AstrologyContext {
            name: details.name.clone(),
            sun_sign: sign.name.to_string(),
            element: sign.element.to_string(),
            traits: sign.traits.iter().map(|t| t.to_string()).collect(),
            age,
            date_of_birth: details.date_of_birth,
            place_of_birth: details.place_of_birth.clone(),
        }
    }

    /// Sends the question to the configured provider and stamps the answer.
    pub async fn answer_question(
        &self,
        question: &str,
        details: &BirthDetails,
    ) -> Result<QuestionResponse, EngineError> {
        if !self.is_configured() {
            error!("No answer provider configured.");
            return Err(EngineError::NotConfigured);
        }

        let context = self.create_context(details);
        info!(sign = %context.sun_sign, "Forwarding question to answer provider.");

        let answer = self
            .provider
            .produce_answer(question, &context)
            .await
            .map_err(|e| {
                error!("Answer provider call failed: {}", e);
                EngineError::Provider(e)
            })?;

        Ok(QuestionResponse {
            question: question.to_string(),
            answer,
            timestamp: self.clock.now(),
        })
    }

    /// Answers from the static tables without touching the provider.
    pub fn answer_question_rule_based(
        &self,
        question: &str,
        details: &BirthDetails,
    ) -> QuestionResponse {
        let (sign, age) = self.sign_and_age(details);
        QuestionResponse {
            question: question.to_string(),
            answer: answer_question_rule_based(question, sign, age, details.date_of_birth),
            timestamp: self.clock.now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SignName;
    use crate::ports::{FixedClock, PortResult, ProviderTag};
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use std::sync::Mutex;

    /// Echoes the context back and remembers how often it was called.
    #[derive(Default)]
    struct EchoProvider {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AnswerProvider for EchoProvider {
        async fn produce_answer(
            &self,
            question: &str,
            context: &AstrologyContext,
        ) -> PortResult<String> {
            self.calls.lock().unwrap().push(question.to_string());
            Ok(format!("{} the {} asked: {}", context.name, context.sun_sign, question))
        }

        fn tag(&self) -> Option<ProviderTag> {
            Some(ProviderTag::Local)
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl AnswerProvider for FailingProvider {
        async fn produce_answer(&self, _: &str, _: &AstrologyContext) -> PortResult<String> {
            Err(PortError::Status {
                provider: ProviderTag::Anthropic,
                status: 529,
                body: "overloaded".to_string(),
            })
        }

        fn tag(&self) -> Option<ProviderTag> {
            Some(ProviderTag::Anthropic)
        }
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap()))
    }

    fn details() -> BirthDetails {
        BirthDetails {
            name: "Noor".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(),
            time_of_birth: NaiveTime::from_hms_opt(4, 15, 0).unwrap(),
            place_of_birth: "Cairo".to_string(),
        }
    }

    #[test]
    fn context_projects_sign_and_age() {
        let engine = AstrologyEngine::unconfigured(clock());
        let context = engine.create_context(&details());
        assert_eq!(context.sun_sign, "Gemini");
        assert_eq!(context.element, "Air");
        assert_eq!(context.age, 33);
        assert_eq!(context.place_of_birth, "Cairo");
        assert_eq!(context.traits.first().map(String::as_str), Some("Gentle"));
    }

    #[test]
    fn reading_uses_the_injected_clock() {
        let engine = AstrologyEngine::unconfigured(clock());
        let reading = engine.generate_reading(&details());
        assert_eq!(reading.sun_sign.name, SignName::Gemini);
        // 33 at the fixed instant, so the 25..40 band applies.
        assert_eq!(reading.personality_traits[3], "Building foundations");
        assert!(reading.life_advice.ends_with("establishing your legacy."));
    }

    #[tokio::test]
    async fn unconfigured_engine_refuses_questions() {
        let engine = AstrologyEngine::unconfigured(clock());
        assert!(!engine.is_configured());
        let err = engine.answer_question("Q", &details()).await.unwrap_err();
        assert!(matches!(err, EngineError::NotConfigured));
    }

    #[tokio::test]
    async fn configured_engine_stamps_answers() {
        let provider = Arc::new(EchoProvider::default());
        let engine = AstrologyEngine::new(provider.clone(), clock());
        let response = engine.answer_question("Will I travel?", &details()).await.unwrap();
        assert_eq!(response.answer, "Noor the Gemini asked: Will I travel?");
        assert_eq!(response.timestamp, clock().now());
        assert_eq!(provider.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn provider_failures_are_wrapped_with_context() {
        let engine = AstrologyEngine::new(Arc::new(FailingProvider), clock());
        let err = engine.answer_question("Q", &details()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "AI service error: Anthropic API error: 529 - overloaded. Please check your API key and try again."
        );
        assert!(matches!(err, EngineError::Provider(PortError::Status { status: 529, .. })));
    }

    #[tokio::test]
    async fn reconfigure_switches_state() {
        let mut engine = AstrologyEngine::unconfigured(clock());
        engine.reconfigure(Arc::new(EchoProvider::default()));
        assert!(engine.is_configured());
        assert!(engine.answer_question("Q", &details()).await.is_ok());

        engine.reconfigure(Arc::new(UnconfiguredProvider));
        assert!(!engine.is_configured());
    }

    #[test]
    fn rule_based_answers_skip_the_provider() {
        let provider = Arc::new(EchoProvider::default());
        let engine = AstrologyEngine::new(provider.clone(), clock());
        let response = engine.answer_question_rule_based("How is my health?", &details());
        assert!(response.answer.starts_with("Your Gemini constitution suggests focusing on respiratory health"));
        assert!(provider.calls.lock().unwrap().is_empty());
    }
}
