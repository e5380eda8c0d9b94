//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the API
//! server, and their conversions from the core domain types.

use astrologer_core::{
    BirthDetails, Element, QuestionResponse, Reading, ReadingSession, Sign,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Payloads Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// The birth details form.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct BirthDetailsPayload {
    pub name: String,
    #[schema(value_type = String, format = Date, example = "1990-06-15")]
    pub date_of_birth: NaiveDate,
    #[schema(value_type = String, example = "14:30:00")]
    pub time_of_birth: NaiveTime,
    pub place_of_birth: String,
}

impl From<BirthDetailsPayload> for BirthDetails {
    fn from(payload: BirthDetailsPayload) -> Self {
        BirthDetails {
            name: payload.name,
            date_of_birth: payload.date_of_birth,
            time_of_birth: payload.time_of_birth,
            place_of_birth: payload.place_of_birth,
        }
    }
}

impl From<&BirthDetails> for BirthDetailsPayload {
    fn from(details: &BirthDetails) -> Self {
        BirthDetailsPayload {
            name: details.name.clone(),
            date_of_birth: details.date_of_birth,
            time_of_birth: details.time_of_birth,
            place_of_birth: details.place_of_birth.clone(),
        }
    }
}

/// Which path answers a question.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMode {
    /// The configured answer provider.
    #[default]
    Llm,
    /// The offline keyword-routed answers.
    Rules,
}

#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct AskQuestionRequest {
    pub question: String,
    #[serde(default)]
    pub mode: AnswerMode,
}

//=========================================================================================
// Payloads Sent FROM the Server TO the Client (Browser)
//=========================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct SignView {
    pub name: String,
    pub element: String,
    pub quality: String,
    pub ruling_planet: String,
    pub date_range: String,
    pub symbol: String,
    pub traits: Vec<String>,
    pub compatibility: Vec<String>,
    /// Elements that harmonise with this sign's element.
    pub compatible_elements: Vec<String>,
}

impl From<&Sign> for SignView {
    fn from(sign: &Sign) -> Self {
        SignView {
            name: sign.name.to_string(),
            element: sign.element.to_string(),
            quality: sign.quality.to_string(),
            ruling_planet: sign.ruling_planet.to_string(),
            date_range: sign.date_range.to_string(),
            symbol: sign.symbol.to_string(),
            traits: sign.traits.iter().map(|t| t.to_string()).collect(),
            compatibility: sign.compatibility.iter().map(|n| n.to_string()).collect(),
            compatible_elements: Element::ALL
                .into_iter()
                .filter(|e| sign.element.is_compatible_with(*e))
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ReadingView {
    pub sun_sign: SignView,
    pub personality_traits: Vec<String>,
    pub strengths: Vec<String>,
    pub challenges: Vec<String>,
    pub life_advice: String,
    pub career_guidance: String,
    pub relationship_insights: String,
}

impl From<&Reading> for ReadingView {
    fn from(reading: &Reading) -> Self {
        ReadingView {
            sun_sign: SignView::from(reading.sun_sign),
            personality_traits: reading.personality_traits.clone(),
            strengths: reading.strengths.clone(),
            challenges: reading.challenges.clone(),
            life_advice: reading.life_advice.clone(),
            career_guidance: reading.career_guidance.clone(),
            relationship_insights: reading.relationship_insights.clone(),
        }
    }
}

/// A session as returned after creation or lookup.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct SessionView {
    pub session_id: Uuid,
    pub birth_details: BirthDetailsPayload,
    pub reading: ReadingView,
    pub created_at: DateTime<Utc>,
}

impl From<&ReadingSession> for SessionView {
    fn from(session: &ReadingSession) -> Self {
        SessionView {
            session_id: session.id,
            birth_details: BirthDetailsPayload::from(&session.birth_details),
            reading: ReadingView::from(&session.reading),
            created_at: session.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct QuestionResponseView {
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&QuestionResponse> for QuestionResponseView {
    fn from(response: &QuestionResponse) -> Self {
        QuestionResponseView {
            question: response.question.clone(),
            answer: response.answer.clone(),
            timestamp: response.timestamp,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthView {
    pub status: String,
    /// Configured provider tag, or null when questions will be refused.
    pub provider: Option<String>,
}

/// Body of every non-2xx response.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}
