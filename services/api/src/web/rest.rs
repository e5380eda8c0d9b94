//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{
    protocol::{
        AnswerMode, AskQuestionRequest, BirthDetailsPayload, ErrorBody, HealthView,
        QuestionResponseView, ReadingView, SessionView, SignView,
    },
    state::AppState,
};
use astrologer_core::{
    signs::{all_signs, sign},
    BirthDetails, EngineError, ReadingSession, SignName,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_session_handler,
        get_session_handler,
        delete_session_handler,
        ask_question_handler,
        list_questions_handler,
        list_signs_handler,
        get_sign_handler,
        health_handler,
    ),
    components(
        schemas(
            BirthDetailsPayload,
            AskQuestionRequest,
            AnswerMode,
            SessionView,
            ReadingView,
            SignView,
            QuestionResponseView,
            HealthView,
            ErrorBody,
        )
    ),
    tags(
        (name = "Astrologer API", description = "Sun-sign readings and personalised answers.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Helpers
//=========================================================================================

pub type HandlerError = (StatusCode, Json<ErrorBody>);

fn reject(status: StatusCode, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn session_not_found(session_id: Uuid) -> HandlerError {
    reject(
        StatusCode::NOT_FOUND,
        format!("Session {} not found", session_id),
    )
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Submit birth details and receive a reading.
#[utoipa::path(
    post,
    path = "/sessions",
    request_body = BirthDetailsPayload,
    responses(
        (status = 201, description = "Session created", body = SessionView),
        (status = 400, description = "Birth details failed validation", body = ErrorBody)
    )
)]
pub async fn create_session_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<BirthDetailsPayload>,
) -> Result<impl IntoResponse, HandlerError> {
    let details = BirthDetails::from(payload);
    let clock = app_state.engine.clock();

    details
        .validate(clock.today())
        .map_err(|e| reject(StatusCode::BAD_REQUEST, e.to_string()))?;

    let reading = app_state.engine.generate_reading(&details);
    let session = ReadingSession::new(details, reading, clock.now());
    let view = SessionView::from(&session);
    info!(session_id = %session.id, sign = %session.reading.sun_sign.name, "Session created.");

    app_state.insert_session(session).await;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Fetch a session's birth details and reading.
#[utoipa::path(
    get,
    path = "/sessions/{session_id}",
    params(("session_id" = Uuid, Path, description = "The session to fetch.")),
    responses(
        (status = 200, description = "The session", body = SessionView),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn get_session_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, HandlerError> {
    let now = app_state.engine.clock().now();
    let mut sessions = app_state.sessions.lock().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    session.touch(now);
    Ok(Json(SessionView::from(&*session)))
}

/// Discard a session (the "new reading" button).
#[utoipa::path(
    delete,
    path = "/sessions/{session_id}",
    params(("session_id" = Uuid, Path, description = "The session to discard.")),
    responses(
        (status = 204, description = "Session discarded"),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn delete_session_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, HandlerError> {
    app_state
        .sessions
        .lock()
        .await
        .remove(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    info!(session_id = %session_id, "Session discarded.");
    Ok(StatusCode::NO_CONTENT)
}

/// Ask a question about the session's chart.
///
/// Answers are prepended to the session's log. Failed questions leave the log untouched.
#[utoipa::path(
    post,
    path = "/sessions/{session_id}/questions",
    params(("session_id" = Uuid, Path, description = "The session asking.")),
    request_body = AskQuestionRequest,
    responses(
        (status = 201, description = "Question answered", body = QuestionResponseView),
        (status = 400, description = "Blank question", body = ErrorBody),
        (status = 404, description = "Unknown session", body = ErrorBody),
        (status = 502, description = "Answer provider failed", body = ErrorBody),
        (status = 503, description = "No answer provider configured", body = ErrorBody)
    )
)]
pub async fn ask_question_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AskQuestionRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if request.question.trim().is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, "Question is required"));
    }

    // Copy the details out so the lock is not held while the provider works.
    let details = {
        let sessions = app_state.sessions.lock().await;
        sessions
            .get(&session_id)
            .map(|s| s.birth_details.clone())
            .ok_or_else(|| session_not_found(session_id))?
    };

    let engine = &app_state.engine;
    let response = match request.mode {
        AnswerMode::Rules => engine.answer_question_rule_based(&request.question, &details),
        AnswerMode::Llm => engine
            .answer_question(&request.question, &details)
            .await
            .map_err(|e| {
                let status = match e {
                    EngineError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                    EngineError::Provider(_) => StatusCode::BAD_GATEWAY,
                };
                error!(session_id = %session_id, "Failed to answer question: {}", e);
                reject(status, e.to_string())
            })?,
    };

    let mut sessions = app_state.sessions.lock().await;
    let Some(session) = sessions.get_mut(&session_id) else {
        warn!(session_id = %session_id, "Session discarded while its question was answered.");
        return Err(session_not_found(session_id));
    };
    let view = QuestionResponseView::from(&response);
    session.record(response);
    Ok((StatusCode::CREATED, Json(view)))
}

/// The session's questions and answers, most recent first.
#[utoipa::path(
    get,
    path = "/sessions/{session_id}/questions",
    params(("session_id" = Uuid, Path, description = "The session to list.")),
    responses(
        (status = 200, description = "Question log, newest first", body = [QuestionResponseView]),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn list_questions_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<QuestionResponseView>>, HandlerError> {
    let now = app_state.engine.clock().now();
    let mut sessions = app_state.sessions.lock().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    session.touch(now);
    Ok(Json(
        session.responses().map(QuestionResponseView::from).collect(),
    ))
}

/// The twelve signs.
#[utoipa::path(
    get,
    path = "/signs",
    responses((status = 200, description = "All signs, Aries first", body = [SignView]))
)]
pub async fn list_signs_handler() -> Json<Vec<SignView>> {
    Json(all_signs().iter().map(SignView::from).collect())
}

/// One sign by name, case-insensitive.
#[utoipa::path(
    get,
    path = "/signs/{name}",
    params(("name" = String, Path, description = "Sign name, e.g. `leo`.")),
    responses(
        (status = 200, description = "The sign", body = SignView),
        (status = 404, description = "Not one of the twelve signs", body = ErrorBody)
    )
)]
pub async fn get_sign_handler(Path(name): Path<String>) -> Result<Json<SignView>, HandlerError> {
    let name = name
        .parse::<SignName>()
        .map_err(|e| reject(StatusCode::NOT_FOUND, e.to_string()))?;
    Ok(Json(SignView::from(sign(name))))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthView))
)]
pub async fn health_handler(State(app_state): State<Arc<AppState>>) -> Json<HealthView> {
    Json(HealthView {
        status: "ok".to_string(),
        provider: app_state
            .engine
            .provider()
            .tag()
            .map(|t| t.as_str().to_string()),
    })
}
