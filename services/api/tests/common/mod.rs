//! Shared fixtures for the integration tests: a recording mock vendor and a
//! fully wired API server, both bound to an ephemeral local port.

#![allow(dead_code)]

use api_lib::{
    config::{Config, LlmSettings},
    web::{self, state::AppState},
};
use astrologer_core::{
    AnswerProvider, AstrologyContext, AstrologyEngine, BirthDetails, FixedClock,
};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One request as the mock vendor saw it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct VendorState {
    status: StatusCode,
    reply: String,
    requests: Arc<Mutex<Vec<Captured>>>,
}

pub struct MockVendor {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl MockVendor {
    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<VendorState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.requests.lock().unwrap().push(Captured {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.reply.clone(),
    )
}

/// Starts a vendor stand-in that answers every request with `status` and `reply`.
pub async fn spawn_vendor(status: StatusCode, reply: impl Into<String>) -> MockVendor {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = VendorState {
        status,
        reply: reply.into(),
        requests: requests.clone(),
    };
    let app = Router::new().fallback(record).with_state(state);
    let base_url = serve(app).await;
    MockVendor { base_url, requests }
}

/// Binds `app` on 127.0.0.1 and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn settings(endpoint: &str, api_key: Option<&str>) -> LlmSettings {
    LlmSettings {
        provider: None,
        api_key: api_key.map(str::to_string),
        model: None,
        endpoint: Some(endpoint.to_string()),
        timeout: Duration::from_secs(5),
    }
}

pub fn context() -> AstrologyContext {
    AstrologyContext {
        name: "Ravi".to_string(),
        sun_sign: "Leo".to_string(),
        element: "Fire".to_string(),
        traits: vec!["Creative".to_string(), "Passionate".to_string()],
        age: 30,
        date_of_birth: NaiveDate::from_ymd_opt(1994, 8, 1).unwrap(),
        place_of_birth: "Pune".to_string(),
    }
}

pub fn birth_details() -> BirthDetails {
    BirthDetails {
        name: "Ravi".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1994, 8, 1).unwrap(),
        time_of_birth: NaiveTime::from_hms_opt(7, 45, 0).unwrap(),
        place_of_birth: "Pune".to_string(),
    }
}

/// The instant every test server believes it is.
pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap())
}

/// Starts the real router with `provider` behind the engine.
pub async fn spawn_api(provider: Arc<dyn AnswerProvider>) -> String {
    spawn_api_with_state(provider).await.0
}

/// Like `spawn_api`, also handing back the shared state for direct inspection.
pub async fn spawn_api_with_state(provider: Arc<dyn AnswerProvider>) -> (String, Arc<AppState>) {
    let config = Config::from_lookup(|_| None).unwrap();
    let engine = Arc::new(AstrologyEngine::new(provider, Arc::new(fixed_clock())));
    let app_state = Arc::new(AppState::new(engine, Arc::new(config)));
    let base = serve(web::router(app_state.clone())).await;
    (base, app_state)
}
