//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the in-memory session store.

use crate::config::Config;
use astrologer_core::{AstrologyEngine, ReadingSession};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub engine: Arc<AstrologyEngine>,
    pub config: Arc<Config>,
    /// Live sessions. Never held across a provider call.
    pub sessions: Mutex<HashMap<Uuid, ReadingSession>>,
}

impl AppState {
    pub fn new(engine: Arc<AstrologyEngine>, config: Arc<Config>) -> Self {
        Self {
            engine,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Stores a new session, first dropping any that have gone idle.
    pub async fn insert_session(&self, session: ReadingSession) {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions);
        sessions.insert(session.id, session);
    }

    /// Drops every session unused for longer than the configured TTL.
    /// Returns how many were removed.
    pub async fn prune_idle_sessions(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions)
    }

    fn prune(&self, sessions: &mut HashMap<Uuid, ReadingSession>) -> usize {
        let now = self.engine.clock().now();
        let ttl = self.config.session_ttl;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now, ttl));

        let removed = before - sessions.len();
        if removed > 0 {
            info!(removed, remaining = sessions.len(), "Expired idle sessions.");
        }
        removed
    }

    /// Runs `prune_idle_sessions` every `period` until the runtime shuts down.
    pub fn spawn_session_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let state = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                state.prune_idle_sessions().await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astrologer_core::{BirthDetails, FixedClock};
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    fn state_at(now: chrono::DateTime<Utc>, ttl_secs: u64) -> AppState {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.session_ttl = Duration::from_secs(ttl_secs);
        let engine = AstrologyEngine::unconfigured(Arc::new(FixedClock(now)));
        AppState::new(Arc::new(engine), Arc::new(config))
    }

    fn session_at(state: &AppState, when: chrono::DateTime<Utc>) -> ReadingSession {
        let details = BirthDetails {
            name: "Tove".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1991, 3, 30).unwrap(),
            time_of_birth: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            place_of_birth: "Oslo".to_string(),
        };
        let reading = state.engine.generate_reading(&details);
        ReadingSession::new(details, reading, when)
    }

    #[tokio::test]
    async fn idle_sessions_are_pruned_and_fresh_ones_kept() {
        let now = Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap();
        let state = state_at(now, 600);

        let stale = session_at(&state, now - chrono::Duration::minutes(30));
        let fresh = session_at(&state, now - chrono::Duration::minutes(5));
        let (stale_id, fresh_id) = (stale.id, fresh.id);
        {
            let mut sessions = state.sessions.lock().await;
            sessions.insert(stale_id, stale);
            sessions.insert(fresh_id, fresh);
        }

        assert_eq!(state.prune_idle_sessions().await, 1);
        let sessions = state.sessions.lock().await;
        assert!(!sessions.contains_key(&stale_id));
        assert!(sessions.contains_key(&fresh_id));
    }

    #[tokio::test]
    async fn inserting_a_session_sweeps_the_store() {
        let now = Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap();
        let state = state_at(now, 60);

        let stale = session_at(&state, now - chrono::Duration::minutes(2));
        let stale_id = stale.id;
        state.sessions.lock().await.insert(stale_id, stale);

        let newcomer = session_at(&state, now);
        let newcomer_id = newcomer.id;
        state.insert_session(newcomer).await;

        let sessions = state.sessions.lock().await;
        assert_eq!(sessions.len(), 1);
        assert!(sessions.contains_key(&newcomer_id));
    }
}
