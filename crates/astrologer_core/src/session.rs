//! crates/astrologer_core/src/session.rs
//!
//! One user's submitted birth details, the reading derived from them and the
//! questions asked since.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::{BirthDetails, QuestionResponse, Reading};

#[derive(Debug, Clone)]
pub struct ReadingSession {
    pub id: Uuid,
    pub birth_details: BirthDetails,
    pub reading: Reading,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    /// Newest first.
    responses: VecDeque<QuestionResponse>,
}

impl ReadingSession {
    pub fn new(birth_details: BirthDetails, reading: Reading, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            birth_details,
            reading,
            created_at: now,
            last_accessed_at: now,
            responses: VecDeque::new(),
        }
    }

    /// Puts `response` at the head of the log.
    pub fn record(&mut self, response: QuestionResponse) {
        self.last_accessed_at = response.timestamp;
        self.responses.push_front(response);
    }

    /// Marks the session as used at `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_accessed_at {
            self.last_accessed_at = now;
        }
    }

    /// True once the session has gone unused for longer than `ttl`.
    pub fn is_idle(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.last_accessed_at)
            .to_std()
            .map_or(false, |idle| idle > ttl)
    }

    /// The question log, most recent first.
    pub fn responses(&self) -> impl Iterator<Item = &QuestionResponse> {
        self.responses.iter()
    }

    pub fn response_count(&self) -> usize {
        self.responses.len()
    }
}
