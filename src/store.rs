//! In-memory state store
//!
//! Owns the neighborhoods, issues, legislation and feedback counter. Every
//! mutation runs under one write lock and publishes its event before the lock
//! is released, so pushes reach each subscriber in mutation order.

mod schema;
mod seed;

#[cfg(test)]
mod proptests;

pub use schema::{AppData, Issue, LegislationEntry, VoteKind, Votes};
pub use seed::demo_data;

use crate::broadcast::{Broadcaster, PushEvent, Publisher};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Legislation not found: {0}")]
    LegislationNotFound(String),
    #[error("Invalid vote type: {0:?}")]
    InvalidVoteType(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Store wired to the in-process broadcaster
pub type ProductionStore = Store<Arc<Broadcaster>>;

pub struct Store<P: Publisher> {
    data: RwLock<AppData>,
    publisher: P,
}

impl<P: Publisher> Store<P> {
    #[must_use]
    pub fn new(data: AppData, publisher: P) -> Self {
        Self {
            data: RwLock::new(data),
            publisher,
        }
    }

    /// Store holding the demo dataset
    #[must_use]
    pub fn seeded(publisher: P) -> Self {
        Self::new(demo_data(), publisher)
    }

    /// Copy of the full state
    pub async fn snapshot(&self) -> AppData {
        self.data.read().await.clone()
    }

    /// Cast one vote and broadcast the whole legislation collection.
    ///
    /// # Errors
    ///
    /// `LegislationNotFound` for an unknown id, `InvalidVoteType` when
    /// `vote_type` is not `"up"` or `"down"`. State is untouched in both cases.
    pub async fn vote(&self, id: &str, vote_type: &str) -> StoreResult<LegislationEntry> {
        let mut data = self.data.write().await;
        let entry = data.apply_vote(id, vote_type)?.clone();

        self.publisher
            .publish(PushEvent::LegislationUpdated(data.legislation.clone()));

        Ok(entry)
    }

    /// Count a feedback submission and broadcast the new total.
    /// The comment itself is not kept.
    pub async fn submit_feedback(&self, comment: &str) -> u64 {
        let mut data = self.data.write().await;
        let count = data.record_feedback();
        tracing::debug!(comment_len = comment.len(), count, "Feedback counted");

        self.publisher.publish(PushEvent::FeedbackCountUpdated(count));

        count
    }
}
