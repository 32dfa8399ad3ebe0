//! Record types held by the store and shared over the wire

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::StoreError;

/// Vote tally on a legislation entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Votes {
    pub up: u64,
    pub down: u64,
}

impl Votes {
    #[must_use]
    pub fn new(up: u64, down: u64) -> Self {
        Self { up, down }
    }

    /// Add a single vote of the given kind
    pub fn record(&mut self, kind: VoteKind) {
        match kind {
            VoteKind::Up => self.up += 1,
            VoteKind::Down => self.down += 1,
        }
    }
}

/// Proposed policy with a technical and a plain-language summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegislationEntry {
    pub id: String,
    pub title: String,
    pub technical_summary: String,
    pub plain_summary: String,
    pub votes: Votes,
}

/// Civic issue reported in a neighborhood
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub neighborhood: String,
}

/// Which tally a vote lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteKind {
    Up,
    Down,
}

impl VoteKind {
    pub const ALL: [VoteKind; 2] = [VoteKind::Up, VoteKind::Down];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            VoteKind::Up => "up",
            VoteKind::Down => "down",
        }
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(VoteKind::Up),
            "down" => Ok(VoteKind::Down),
            other => Err(StoreError::InvalidVoteType(other.to_string())),
        }
    }
}

/// Full application state as served by `GET /api/data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub neighborhoods: Vec<String>,
    pub issues: Vec<Issue>,
    pub legislation: Vec<LegislationEntry>,
    pub feedback_count: u64,
}

impl AppData {
    #[must_use]
    pub fn legislation(&self, id: &str) -> Option<&LegislationEntry> {
        self.legislation.iter().find(|entry| entry.id == id)
    }

    /// Apply one vote. The entry is looked up before the vote type is parsed,
    /// so an unknown id wins over an invalid type.
    ///
    /// # Errors
    ///
    /// `LegislationNotFound` for an unknown id, `InvalidVoteType` for any
    /// vote type other than `"up"` or `"down"`. Nothing changes on error.
    pub fn apply_vote(
        &mut self,
        id: &str,
        vote_type: &str,
    ) -> Result<&LegislationEntry, StoreError> {
        let entry = self
            .legislation
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| StoreError::LegislationNotFound(id.to_string()))?;

        let kind: VoteKind = vote_type.parse()?;
        entry.votes.record(kind);
        Ok(&*entry)
    }

    /// Count one feedback submission and return the new total
    pub fn record_feedback(&mut self) -> u64 {
        self.feedback_count += 1;
        self.feedback_count
    }
}
