//! Plain-text rendering of the client view

use super::chart::POLICY_IMPACT;
use super::state::{Snapshot, ViewState};
use std::fmt;

const CHART_WIDTH: usize = 40;

/// Render the whole view as text
#[must_use]
pub fn render(state: &ViewState) -> String {
    match state {
        ViewState::Loading => "Loading...\n".to_string(),
        ViewState::Failed { message } => format!("Error: {message}\n"),
        ViewState::Ready(snapshot) => snapshot.to_string(),
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Local Democracy Engagement Platform ==")?;
        writeln!(f)?;

        writeln!(f, "-- Neighborhood Issues --")?;
        writeln!(f, "Neighborhoods: {}", self.neighborhoods.join(", "))?;
        match &self.selected {
            Some(name) => writeln!(f, "Issues in {name}:")?,
            None => writeln!(f, "All issues:")?,
        }
        let issues = self.visible_issues();
        if issues.is_empty() {
            writeln!(f, "  No issues listed for this neighborhood.")?;
        }
        for issue in issues {
            writeln!(f, "  #{} {} [{}]", issue.id, issue.title, issue.neighborhood)?;
            writeln!(f, "      {}", issue.description)?;
        }
        writeln!(f)?;

        writeln!(f, "-- Example Legislation --")?;
        for entry in &self.legislation {
            writeln!(f, "[{}] {}", entry.id, entry.title)?;
            writeln!(f, "    {}", self.summary_for(entry))?;
            writeln!(f, "    Votes: +{} / -{}", entry.votes.up, entry.votes.down)?;
        }
        writeln!(f)?;

        writeln!(f, "-- Feedback --")?;
        writeln!(f, "Total Feedback Submissions: {}", self.feedback_count)?;
        if let Some(notice) = &self.notice {
            writeln!(f, "! {notice}")?;
        }
        writeln!(f)?;

        writeln!(f, "-- {} --", POLICY_IMPACT.title)?;
        writeln!(f, "{}", POLICY_IMPACT.dataset_label)?;
        for (label, value, len) in POLICY_IMPACT.bars(CHART_WIDTH) {
            writeln!(f, "  {label:<12} {} {value}", "#".repeat(len))?;
        }

        Ok(())
    }
}
