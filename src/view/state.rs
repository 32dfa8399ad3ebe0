//! Client view state

use crate::store::{AppData, Issue, LegislationEntry};
use std::collections::BTreeSet;

/// What the client is showing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Initial read in flight
    #[default]
    Loading,
    /// Initial read failed. Terminal: there is no automatic retry.
    Failed { message: String },
    /// Data loaded; pushes keep it current
    Ready(Snapshot),
}

impl ViewState {
    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            ViewState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Client's cached copy of the server state plus local UI selections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub neighborhoods: Vec<String>,
    pub issues: Vec<Issue>,
    pub legislation: Vec<LegislationEntry>,
    pub feedback_count: u64,
    /// Neighborhood filter; `None` shows every issue
    pub selected: Option<String>,
    /// Legislation ids currently shown with the plain-language summary
    pub plain_view: BTreeSet<String>,
    /// Last inline message for the user
    pub notice: Option<String>,
}

impl From<AppData> for Snapshot {
    fn from(data: AppData) -> Self {
        Self {
            neighborhoods: data.neighborhoods,
            issues: data.issues,
            legislation: data.legislation,
            feedback_count: data.feedback_count,
            selected: None,
            plain_view: BTreeSet::new(),
            notice: None,
        }
    }
}

impl Snapshot {
    /// Issues matching the selected neighborhood exactly, or all of them
    #[must_use]
    pub fn visible_issues(&self) -> Vec<&Issue> {
        match &self.selected {
            Some(name) => self
                .issues
                .iter()
                .filter(|issue| issue.neighborhood == *name)
                .collect(),
            None => self.issues.iter().collect(),
        }
    }

    /// Summary to display for an entry given its language toggle
    #[must_use]
    pub fn summary_for<'a>(&self, entry: &'a LegislationEntry) -> &'a str {
        if self.plain_view.contains(&entry.id) {
            &entry.plain_summary
        } else {
            &entry.technical_summary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::demo_data;

    #[test]
    fn test_no_selection_shows_everything() {
        let snapshot = Snapshot::from(demo_data());
        assert_eq!(snapshot.visible_issues().len(), 10);
    }

    #[test]
    fn test_selection_filters_by_exact_name() {
        let mut snapshot = Snapshot::from(demo_data());

        snapshot.selected = Some("Downtown".to_string());
        let ids: Vec<u32> = snapshot.visible_issues().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 4, 9]);

        snapshot.selected = Some("downtown".to_string());
        assert!(snapshot.visible_issues().is_empty());

        snapshot.selected = Some("River".to_string());
        assert!(snapshot.visible_issues().is_empty());
    }

    #[test]
    fn test_summary_follows_toggle() {
        let mut snapshot = Snapshot::from(demo_data());
        let entry = snapshot.legislation[0].clone();

        assert_eq!(snapshot.summary_for(&entry), entry.technical_summary);
        snapshot.plain_view.insert(entry.id.clone());
        assert_eq!(snapshot.summary_for(&entry), entry.plain_summary);
    }
}
