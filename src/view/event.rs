//! Events that drive the client view

use crate::broadcast::PushEvent;
use crate::store::AppData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    // Initial read
    Loaded(AppData),
    LoadFailed(String),

    // Push channel
    Pushed(PushEvent),

    // User interaction
    NeighborhoodSelected(Option<String>),
    LanguageToggled(String),

    // Mutation outcomes
    FeedbackAccepted,
    /// Network or decode failure on a request; shown inline, never retried
    TransportFailed(String),
}
