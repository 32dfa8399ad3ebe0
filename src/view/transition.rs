//! Pure view transition function

use super::event::ViewEvent;
use super::state::{Snapshot, ViewState};
use crate::broadcast::PushEvent;

pub const FEEDBACK_ACCEPTED: &str = "Feedback submitted!";

/// Compute the next view state. No I/O.
#[must_use]
pub fn transition(state: ViewState, event: ViewEvent) -> ViewState {
    match (state, event) {
        (ViewState::Loading, ViewEvent::Loaded(data)) => ViewState::Ready(Snapshot::from(data)),
        (ViewState::Loading, ViewEvent::LoadFailed(message)) => ViewState::Failed { message },
        // Nothing to apply a push or selection to yet
        (ViewState::Loading, _) => ViewState::Loading,

        (failed @ ViewState::Failed { .. }, _) => failed,

        (ViewState::Ready(snapshot), event) => ViewState::Ready(apply(snapshot, event)),
    }
}

fn apply(mut snapshot: Snapshot, event: ViewEvent) -> Snapshot {
    match event {
        // Slices are replaced verbatim; last arrival wins
        ViewEvent::Pushed(PushEvent::LegislationUpdated(legislation)) => {
            snapshot.legislation = legislation;
        }
        ViewEvent::Pushed(PushEvent::FeedbackCountUpdated(count)) => {
            snapshot.feedback_count = count;
        }

        ViewEvent::NeighborhoodSelected(selected) => {
            snapshot.selected = selected.filter(|name| !name.is_empty());
        }
        ViewEvent::LanguageToggled(id) => {
            if !snapshot.plain_view.remove(&id) {
                snapshot.plain_view.insert(id);
            }
        }

        ViewEvent::FeedbackAccepted => snapshot.notice = Some(FEEDBACK_ACCEPTED.to_string()),
        ViewEvent::TransportFailed(message) => snapshot.notice = Some(message),

        // The state is read once
        ViewEvent::Loaded(_) | ViewEvent::LoadFailed(_) => {}
    }
    snapshot
}
