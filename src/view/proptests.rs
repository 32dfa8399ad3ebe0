//! Property-based tests for the view transition

use super::*;
use crate::broadcast::PushEvent;
use crate::store::{demo_data, Votes};
use proptest::prelude::*;

fn arb_neighborhood() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Downtown".to_string())),
        Just(Some("Eastside".to_string())),
        Just(Some("River North".to_string())),
        "[A-Za-z ]{0,12}".prop_map(Some),
    ]
}

fn arb_push() -> impl Strategy<Value = PushEvent> {
    prop_oneof![
        any::<u32>().prop_map(|n| PushEvent::FeedbackCountUpdated(u64::from(n))),
        (0u64..100, 0u64..100).prop_map(|(up, down)| {
            let mut legislation = demo_data().legislation;
            legislation[1].votes = Votes::new(up, down);
            PushEvent::LegislationUpdated(legislation)
        }),
    ]
}

fn arb_event() -> impl Strategy<Value = ViewEvent> {
    prop_oneof![
        arb_push().prop_map(ViewEvent::Pushed),
        arb_neighborhood().prop_map(ViewEvent::NeighborhoodSelected),
        Just(ViewEvent::LanguageToggled("leg103".to_string())),
        Just(ViewEvent::FeedbackAccepted),
        "[a-z ]{1,20}".prop_map(ViewEvent::TransportFailed),
        Just(ViewEvent::Loaded(demo_data())),
        "[a-z ]{1,20}".prop_map(ViewEvent::LoadFailed),
    ]
}

proptest! {
    /// Once the initial read fails nothing brings the view back
    #[test]
    fn prop_failed_is_terminal(events in prop::collection::vec(arb_event(), 0..30)) {
        let failed = ViewState::Failed { message: "boom".to_string() };
        let mut state = failed.clone();
        for event in events {
            state = transition(state, event);
        }
        prop_assert_eq!(state, failed);
    }

    /// The visible issue list only ever holds issues from the selected neighborhood
    #[test]
    fn prop_filter_matches_exactly(events in prop::collection::vec(arb_event(), 0..30)) {
        let mut state = transition(ViewState::Loading, ViewEvent::Loaded(demo_data()));
        for event in events {
            state = transition(state, event);
        }

        let snapshot = state.snapshot().unwrap();
        let visible = snapshot.visible_issues();
        match &snapshot.selected {
            Some(name) => {
                prop_assert!(visible.iter().all(|issue| &issue.neighborhood == name));
                let expected = snapshot.issues.iter().filter(|i| &i.neighborhood == name).count();
                prop_assert_eq!(visible.len(), expected);
            }
            None => prop_assert_eq!(visible.len(), snapshot.issues.len()),
        }
    }

    /// After any sequence of pushes each slice equals the last push for it
    #[test]
    fn prop_last_push_wins(pushes in prop::collection::vec(arb_push(), 1..20)) {
        let mut state = transition(ViewState::Loading, ViewEvent::Loaded(demo_data()));
        for push in &pushes {
            state = transition(state, ViewEvent::Pushed(push.clone()));
        }
        let snapshot = state.snapshot().unwrap();

        let last_count = pushes.iter().rev().find_map(|p| match p {
            PushEvent::FeedbackCountUpdated(n) => Some(*n),
            PushEvent::LegislationUpdated(_) => None,
        });
        let last_legislation = pushes.iter().rev().find_map(|p| match p {
            PushEvent::LegislationUpdated(l) => Some(l.clone()),
            PushEvent::FeedbackCountUpdated(_) => None,
        });

        prop_assert_eq!(snapshot.feedback_count, last_count.unwrap_or(0));
        prop_assert_eq!(
            &snapshot.legislation,
            &last_legislation.unwrap_or_else(|| demo_data().legislation)
        );
        // Issues are never pushed
        prop_assert_eq!(&snapshot.issues, &demo_data().issues);
    }
}
