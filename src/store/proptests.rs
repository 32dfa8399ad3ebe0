//! Property-based tests for vote and feedback invariants

use super::*;
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

fn arb_known_id() -> impl Strategy<Value = String> {
    prop_oneof![Just("leg101"), Just("leg102"), Just("leg103")].prop_map(str::to_string)
}

fn arb_vote_type() -> impl Strategy<Value = String> {
    prop_oneof![Just("up".to_string()), Just("down".to_string())]
}

/// Any string that is not a recognized vote type
fn arb_bad_vote_type() -> impl Strategy<Value = String> {
    "[a-zA-Z]{0,8}".prop_filter("must not be a valid vote type", |s| s != "up" && s != "down")
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// An accepted vote moves exactly one tally of exactly one entry by one
    #[test]
    fn prop_vote_increments_exactly_one_field(id in arb_known_id(), vote_type in arb_vote_type()) {
        let mut data = demo_data();
        let before = data.clone();

        let updated = data.apply_vote(&id, &vote_type).unwrap().clone();
        let old = before.legislation(&id).unwrap();

        match vote_type.as_str() {
            "up" => prop_assert_eq!(updated.votes, Votes::new(old.votes.up + 1, old.votes.down)),
            _ => prop_assert_eq!(updated.votes, Votes::new(old.votes.up, old.votes.down + 1)),
        }

        for (after, prior) in data.legislation.iter().zip(&before.legislation) {
            if after.id == id {
                prop_assert_eq!(&after.title, &prior.title);
                prop_assert_eq!(&after.technical_summary, &prior.technical_summary);
                prop_assert_eq!(&after.plain_summary, &prior.plain_summary);
            } else {
                prop_assert_eq!(after, prior);
            }
        }
        prop_assert_eq!(&data.issues, &before.issues);
        prop_assert_eq!(&data.neighborhoods, &before.neighborhoods);
        prop_assert_eq!(data.feedback_count, before.feedback_count);
    }

    /// A sequence of votes leaves each tally at seed + number of votes cast on it
    #[test]
    fn prop_vote_sequence_totals(
        votes in prop::collection::vec((arb_known_id(), arb_vote_type()), 0..40)
    ) {
        let mut data = demo_data();
        let seed = demo_data();

        for (id, vote_type) in &votes {
            data.apply_vote(id, vote_type).unwrap();
        }

        for entry in &data.legislation {
            let prior = seed.legislation(&entry.id).unwrap();
            let cast = |kind: &str| {
                votes.iter().filter(|(id, t)| *id == entry.id && t == kind).count() as u64
            };
            prop_assert_eq!(
                entry.votes,
                Votes::new(prior.votes.up + cast("up"), prior.votes.down + cast("down"))
            );
        }
    }

    #[test]
    fn prop_unknown_id_changes_nothing(id in "[a-z0-9]{1,10}", vote_type in arb_vote_type()) {
        prop_assume!(!matches!(id.as_str(), "leg101" | "leg102" | "leg103"));
        let mut data = demo_data();

        let err = data.apply_vote(&id, &vote_type).unwrap_err();
        prop_assert_eq!(err, StoreError::LegislationNotFound(id));
        prop_assert_eq!(data, demo_data());
    }

    #[test]
    fn prop_bad_vote_type_changes_nothing(id in arb_known_id(), vote_type in arb_bad_vote_type()) {
        let mut data = demo_data();

        let err = data.apply_vote(&id, &vote_type).unwrap_err();
        prop_assert_eq!(err, StoreError::InvalidVoteType(vote_type));
        prop_assert_eq!(data, demo_data());
    }

    /// Feedback bumps the counter by one per submission, whatever the comment
    #[test]
    fn prop_feedback_counts_every_comment(comments in prop::collection::vec(".*", 0..20)) {
        let publisher = Arc::new(Broadcaster::new());
        let store = Store::seeded(publisher);
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();

        rt.block_on(async {
            for (i, comment) in comments.iter().enumerate() {
                let count = store.submit_feedback(comment).await;
                assert_eq!(count, i as u64 + 1);
            }
        });

        let data = rt.block_on(store.snapshot());
        prop_assert_eq!(data.feedback_count, comments.len() as u64);
        prop_assert_eq!(data.legislation, demo_data().legislation);
    }
}
