use crate::common::at;
use marketfeed_lib::domain::{
    entities::{
        ClearedMap, InteractionEvent, InteractionKind, PostId, PromotionEvent, PromotionStatus,
    },
    events::FeedEvent,
    services::{aggregate, aggregate_events, global_badge},
};
use proptest::prelude::*;
use std::collections::HashMap;

const POSTS: [&str; 4] = ["p0", "p1", "p2", "p3"];

fn interactions() -> impl Strategy<Value = Vec<InteractionEvent>> {
    prop::collection::vec((0..POSTS.len(), 0i64..100), 0..24).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (post, secs))| {
                InteractionEvent::new(
                    format!("e{}", i),
                    POSTS[post].into(),
                    InteractionKind::Save,
                    at(secs),
                )
            })
            .collect()
    })
}

fn promotions() -> impl Strategy<Value = Vec<PromotionEvent>> {
    prop::collection::vec((0..POSTS.len(), 0i64..100, prop::option::of(0i64..50)), 0..6)
        .prop_map(|raw| {
            raw.into_iter()
                .map(|(post, created, delta)| {
                    let promotion =
                        PromotionEvent::new(POSTS[post].into(), PromotionStatus::Pending, at(created));
                    match delta {
                        Some(delta) => promotion.with_updated_at(at(created + delta)),
                        None => promotion,
                    }
                })
                .collect()
        })
}

fn cleared() -> impl Strategy<Value = ClearedMap> {
    prop::collection::vec((0..POSTS.len(), 0i64..120), 0..4).prop_map(|raw| {
        raw.into_iter()
            .map(|(post, secs)| (PostId::from(POSTS[post]), at(secs)))
            .collect()
    })
}

/// Merges both lists, keeping each list's own order, as a concurrent arrival
/// of the two sources would.
fn interleave(
    interactions: &[InteractionEvent],
    promotions: &[PromotionEvent],
    selector: &[bool],
) -> Vec<FeedEvent> {
    let mut left = interactions.iter().cloned().peekable();
    let mut right = promotions.iter().cloned().peekable();
    let mut picks = selector.iter().copied().cycle();
    let mut events = Vec::with_capacity(interactions.len() + promotions.len());

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (None, None) => break,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(_), Some(_)) => picks.next().unwrap_or(true),
        };
        if take_left {
            events.extend(left.next().map(FeedEvent::from));
        } else {
            events.extend(right.next().map(FeedEvent::from));
        }
    }
    events
}

proptest! {
    #[test]
    fn aggregation_ignores_arrival_order(
        interactions in interactions(),
        promotions in promotions(),
        cleared in cleared(),
        selector in prop::collection::vec(any::<bool>(), 1..16),
    ) {
        let display = HashMap::new();
        let expected = aggregate(interactions.clone(), promotions.clone(), &cleared, &display);
        let shuffled = aggregate_events(interleave(&interactions, &promotions, &selector), &cleared, &display);
        prop_assert_eq!(expected, shuffled);
    }

    #[test]
    fn aggregation_is_idempotent(
        interactions in interactions(),
        promotions in promotions(),
        cleared in cleared(),
    ) {
        let display = HashMap::new();
        let first = aggregate(interactions.clone(), promotions.clone(), &cleared, &display);
        let second = aggregate(interactions, promotions, &cleared, &display);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn one_row_per_post_sorted_newest_first(
        interactions in interactions(),
        promotions in promotions(),
    ) {
        let feed = aggregate(interactions.clone(), promotions.clone(), &ClearedMap::new(), &HashMap::new());

        let mut posts: Vec<_> = interactions.iter().map(|e| e.post_id.clone())
            .chain(promotions.iter().map(|p| p.post_id.clone()))
            .collect();
        posts.sort();
        posts.dedup();
        prop_assert_eq!(feed.len(), posts.len());

        for pair in feed.windows(2) {
            prop_assert!(pair[0].latest_activity_at >= pair[1].latest_activity_at);
        }
    }

    #[test]
    fn count_matches_events_past_watermark(
        interactions in interactions(),
        promotions in promotions(),
        cleared in cleared(),
    ) {
        let feed = aggregate(interactions.clone(), promotions.clone(), &cleared, &HashMap::new());

        for row in &feed {
            let from_interactions = interactions
                .iter()
                .filter(|e| e.post_id == row.post_id && cleared.is_new(&e.post_id, e.created_at))
                .count();
            let from_promotion = promotions
                .iter()
                .find(|p| p.post_id == row.post_id)
                .map_or(0, |p| usize::from(cleared.is_new(&p.post_id, p.event_at())));
            prop_assert_eq!(row.new_activity_count as usize, from_interactions + from_promotion);
        }
    }

    #[test]
    fn seeing_every_row_clears_everything(
        interactions in interactions(),
        promotions in promotions(),
    ) {
        let display = HashMap::new();
        let feed = aggregate(interactions.clone(), promotions.clone(), &ClearedMap::new(), &display);
        let cleared: ClearedMap = feed.iter().map(|n| (n.post_id.clone(), n.seen_watermark())).collect();

        let again = aggregate(interactions, promotions, &cleared, &display);
        prop_assert!(again.iter().all(|n| n.new_activity_count == 0));
        prop_assert_eq!(global_badge(&again, None), 0);
    }

    #[test]
    fn global_badge_never_exceeds_rows(
        interactions in interactions(),
        promotions in promotions(),
        cleared in cleared(),
    ) {
        let feed = aggregate(interactions, promotions, &cleared, &HashMap::new());
        let with_activity = feed.iter().filter(|n| n.has_new_activity()).count();
        prop_assert_eq!(global_badge(&feed, None), with_activity);
        prop_assert!(with_activity <= feed.len());
    }
}
