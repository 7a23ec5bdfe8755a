use crate::domain::{
    entities::{
        AggregatedNotification, ClearedMap, InteractionEvent, PostDisplayFields, PostId,
        PromotionEvent, SenderIdentity,
    },
    events::FeedEvent,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

#[derive(Debug, Default)]
struct PostActivity {
    representative: Option<InteractionEvent>,
    new_interactions: u32,
    promotion: Option<PromotionEvent>,
}

/// Folds interaction and promotion events into one row per post.
///
/// The watermark snapshot is borrowed for the whole fold so every event of a
/// cycle is judged against the same `ClearedMap`. Posts are kept in key order,
/// which makes the result independent of how the two sources were interleaved.
#[derive(Debug)]
pub struct FeedReducer<'a> {
    cleared: &'a ClearedMap,
    posts: BTreeMap<PostId, PostActivity>,
}

impl<'a> FeedReducer<'a> {
    pub fn new(cleared: &'a ClearedMap) -> Self {
        Self {
            cleared,
            posts: BTreeMap::new(),
        }
    }

    pub fn apply(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Interaction(event) => self.apply_interaction(event),
            FeedEvent::Promotion(event) => self.apply_promotion(event),
        }
    }

    fn apply_interaction(&mut self, event: InteractionEvent) {
        let is_new = self.cleared.is_new(&event.post_id, event.created_at);
        let activity = self.posts.entry(event.post_id.clone()).or_default();

        if is_new {
            activity.new_interactions += 1;
        }

        // Running max; the first of equally timed events stays representative.
        let newer = activity
            .representative
            .as_ref()
            .map_or(true, |current| event.created_at > current.created_at);
        if newer {
            activity.representative = Some(event);
        }
    }

    fn apply_promotion(&mut self, event: PromotionEvent) {
        let activity = self.posts.entry(event.post_id.clone()).or_default();
        if activity.promotion.is_some() {
            debug!(post_id = %event.post_id, "Ignoring additional promotion record");
            return;
        }
        activity.promotion = Some(event);
    }

    /// Produces the feed, newest activity first. `display_fields` supplies
    /// caption and images for posts that only have a promotion.
    pub fn finish(
        self,
        display_fields: &HashMap<PostId, PostDisplayFields>,
    ) -> Vec<AggregatedNotification> {
        let cleared = self.cleared;
        let mut notifications: Vec<AggregatedNotification> = self
            .posts
            .into_iter()
            .filter_map(|(post_id, activity)| {
                build_notification(post_id, activity, cleared, display_fields)
            })
            .collect();

        notifications.sort_by(|a, b| b.latest_activity_at.cmp(&a.latest_activity_at));

        debug!(
            posts = notifications.len(),
            with_new_activity = notifications.iter().filter(|n| n.has_new_activity()).count(),
            "Aggregated notification feed"
        );

        notifications
    }
}

fn build_notification(
    post_id: PostId,
    activity: PostActivity,
    cleared: &ClearedMap,
    display_fields: &HashMap<PostId, PostDisplayFields>,
) -> Option<AggregatedNotification> {
    let PostActivity {
        representative,
        new_interactions,
        promotion,
    } = activity;

    let mut notification = match representative {
        Some(event) => AggregatedNotification {
            post_id,
            sender: SenderIdentity::from_event(&event),
            display: event.post_snapshot.display_fields(),
            latest_activity_at: event.created_at,
            new_activity_count: new_interactions,
            representative_event: Some(event),
            promotion_status: None,
            promotion_expires_at: None,
        },
        None => {
            let promotion = promotion.as_ref()?;
            let display = display_fields.get(&post_id).cloned().unwrap_or_else(|| {
                debug!(post_id = %post_id, "No display fields for promotion-only post");
                PostDisplayFields::default()
            });
            AggregatedNotification {
                post_id,
                representative_event: None,
                sender: SenderIdentity::system(),
                display,
                latest_activity_at: promotion.event_at(),
                new_activity_count: 0,
                promotion_status: None,
                promotion_expires_at: None,
            }
        }
    };

    if let Some(promotion) = promotion {
        merge_promotion(&mut notification, &promotion, cleared);
    }

    Some(notification)
}

/// A promotion contributes at most one unit of new activity, however many
/// status transitions happened since the watermark.
fn merge_promotion(
    notification: &mut AggregatedNotification,
    promotion: &PromotionEvent,
    cleared: &ClearedMap,
) {
    let event_at: DateTime<Utc> = promotion.event_at();
    notification.latest_activity_at = notification.latest_activity_at.max(event_at);
    if cleared.is_new(&promotion.post_id, event_at) {
        notification.new_activity_count += 1;
    }
    notification.promotion_status = Some(promotion.status.clone());
    notification.promotion_expires_at = promotion.expires_at;
}

/// Runs one full aggregation over both sources.
pub fn aggregate(
    interactions: Vec<InteractionEvent>,
    promotions: Vec<PromotionEvent>,
    cleared: &ClearedMap,
    display_fields: &HashMap<PostId, PostDisplayFields>,
) -> Vec<AggregatedNotification> {
    aggregate_events(
        FeedEvent::from_sources(interactions, promotions),
        cleared,
        display_fields,
    )
}

pub fn aggregate_events<I>(
    events: I,
    cleared: &ClearedMap,
    display_fields: &HashMap<PostId, PostDisplayFields>,
) -> Vec<AggregatedNotification>
where
    I: IntoIterator<Item = FeedEvent>,
{
    let mut reducer = FeedReducer::new(cleared);
    for event in events {
        reducer.apply(event);
    }
    reducer.finish(display_fields)
}

/// Posts that have a promotion but no interaction and therefore need a
/// display lookup before aggregation.
pub fn promotion_only_posts(
    interactions: &[InteractionEvent],
    promotions: &[PromotionEvent],
) -> Vec<PostId> {
    let with_interactions: BTreeSet<&PostId> = interactions.iter().map(|e| &e.post_id).collect();
    promotions
        .iter()
        .map(|p| &p.post_id)
        .filter(|post_id| !with_interactions.contains(post_id))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}
