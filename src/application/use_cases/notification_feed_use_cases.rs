use crate::domain::{
    entities::{AggregatedNotification, PostId, UserId},
    error::DomainResult,
    repositories::{DynInteractionSource, DynKeyValueStore, DynPostDisplayLookup, DynPromotionSource},
    services::{
        aggregate, CollectedEvents, EventCollector, FetchGeneration, RevealController, RevealState,
        UnreadStateTracker,
    },
};
use crate::infrastructure::{config::FeedConfig, repositories::CachedPostDisplayLookup};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Committed {
        generation: u64,
        items: usize,
        degraded: bool,
    },
    /// A newer fetch started before this one settled; its result was dropped.
    Stale { generation: u64 },
}

impl FetchOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, FetchOutcome::Committed { .. })
    }
}

#[derive(Debug)]
struct FeedState {
    items: Vec<AggregatedNotification>,
    reveal: RevealController,
    badge_suppressed: bool,
    in_view: bool,
    committed_in_view: bool,
    opened_recorded: bool,
}

/// Renderer-facing notification feed for one recipient.
///
/// Each `refresh` rebuilds the whole feed from both sources; nothing besides
/// the two device-local watermarks survives between cycles.
pub struct NotificationFeedUseCases {
    recipient: UserId,
    collector: EventCollector,
    tracker: UnreadStateTracker,
    generation: FetchGeneration,
    state: Mutex<FeedState>,
}

impl NotificationFeedUseCases {
    pub fn new(
        recipient: UserId,
        collector: EventCollector,
        tracker: UnreadStateTracker,
        config: &FeedConfig,
    ) -> Self {
        let reveal = RevealController::new(
            config.page_size,
            config.reveal_batch_size,
            config.reveal_prefetch_limit,
        );

        Self {
            recipient,
            collector,
            tracker,
            generation: FetchGeneration::new(),
            state: Mutex::new(FeedState {
                items: Vec::new(),
                reveal,
                badge_suppressed: false,
                in_view: false,
                committed_in_view: false,
                opened_recorded: false,
            }),
        }
    }

    /// Wires the collaborators, putting a cache in front of the post lookup.
    /// Fails when `config` does not validate.
    pub fn from_sources(
        recipient: UserId,
        interactions: DynInteractionSource,
        promotions: DynPromotionSource,
        lookup: DynPostDisplayLookup,
        store: DynKeyValueStore,
        config: &FeedConfig,
    ) -> DomainResult<Self> {
        config.validate()?;

        let lookup = Arc::new(CachedPostDisplayLookup::new(
            lookup,
            config.lookup_cache_capacity,
            config.lookup_cache_ttl,
        ));
        let collector =
            EventCollector::new(interactions, promotions, lookup, config.source_max_attempts);
        let tracker = UnreadStateTracker::new(store, config.storage_keys(&recipient));

        Ok(Self::new(recipient, collector, tracker, config))
    }

    pub fn recipient(&self) -> &UserId {
        &self.recipient
    }

    pub async fn refresh(&self) -> FetchOutcome {
        let generation = self.generation.begin();
        let collected = self.collector.collect(&self.recipient).await;
        self.commit(generation, collected)
    }

    fn commit(&self, generation: u64, collected: CollectedEvents) -> FetchOutcome {
        let mut state = self.state.lock();
        if !self.generation.is_current(generation) {
            debug!(generation, latest = self.generation.current(), "Dropping superseded fetch result");
            return FetchOutcome::Stale { generation };
        }

        let degraded = collected.is_degraded();
        let cleared = self.tracker.load_cleared_map();
        let items = aggregate(
            collected.interactions,
            collected.promotions,
            &cleared,
            &collected.display_fields,
        );

        let count = items.len();
        state.reveal.set_total(count);
        state.items = items;
        // Inside the view the badge stays hidden until this visit is recorded.
        state.badge_suppressed = state.in_view && !state.opened_recorded;
        if state.in_view {
            state.committed_in_view = true;
        }

        info!(
            recipient = %self.recipient,
            generation,
            items = count,
            degraded,
            "Committed notification feed"
        );

        FetchOutcome::Committed {
            generation,
            items: count,
            degraded,
        }
    }

    pub fn items(&self) -> Vec<AggregatedNotification> {
        self.state.lock().items.clone()
    }

    pub fn visible_items(&self) -> Vec<AggregatedNotification> {
        let state = self.state.lock();
        state.reveal.visible(&state.items).to_vec()
    }

    pub fn visible_count(&self) -> usize {
        self.state.lock().reveal.visible_count()
    }

    pub fn unread_items(&self) -> Vec<AggregatedNotification> {
        self.state
            .lock()
            .items
            .iter()
            .filter(|n| n.has_new_activity())
            .cloned()
            .collect()
    }

    pub fn item_badge(&self, post_id: &PostId) -> Option<u32> {
        self.state
            .lock()
            .items
            .iter()
            .find(|n| &n.post_id == post_id)
            .map(|n| n.new_activity_count)
    }

    pub fn global_badge(&self) -> usize {
        let state = self.state.lock();
        if state.badge_suppressed {
            return 0;
        }
        self.tracker.global_badge(&state.items)
    }

    /// The user opened a post's notification detail. Returns false when the
    /// post is not part of the current feed.
    pub fn mark_post_seen(&self, post_id: &PostId) -> bool {
        let mut state = self.state.lock();
        let Some(item) = state.items.iter_mut().find(|n| &n.post_id == post_id) else {
            debug!(post_id = %post_id, "mark_post_seen for a post outside the feed");
            return false;
        };

        self.tracker.mark_post_seen(item);
        item.clear_local_badge();
        true
    }

    pub fn mark_all_seen(&self) -> usize {
        let mut state = self.state.lock();
        self.tracker.record_seen(
            state
                .items
                .iter()
                .map(|n| (n.post_id.clone(), n.seen_watermark())),
        );

        let mut cleared = 0;
        for item in state.items.iter_mut().filter(|n| n.has_new_activity()) {
            item.clear_local_badge();
            cleared += 1;
        }
        cleared
    }

    pub fn on_enter_notifications_view(&self) {
        let mut state = self.state.lock();
        state.in_view = true;
        state.badge_suppressed = true;
        state.committed_in_view = false;
        state.opened_recorded = false;
        state.reveal.reset();
    }

    pub fn on_exit_notifications_view(&self) {
        let mut state = self.state.lock();
        state.in_view = false;
        state.badge_suppressed = true;
    }

    /// Called by the renderer after drawing the list. The last-opened marker
    /// is written once per visit and only after a fetch has committed.
    pub fn on_list_rendered(&self, rendered_at: DateTime<Utc>) -> bool {
        let mut state = self.state.lock();
        if !state.in_view || !state.committed_in_view || state.opened_recorded {
            return false;
        }

        self.tracker.record_opened(rendered_at);
        state.opened_recorded = true;
        state.badge_suppressed = false;
        true
    }

    pub fn on_scroll_near_end(&self) -> RevealState {
        self.state.lock().reveal.trigger()
    }

    pub fn on_animation_frame(&self) -> bool {
        self.state.lock().reveal.tick()
    }

    pub fn reveal_state(&self) -> RevealState {
        self.state.lock().reveal.state()
    }
}
