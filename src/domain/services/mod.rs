pub mod aggregator;
pub mod event_collector;
pub mod reveal;
pub mod unread_tracker;

pub use aggregator::{aggregate, aggregate_events, promotion_only_posts, FeedReducer};

pub use event_collector::{CollectedEvents, EventCollector, FetchGeneration, SourceKind};

pub use reveal::{RevealController, RevealState};

pub use unread_tracker::{global_badge, item_badge, StorageKeys, UnreadStateTracker};
