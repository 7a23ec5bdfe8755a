pub mod entities;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

pub use entities::{
    AggregatedNotification, ClearedMap, InteractionEvent, InteractionKind, LastOpenedMarker,
    PostDisplayFields, PostId, PostSnapshot, PromotionEvent, PromotionStatus, SenderIdentity,
    UserId,
};

pub use error::{DomainError, DomainResult};

pub use events::FeedEvent;

pub use repositories::{
    DynInteractionSource, DynKeyValueStore, DynPostDisplayLookup, DynPromotionSource,
    InteractionSource, KeyValueStore, PostDisplayLookup, PromotionSource,
};

pub use services::{
    EventCollector, FetchGeneration, RevealController, RevealState, UnreadStateTracker,
};
