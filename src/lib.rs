//! Notification and promotion aggregation for a marketplace seller's feed.
//!
//! Interaction events (likes, saves) and promotion records are fetched from
//! two independent sources, folded into one row per post and exposed through
//! [`application::NotificationFeedUseCases`], together with device-local
//! unread watermarks and a paced reveal window.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{FetchOutcome, NotificationFeedUseCases};
pub use domain::{
    AggregatedNotification, DomainError, DomainResult, InteractionEvent, PostId, PromotionEvent,
    UserId,
};
pub use infrastructure::FeedConfig;
