pub mod notification_feed_use_cases;

pub use notification_feed_use_cases::{FetchOutcome, NotificationFeedUseCases};
