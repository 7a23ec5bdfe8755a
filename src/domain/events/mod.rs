pub mod feed_event;

pub use feed_event::FeedEvent;
