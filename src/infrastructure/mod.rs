pub mod config;
pub mod env;
pub mod repositories;
pub mod services;

pub use config::FeedConfig;
pub use repositories::{CachedPostDisplayLookup, InMemoryKeyValueStore, SqliteKeyValueStore};
pub use services::{HttpEventSource, HttpSourceConfig, InMemoryEventSource};
