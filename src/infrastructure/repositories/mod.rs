pub mod cached_post_lookup;
pub mod in_memory_key_value_store;
pub mod sqlite_key_value_store;

pub use cached_post_lookup::CachedPostDisplayLookup;
pub use in_memory_key_value_store::InMemoryKeyValueStore;
pub use sqlite_key_value_store::SqliteKeyValueStore;
