pub mod http_event_source;
pub mod in_memory_event_source;

pub use http_event_source::{HttpEventSource, HttpSourceConfig};
pub use in_memory_event_source::InMemoryEventSource;
