pub mod event_source_repository;
pub mod key_value_store;
pub mod post_display_repository;

pub use event_source_repository::{
    DynInteractionSource, DynPromotionSource, InteractionSource, PromotionSource,
};
pub use key_value_store::{DynKeyValueStore, KeyValueStore};
pub use post_display_repository::{DynPostDisplayLookup, PostDisplayLookup};

#[cfg(test)]
pub use event_source_repository::{MockInteractionSource, MockPromotionSource};
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
#[cfg(test)]
pub use post_display_repository::MockPostDisplayLookup;
