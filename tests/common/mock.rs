use marketfeed_lib::domain::{
    entities::{InteractionEvent, PostDisplayFields, PostId, PromotionEvent, UserId},
    error::DomainResult,
    repositories::{InteractionSource, KeyValueStore, PostDisplayLookup, PromotionSource},
};

mockall::mock! {
    pub InteractionSource {}
    #[async_trait::async_trait]
    impl InteractionSource for InteractionSource {
        async fn fetch_interactions(&self, recipient_id: &UserId) -> DomainResult<Vec<InteractionEvent>>;
    }
}

mockall::mock! {
    pub PromotionSource {}
    #[async_trait::async_trait]
    impl PromotionSource for PromotionSource {
        async fn fetch_promotions(&self, recipient_id: &UserId) -> DomainResult<Vec<PromotionEvent>>;
    }
}

mockall::mock! {
    pub PostDisplayLookup {}
    #[async_trait::async_trait]
    impl PostDisplayLookup for PostDisplayLookup {
        async fn lookup_post_display_fields(&self, post_id: &PostId) -> DomainResult<Option<PostDisplayFields>>;
    }
}

mockall::mock! {
    pub KeyValueStore {}
    impl KeyValueStore for KeyValueStore {
        fn get(&self, key: &str) -> DomainResult<Option<String>>;
        fn set(&self, key: &str, value: &str) -> DomainResult<()>;
    }
}
