use crate::domain::{
    entities::{PostDisplayFields, PostId},
    error::DomainResult,
    repositories::{DynPostDisplayLookup, PostDisplayLookup},
};
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

/// Caches successful display lookups. Misses and failures are not cached, so
/// a post that becomes available is picked up on the next cycle.
pub struct CachedPostDisplayLookup {
    inner: DynPostDisplayLookup,
    cache: Cache<PostId, PostDisplayFields>,
}

impl CachedPostDisplayLookup {
    pub fn new(inner: DynPostDisplayLookup, max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self { inner, cache }
    }

    pub async fn invalidate(&self, post_id: &PostId) {
        self.cache.invalidate(post_id).await;
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[async_trait]
impl PostDisplayLookup for CachedPostDisplayLookup {
    async fn lookup_post_display_fields(
        &self,
        post_id: &PostId,
    ) -> DomainResult<Option<PostDisplayFields>> {
        if let Some(cached) = self.cache.get(post_id).await {
            return Ok(Some(cached));
        }

        let result = self.inner.lookup_post_display_fields(post_id).await?;
        if let Some(fields) = result.clone() {
            self.cache.insert(post_id.clone(), fields).await;
        }
        Ok(result)
    }
}
