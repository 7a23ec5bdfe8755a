use crate::domain::{
    entities::{InteractionEvent, PostDisplayFields, PostId, PromotionEvent, UserId},
    error::DomainResult,
    repositories::{DynInteractionSource, DynPostDisplayLookup, DynPromotionSource},
    services::aggregator::promotion_only_posts,
};
use futures::future::join_all;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Interactions,
    Promotions,
}

/// Everything one fetch cycle gathered, settled and ready for aggregation.
#[derive(Debug, Clone, Default)]
pub struct CollectedEvents {
    pub interactions: Vec<InteractionEvent>,
    pub promotions: Vec<PromotionEvent>,
    pub display_fields: HashMap<PostId, PostDisplayFields>,
    pub degraded: Vec<SourceKind>,
}

impl CollectedEvents {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

/// Monotonic fetch counter. Only the latest started cycle may commit.
#[derive(Debug, Default)]
pub struct FetchGeneration(AtomicU64);

impl FetchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// Queries both event sources concurrently and resolves display fields for
/// promotion-only posts. A source that keeps failing contributes nothing.
pub struct EventCollector {
    interactions: DynInteractionSource,
    promotions: DynPromotionSource,
    lookup: DynPostDisplayLookup,
    max_attempts: u32,
}

impl EventCollector {
    pub fn new(
        interactions: DynInteractionSource,
        promotions: DynPromotionSource,
        lookup: DynPostDisplayLookup,
        max_attempts: u32,
    ) -> Self {
        Self {
            interactions,
            promotions,
            lookup,
            max_attempts: max_attempts.max(1),
        }
    }

    pub async fn collect(&self, recipient_id: &UserId) -> CollectedEvents {
        let (interactions, promotions) = tokio::join!(
            with_retries(SourceKind::Interactions, self.max_attempts, || {
                self.interactions.fetch_interactions(recipient_id)
            }),
            with_retries(SourceKind::Promotions, self.max_attempts, || {
                self.promotions.fetch_promotions(recipient_id)
            }),
        );

        let mut degraded = Vec::new();
        let interactions = interactions.unwrap_or_else(|e| {
            warn!(recipient = %recipient_id, "Interaction source failed, continuing without it: {}", e);
            degraded.push(SourceKind::Interactions);
            Vec::new()
        });
        let promotions = promotions.unwrap_or_else(|e| {
            warn!(recipient = %recipient_id, "Promotion source failed, continuing without it: {}", e);
            degraded.push(SourceKind::Promotions);
            Vec::new()
        });

        let display_fields = self
            .resolve_display_fields(promotion_only_posts(&interactions, &promotions))
            .await;

        CollectedEvents {
            interactions,
            promotions,
            display_fields,
            degraded,
        }
    }

    async fn resolve_display_fields(
        &self,
        post_ids: Vec<PostId>,
    ) -> HashMap<PostId, PostDisplayFields> {
        let lookups = post_ids.into_iter().map(|post_id| async move {
            let result = self.lookup.lookup_post_display_fields(&post_id).await;
            (post_id, result)
        });

        join_all(lookups)
            .await
            .into_iter()
            .filter_map(|(post_id, result)| match result {
                Ok(Some(fields)) => Some((post_id, fields)),
                Ok(None) => {
                    debug!(post_id = %post_id, "Post display lookup missed");
                    None
                }
                Err(e) => {
                    debug!(post_id = %post_id, "Post display lookup failed: {}", e);
                    None
                }
            })
            .collect()
    }
}

async fn with_retries<T, F, Fut>(source: SourceKind, max_attempts: u32, mut fetch: F) -> DomainResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let mut attempt = 1;
    loop {
        match fetch().await {
            Ok(events) => return Ok(events),
            Err(e) if attempt < max_attempts => {
                debug!(?source, attempt, "Fetch failed, retrying: {}", e);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
