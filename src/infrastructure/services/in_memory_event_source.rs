use crate::domain::{
    entities::{InteractionEvent, PostDisplayFields, PostId, PromotionEvent, UserId},
    error::{DomainError, DomainResult},
    repositories::{InteractionSource, PostDisplayLookup, PromotionSource},
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct Fixtures {
    interactions: HashMap<UserId, Vec<InteractionEvent>>,
    promotions: HashMap<UserId, Vec<PromotionEvent>>,
    posts: HashMap<PostId, PostDisplayFields>,
    failing_interactions: bool,
    failing_promotions: bool,
}

/// Event source over in-process fixtures. Events are appended, never edited,
/// mirroring the append-only backend stream.
#[derive(Debug, Default)]
pub struct InMemoryEventSource {
    fixtures: RwLock<Fixtures>,
}

impl InMemoryEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_interaction(&self, recipient_id: &UserId, event: InteractionEvent) {
        self.fixtures
            .write()
            .interactions
            .entry(recipient_id.clone())
            .or_default()
            .push(event);
    }

    pub fn push_promotion(&self, recipient_id: &UserId, event: PromotionEvent) {
        self.fixtures
            .write()
            .promotions
            .entry(recipient_id.clone())
            .or_default()
            .push(event);
    }

    pub fn insert_post(&self, post_id: PostId, fields: PostDisplayFields) {
        self.fixtures.write().posts.insert(post_id, fields);
    }

    /// Drops every recorded event, keeping posts and failure switches.
    pub fn clear_events(&self) {
        let mut fixtures = self.fixtures.write();
        fixtures.interactions.clear();
        fixtures.promotions.clear();
    }

    pub fn set_interactions_failing(&self, failing: bool) {
        self.fixtures.write().failing_interactions = failing;
    }

    pub fn set_promotions_failing(&self, failing: bool) {
        self.fixtures.write().failing_promotions = failing;
    }
}

#[async_trait]
impl InteractionSource for InMemoryEventSource {
    async fn fetch_interactions(
        &self,
        recipient_id: &UserId,
    ) -> DomainResult<Vec<InteractionEvent>> {
        let fixtures = self.fixtures.read();
        if fixtures.failing_interactions {
            return Err(DomainError::SourceError(
                "Interaction source unavailable".to_string(),
            ));
        }
        Ok(fixtures
            .interactions
            .get(recipient_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl PromotionSource for InMemoryEventSource {
    async fn fetch_promotions(&self, recipient_id: &UserId) -> DomainResult<Vec<PromotionEvent>> {
        let fixtures = self.fixtures.read();
        if fixtures.failing_promotions {
            return Err(DomainError::SourceError(
                "Promotion source unavailable".to_string(),
            ));
        }
        let mut promotions = fixtures
            .promotions
            .get(recipient_id)
            .cloned()
            .unwrap_or_default();
        promotions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(promotions)
    }
}

#[async_trait]
impl PostDisplayLookup for InMemoryEventSource {
    async fn lookup_post_display_fields(
        &self,
        post_id: &PostId,
    ) -> DomainResult<Option<PostDisplayFields>> {
        Ok(self.fixtures.read().posts.get(post_id).cloned())
    }
}
