use crate::domain::{
    entities::{InteractionEvent, PromotionEvent, UserId},
    error::DomainResult,
};
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

/// Interactions on posts owned by the recipient. A failed call yields no events at all.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InteractionSource: Send + Sync {
    async fn fetch_interactions(&self, recipient_id: &UserId)
        -> DomainResult<Vec<InteractionEvent>>;
}

/// Boost requests authored by the recipient, newest first.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PromotionSource: Send + Sync {
    async fn fetch_promotions(&self, recipient_id: &UserId) -> DomainResult<Vec<PromotionEvent>>;
}

pub type DynInteractionSource = Arc<dyn InteractionSource>;
pub type DynPromotionSource = Arc<dyn PromotionSource>;
