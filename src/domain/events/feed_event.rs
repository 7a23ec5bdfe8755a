use serde::{Deserialize, Serialize};

use crate::domain::entities::{InteractionEvent, PromotionEvent};

/// Everything the aggregator folds into a feed row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeedEvent {
    Interaction(InteractionEvent),
    Promotion(PromotionEvent),
}

impl FeedEvent {
    /// Interactions first, then promotions, each in source order.
    pub fn from_sources(
        interactions: Vec<InteractionEvent>,
        promotions: Vec<PromotionEvent>,
    ) -> Vec<FeedEvent> {
        interactions
            .into_iter()
            .map(FeedEvent::Interaction)
            .chain(promotions.into_iter().map(FeedEvent::Promotion))
            .collect()
    }
}

impl From<InteractionEvent> for FeedEvent {
    fn from(event: InteractionEvent) -> Self {
        FeedEvent::Interaction(event)
    }
}

impl From<PromotionEvent> for FeedEvent {
    fn from(event: PromotionEvent) -> Self {
        FeedEvent::Promotion(event)
    }
}
