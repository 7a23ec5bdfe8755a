use super::interaction::InteractionEvent;
use super::post::{PostDisplayFields, PostId};
use super::promotion::PromotionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SYSTEM_SENDER_NAME: &str = "Marketplace";

/// Who a notification appears to come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SenderIdentity {
    Actor {
        display_name: Option<String>,
        avatar_url: Option<String>,
    },
    System {
        display_name: String,
    },
}

impl SenderIdentity {
    pub fn system() -> Self {
        SenderIdentity::System {
            display_name: SYSTEM_SENDER_NAME.to_string(),
        }
    }

    pub fn from_event(event: &InteractionEvent) -> Self {
        SenderIdentity::Actor {
            display_name: event.actor_display_name.clone(),
            avatar_url: event.actor_avatar_url.clone(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            SenderIdentity::Actor { display_name, .. } => display_name.as_deref().unwrap_or(""),
            SenderIdentity::System { display_name } => display_name,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, SenderIdentity::System { .. })
    }
}

/// One feed row per post with at least one interaction or promotion event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedNotification {
    pub post_id: PostId,
    pub representative_event: Option<InteractionEvent>,
    pub sender: SenderIdentity,
    pub display: PostDisplayFields,
    pub latest_activity_at: DateTime<Utc>,
    pub new_activity_count: u32,
    pub promotion_status: Option<PromotionStatus>,
    pub promotion_expires_at: Option<DateTime<Utc>>,
}

impl AggregatedNotification {
    pub fn has_new_activity(&self) -> bool {
        self.new_activity_count > 0
    }

    pub fn is_promotion_only(&self) -> bool {
        self.representative_event.is_none()
    }

    pub fn promotion_active(&self, now: DateTime<Utc>) -> bool {
        self.promotion_status == Some(PromotionStatus::Success)
            && self.promotion_expires_at.map_or(true, |at| at > now)
    }

    /// Watermark to record once the user has looked at this post's activity.
    pub fn seen_watermark(&self) -> DateTime<Utc> {
        self.latest_activity_at
    }

    pub fn clear_local_badge(&mut self) {
        self.new_activity_count = 0;
    }
}
