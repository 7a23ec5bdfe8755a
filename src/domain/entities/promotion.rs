use super::post::PostId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PromotionStatus {
    Pending,
    Success,
    Reject,
    Other(String),
}

impl PromotionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PromotionStatus::Pending => "pending",
            PromotionStatus::Success => "success",
            PromotionStatus::Reject => "reject",
            PromotionStatus::Other(status) => status,
        }
    }
}

impl From<String> for PromotionStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "pending" => PromotionStatus::Pending,
            "success" => PromotionStatus::Success,
            "reject" => PromotionStatus::Reject,
            _ => PromotionStatus::Other(status),
        }
    }
}

impl From<PromotionStatus> for String {
    fn from(status: PromotionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for PromotionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A boost request the recipient submitted for one of their own posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionEvent {
    pub post_id: PostId,
    pub status: PromotionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl PromotionEvent {
    pub fn new(post_id: PostId, status: PromotionStatus, created_at: DateTime<Utc>) -> Self {
        Self {
            post_id,
            status,
            created_at,
            updated_at: None,
            expires_at: None,
        }
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Time of the latest status transition.
    pub fn event_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }

    /// A successful boost that has not expired yet.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.status == PromotionStatus::Success && self.expires_at.map_or(true, |at| at > now)
    }
}
