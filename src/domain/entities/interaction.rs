use super::post::{PostId, PostSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InteractionKind {
    Like,
    Save,
    CommentLike,
    Other(String),
}

impl InteractionKind {
    pub fn as_str(&self) -> &str {
        match self {
            InteractionKind::Like => "like",
            InteractionKind::Save => "save",
            InteractionKind::CommentLike => "comment_like",
            InteractionKind::Other(tag) => tag,
        }
    }
}

impl From<String> for InteractionKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "like" => InteractionKind::Like,
            "save" => InteractionKind::Save,
            "comment_like" | "comment-like" => InteractionKind::CommentLike,
            _ => InteractionKind::Other(tag),
        }
    }
}

impl From<InteractionKind> for String {
    fn from(kind: InteractionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One action by an actor on a post owned by the recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub id: String,
    pub post_id: PostId,
    pub kind: InteractionKind,
    pub created_at: DateTime<Utc>,
    pub actor_display_name: Option<String>,
    pub actor_avatar_url: Option<String>,
    pub post_snapshot: PostSnapshot,
}

impl InteractionEvent {
    pub fn new(
        id: impl Into<String>,
        post_id: PostId,
        kind: InteractionKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            post_id,
            kind,
            created_at,
            actor_display_name: None,
            actor_avatar_url: None,
            post_snapshot: PostSnapshot::default(),
        }
    }

    pub fn with_actor(mut self, display_name: impl Into<String>, avatar_url: Option<String>) -> Self {
        self.actor_display_name = Some(display_name.into());
        self.actor_avatar_url = avatar_url;
        self
    }

    pub fn with_snapshot(mut self, snapshot: PostSnapshot) -> Self {
        self.post_snapshot = snapshot;
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.actor_display_name.is_none()
    }
}
