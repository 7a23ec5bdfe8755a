use super::post::PostId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-post "last seen" watermarks kept on the local device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClearedMap {
    entries: HashMap<PostId, DateTime<Utc>>,
}

impl ClearedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, post_id: &PostId) -> Option<DateTime<Utc>> {
        self.entries.get(post_id).copied()
    }

    /// Records a watermark. An older value never replaces a newer one.
    pub fn record(&mut self, post_id: PostId, seen_at: DateTime<Utc>) {
        self.entries
            .entry(post_id)
            .and_modify(|current| {
                if seen_at > *current {
                    *current = seen_at;
                }
            })
            .or_insert(seen_at);
    }

    /// An event is new when it is strictly later than the post's watermark.
    /// Posts without a watermark treat every event as new.
    pub fn is_new(&self, post_id: &PostId, occurred_at: DateTime<Utc>) -> bool {
        self.get(post_id).map_or(true, |seen_at| occurred_at > seen_at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PostId, DateTime<Utc>)> for ClearedMap {
    fn from_iter<I: IntoIterator<Item = (PostId, DateTime<Utc>)>>(iter: I) -> Self {
        let mut map = ClearedMap::new();
        for (post_id, seen_at) in iter {
            map.record(post_id, seen_at);
        }
        map
    }
}

/// When the user last opened the notifications view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LastOpenedMarker(DateTime<Utc>);

impl LastOpenedMarker {
    pub fn new(opened_at: DateTime<Utc>) -> Self {
        Self(opened_at)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(raw.trim())
            .ok()
            .map(|at| Self(at.with_timezone(&Utc)))
    }

    pub fn encode(&self) -> String {
        self.0.to_rfc3339()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.0
    }
}
