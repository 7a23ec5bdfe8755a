use crate::domain::{
    entities::{AggregatedNotification, ClearedMap, LastOpenedMarker, PostId, UserId},
    repositories::DynKeyValueStore,
};
use chrono::{DateTime, Utc};
use tracing::warn;

/// Keys under which the two watermarks are persisted for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub cleared_map: String,
    pub last_opened: String,
}

impl StorageKeys {
    pub fn for_recipient(cleared_prefix: &str, last_opened_prefix: &str, recipient: &UserId) -> Self {
        Self {
            cleared_map: format!("{}:{}", cleared_prefix, recipient),
            last_opened: format!("{}:{}", last_opened_prefix, recipient),
        }
    }
}

/// Reads and writes the per-post and global watermarks.
///
/// Every persistence failure is logged and swallowed: a failed read behaves as
/// if nothing was recorded, a failed write is dropped.
pub struct UnreadStateTracker {
    store: DynKeyValueStore,
    keys: StorageKeys,
}

impl UnreadStateTracker {
    pub fn new(store: DynKeyValueStore, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn load_cleared_map(&self) -> ClearedMap {
        let raw = match self.store.get(&self.keys.cleared_map) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ClearedMap::new(),
            Err(e) => {
                warn!(key = %self.keys.cleared_map, "Failed to read cleared map: {}", e);
                return ClearedMap::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key = %self.keys.cleared_map, "Discarding unreadable cleared map: {}", e);
            ClearedMap::new()
        })
    }

    /// Read-modify-write of the cleared map. Returns the map as it should now
    /// be seen, even when the write itself failed.
    pub fn record_seen<I>(&self, entries: I) -> ClearedMap
    where
        I: IntoIterator<Item = (PostId, DateTime<Utc>)>,
    {
        let mut cleared = self.load_cleared_map();
        for (post_id, seen_at) in entries {
            cleared.record(post_id, seen_at);
        }

        match serde_json::to_string(&cleared) {
            Ok(raw) => {
                if let Err(e) = self.store.set(&self.keys.cleared_map, &raw) {
                    warn!(key = %self.keys.cleared_map, "Failed to persist cleared map: {}", e);
                }
            }
            Err(e) => warn!("Failed to encode cleared map: {}", e),
        }

        cleared
    }

    pub fn mark_post_seen(&self, notification: &AggregatedNotification) -> ClearedMap {
        self.record_seen([(notification.post_id.clone(), notification.seen_watermark())])
    }

    pub fn last_opened_marker(&self) -> Option<LastOpenedMarker> {
        let raw = match self.store.get(&self.keys.last_opened) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %self.keys.last_opened, "Failed to read last opened marker: {}", e);
                return None;
            }
        };

        let marker = LastOpenedMarker::parse(&raw);
        if marker.is_none() {
            warn!(key = %self.keys.last_opened, raw = %raw, "Ignoring unparseable last opened marker");
        }
        marker
    }

    pub fn record_opened(&self, opened_at: DateTime<Utc>) {
        let marker = LastOpenedMarker::new(opened_at);
        if let Err(e) = self.store.set(&self.keys.last_opened, &marker.encode()) {
            warn!(key = %self.keys.last_opened, "Failed to persist last opened marker: {}", e);
        }
    }

    pub fn global_badge(&self, notifications: &[AggregatedNotification]) -> usize {
        global_badge(notifications, self.last_opened_marker())
    }
}

pub fn item_badge(notification: &AggregatedNotification) -> u32 {
    notification.new_activity_count
}

/// Number of distinct posts with unseen activity, limited to activity after the
/// last visit when a marker exists. Not the sum of per-item badges.
pub fn global_badge(
    notifications: &[AggregatedNotification],
    marker: Option<LastOpenedMarker>,
) -> usize {
    let unseen = notifications.iter().filter(|n| n.has_new_activity());
    match marker {
        Some(marker) => unseen
            .filter(|n| n.latest_activity_at > marker.opened_at())
            .count(),
        None => unseen.count(),
    }
}
