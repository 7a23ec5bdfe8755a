use crate::domain::error::DomainResult;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

/// Device-local string store. Both operations are best-effort and callers must
/// tolerate failures.
#[cfg_attr(test, automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> DomainResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> DomainResult<()>;
}

pub type DynKeyValueStore = Arc<dyn KeyValueStore>;
