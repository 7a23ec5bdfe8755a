use crate::domain::{entities::UserId, error::DomainResult, services::StorageKeys};
use crate::infrastructure::env::{get_env_or, parse_env_or};
use std::time::Duration;
use validator::{Validate, ValidationError};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_REVEAL_BATCH_SIZE: usize = 4;
pub const DEFAULT_REVEAL_PREFETCH_LIMIT: usize = 8;
pub const DEFAULT_CLEARED_MAP_KEY: &str = "notifications.cleared";
pub const DEFAULT_LAST_OPENED_KEY: &str = "notifications.last_opened";

#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_reveal_batch"))]
pub struct FeedConfig {
    #[validate(range(min = 1))]
    pub page_size: usize,
    #[validate(range(min = 1))]
    pub reveal_batch_size: usize,
    #[validate(range(min = 1))]
    pub reveal_prefetch_limit: usize,
    #[validate(range(min = 1))]
    pub source_max_attempts: u32,
    #[validate(range(min = 1))]
    pub lookup_cache_capacity: u64,
    pub lookup_cache_ttl: Duration,
    #[validate(length(min = 1))]
    pub cleared_map_key: String,
    #[validate(length(min = 1))]
    pub last_opened_key: String,
}

fn validate_reveal_batch(config: &FeedConfig) -> Result<(), ValidationError> {
    if config.reveal_batch_size > config.reveal_prefetch_limit {
        return Err(ValidationError::new("reveal_batch_exceeds_prefetch_limit"));
    }
    Ok(())
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            reveal_batch_size: DEFAULT_REVEAL_BATCH_SIZE,
            reveal_prefetch_limit: DEFAULT_REVEAL_PREFETCH_LIMIT,
            source_max_attempts: 2,
            lookup_cache_capacity: 500,
            lookup_cache_ttl: Duration::from_secs(300), // 5 minutes
            cleared_map_key: DEFAULT_CLEARED_MAP_KEY.to_string(),
            last_opened_key: DEFAULT_LAST_OPENED_KEY.to_string(),
        }
    }
}

impl FeedConfig {
    /// Reads `MARKETFEED_*` variables, loading `.env` first when present.
    pub fn from_env() -> DomainResult<Self> {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            page_size: parse_env_or("MARKETFEED_PAGE_SIZE", defaults.page_size)?,
            reveal_batch_size: parse_env_or(
                "MARKETFEED_REVEAL_BATCH_SIZE",
                defaults.reveal_batch_size,
            )?,
            reveal_prefetch_limit: parse_env_or(
                "MARKETFEED_REVEAL_PREFETCH_LIMIT",
                defaults.reveal_prefetch_limit,
            )?,
            source_max_attempts: parse_env_or(
                "MARKETFEED_SOURCE_MAX_ATTEMPTS",
                defaults.source_max_attempts,
            )?,
            lookup_cache_capacity: parse_env_or(
                "MARKETFEED_LOOKUP_CACHE_CAPACITY",
                defaults.lookup_cache_capacity,
            )?,
            lookup_cache_ttl: Duration::from_secs(parse_env_or(
                "MARKETFEED_LOOKUP_CACHE_TTL_SECS",
                defaults.lookup_cache_ttl.as_secs(),
            )?),
            cleared_map_key: get_env_or("MARKETFEED_CLEARED_MAP_KEY", DEFAULT_CLEARED_MAP_KEY),
            last_opened_key: get_env_or("MARKETFEED_LAST_OPENED_KEY", DEFAULT_LAST_OPENED_KEY),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_reveal(page_size: usize, batch_size: usize) -> Self {
        let mut config = Self::default();
        config.page_size = page_size;
        config.reveal_batch_size = batch_size;
        config.reveal_prefetch_limit = config.reveal_prefetch_limit.max(batch_size);
        config
    }

    pub fn with_lookup_cache(capacity: u64, ttl: Duration) -> Self {
        let mut config = Self::default();
        config.lookup_cache_capacity = capacity;
        config.lookup_cache_ttl = ttl;
        config
    }

    pub fn storage_keys(&self, recipient: &UserId) -> StorageKeys {
        StorageKeys::for_recipient(&self.cleared_map_key, &self.last_opened_key, recipient)
    }
}
