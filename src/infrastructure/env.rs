use crate::domain::error::{DomainError, DomainResult};
use std::{env, str::FromStr};

/// Returns the value of an environment variable or a default value if not found.
///
/// # Examples
///
/// ```rust
/// let base_url = marketfeed_lib::infrastructure::env::get_env_or(
///     "MARKETFEED_BASE_URL",
///     "http://localhost:54321/rest/v1",
/// );
/// assert!(!base_url.is_empty());
/// ```
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses an environment variable, falling back to `default` when it is unset.
/// A value that is set but malformed is a configuration error.
pub fn parse_env_or<T>(key: &str, default: T) -> DomainResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e| {
            DomainError::ConfigurationError(format!("Invalid value for {}: {}", key, e))
        }),
        Err(_) => Ok(default),
    }
}
