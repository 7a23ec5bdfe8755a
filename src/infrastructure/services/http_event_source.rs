use crate::domain::{
    entities::{
        InteractionEvent, InteractionKind, PostDisplayFields, PostId, PostSnapshot,
        PromotionEvent, PromotionStatus, UserId,
    },
    error::{DomainError, DomainResult},
    repositories::{InteractionSource, PostDisplayLookup, PromotionSource},
};
use crate::infrastructure::env::get_env_or;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub interactions_table: String,
    pub promotions_table: String,
    pub posts_table: String,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321/rest/v1".to_string(),
            api_key: None,
            interactions_table: "notifications".to_string(),
            promotions_table: "boost_requests".to_string(),
            posts_table: "posts".to_string(),
        }
    }
}

impl HttpSourceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        let api_key = get_env_or("MARKETFEED_API_KEY", "");
        Self {
            base_url: get_env_or("MARKETFEED_BASE_URL", &defaults.base_url),
            api_key: (!api_key.is_empty()).then_some(api_key),
            interactions_table: get_env_or(
                "MARKETFEED_INTERACTIONS_TABLE",
                &defaults.interactions_table,
            ),
            promotions_table: get_env_or("MARKETFEED_PROMOTIONS_TABLE", &defaults.promotions_table),
            posts_table: get_env_or("MARKETFEED_POSTS_TABLE", &defaults.posts_table),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRow {
    pub id: String,
    pub post_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub sender_name: Option<String>,
    pub sender_avatar: Option<String>,
    #[serde(default)]
    pub post_caption: Option<String>,
    #[serde(default)]
    pub post_images: Option<Vec<String>>,
    #[serde(default)]
    pub post_likes: Option<u32>,
    #[serde(default)]
    pub post_saves: Option<u32>,
}

impl From<InteractionRow> for InteractionEvent {
    fn from(row: InteractionRow) -> Self {
        InteractionEvent {
            id: row.id,
            post_id: PostId::from(row.post_id),
            kind: InteractionKind::from(row.kind),
            created_at: row.created_at,
            actor_display_name: row.sender_name,
            actor_avatar_url: row.sender_avatar,
            post_snapshot: PostSnapshot {
                caption: row.post_caption.unwrap_or_default(),
                images: row.post_images.unwrap_or_default(),
                like_count: row.post_likes.unwrap_or_default(),
                save_count: row.post_saves.unwrap_or_default(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionRow {
    pub post_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<PromotionRow> for PromotionEvent {
    fn from(row: PromotionRow) -> Self {
        PromotionEvent {
            post_id: PostId::from(row.post_id),
            status: PromotionStatus::from(row.status),
            created_at: row.created_at,
            updated_at: row.updated_at,
            expires_at: row.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRow {
    pub caption: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Event source backed by a PostgREST-style HTTP API.
#[derive(Debug, Clone)]
pub struct HttpEventSource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpEventSource {
    pub fn new(config: HttpSourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn with_client(client: Client, config: HttpSourceConfig) -> Self {
        Self { client, config }
    }

    fn headers(&self) -> DomainResult<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        if let Some(api_key) = &self.config.api_key {
            let value = header::HeaderValue::from_str(api_key).map_err(|e| {
                DomainError::ConfigurationError(format!("Invalid API key header: {}", e))
            })?;
            headers.insert("apikey", value);
            let bearer = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| {
                    DomainError::ConfigurationError(format!("Invalid API key header: {}", e))
                })?;
            headers.insert(header::AUTHORIZATION, bearer);
        }

        Ok(headers)
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> DomainResult<Vec<T>> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), table);
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::SourceError(format!(
                "GET {} returned {}",
                table, status
            )));
        }

        // Decode the whole body before converting, so a bad row fails the call.
        Ok(response.json::<Vec<T>>().await?)
    }
}

#[async_trait]
impl InteractionSource for HttpEventSource {
    async fn fetch_interactions(
        &self,
        recipient_id: &UserId,
    ) -> DomainResult<Vec<InteractionEvent>> {
        let rows: Vec<InteractionRow> = self
            .get_rows(
                &self.config.interactions_table,
                &[
                    ("recipient_id", format!("eq.{}", recipient_id)),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(InteractionEvent::from).collect())
    }
}

#[async_trait]
impl PromotionSource for HttpEventSource {
    async fn fetch_promotions(&self, recipient_id: &UserId) -> DomainResult<Vec<PromotionEvent>> {
        let rows: Vec<PromotionRow> = self
            .get_rows(
                &self.config.promotions_table,
                &[
                    ("user_id", format!("eq.{}", recipient_id)),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(PromotionEvent::from).collect())
    }
}

#[async_trait]
impl PostDisplayLookup for HttpEventSource {
    async fn lookup_post_display_fields(
        &self,
        post_id: &PostId,
    ) -> DomainResult<Option<PostDisplayFields>> {
        let rows: Vec<PostRow> = self
            .get_rows(
                &self.config.posts_table,
                &[
                    ("id", format!("eq.{}", post_id)),
                    ("select", "caption,images".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(rows.into_iter().next().map(|row| PostDisplayFields {
            caption: row.caption.unwrap_or_default(),
            images: row.images,
        }))
    }
}
