use crate::domain::{
    entities::{PostDisplayFields, PostId},
    error::DomainResult,
};
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostDisplayLookup: Send + Sync {
    async fn lookup_post_display_fields(
        &self,
        post_id: &PostId,
    ) -> DomainResult<Option<PostDisplayFields>>;
}

pub type DynPostDisplayLookup = Arc<dyn PostDisplayLookup>;
