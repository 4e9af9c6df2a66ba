use crate::domain::model::{SearchRequest, SearchResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Anything that can answer one explore search. The SearchAPI client is the
/// production implementation; tests plug in canned responses.
#[async_trait]
pub trait DestinationSource: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;
}
