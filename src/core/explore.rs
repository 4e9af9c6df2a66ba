use crate::core::ranker::rank_by_price;
use crate::domain::model::{Destination, SearchRequest};
use crate::domain::ports::DestinationSource;
use crate::utils::error::Result;

/// Outcome of one search: how many destinations the provider returned and
/// the cheapest ones kept for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreReport {
    pub total: usize,
    pub ranked: Vec<Destination>,
}

impl ExploreReport {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

pub struct ExploreEngine<S: DestinationSource> {
    source: S,
}

impl<S: DestinationSource> ExploreEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch, rank, then keep the `limit` cheapest.
    pub async fn run(&self, request: &SearchRequest, limit: usize) -> Result<ExploreReport> {
        tracing::debug!("Searching destinations from {}", request.departure_id);
        let response = self.source.search(request).await?;

        if let Some(metadata) = &response.search_metadata {
            tracing::debug!(
                "Search id: {}, status: {}",
                metadata.id.as_deref().unwrap_or("-"),
                metadata.status.as_deref().unwrap_or("-")
            );
        }

        let destinations = response.into_destinations();
        let total = destinations.len();
        tracing::debug!("Provider returned {} destinations", total);

        if total == 0 {
            tracing::warn!("No destinations returned for {}", request.departure_id);
            return Ok(ExploreReport {
                total,
                ranked: Vec::new(),
            });
        }

        let mut ranked = rank_by_price(destinations);
        ranked.truncate(limit);
        tracing::debug!("Keeping {} of {} destinations", ranked.len(), total);

        Ok(ExploreReport { total, ranked })
    }
}
