use async_trait::async_trait;

use crate::modules::customer::domain::CustomerCandidate;
use crate::shared::errors::AppResult;

/// Port (interface) for the customer search endpoint
/// Implementations are expected to search by exact name; the resolver only
/// accepts a single returned candidate as a match.
#[async_trait]
pub trait CustomerLookupApi: Send + Sync {
    async fn search_customers(&self, name: &str) -> AppResult<Vec<CustomerCandidate>>;
}
