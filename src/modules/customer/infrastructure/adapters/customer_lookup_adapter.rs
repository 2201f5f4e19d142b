use async_trait::async_trait;

use crate::log_debug;
use crate::modules::customer::application::ports::CustomerLookupApi;
use crate::modules::customer::domain::CustomerCandidate;
use crate::shared::config::ImportConfig;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::http_client::RateLimitClient;

/// Customer search over REST: `GET {base}/customers?name=..&match=exact`
pub struct HttpCustomerLookupApi {
    http_client: RateLimitClient,
    base_url: String,
}

impl HttpCustomerLookupApi {
    pub fn new(config: &ImportConfig) -> AppResult<Self> {
        Ok(Self::with_client(
            RateLimitClient::new("Customers", config)?,
            &config.api_base_url,
        ))
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn search_url(&self, name: &str) -> String {
        format!(
            "{}/customers?name={}&match=exact",
            self.base_url,
            urlencoding::encode(name)
        )
    }
}

#[async_trait]
impl CustomerLookupApi for HttpCustomerLookupApi {
    async fn search_customers(&self, name: &str) -> AppResult<Vec<CustomerCandidate>> {
        let url = self.search_url(name);
        log_debug!("Customers: Searching for '{}'", name);

        let candidates: Vec<CustomerCandidate> = self.http_client.get(&url).await?;

        log_debug!(
            "Customers: Found {} candidates for '{}'",
            candidates.len(),
            name
        );
        Ok(candidates)
    }
}
