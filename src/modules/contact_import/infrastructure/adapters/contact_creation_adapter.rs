use async_trait::async_trait;

use crate::log_debug;
use crate::modules::contact_import::application::ports::ContactCreationApi;
use crate::modules::contact_import::domain::{ContactPayload, CreatedContact};
use crate::shared::config::ImportConfig;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::http_client::RateLimitClient;

/// Contact creation over REST: `POST {base}/contacts`
pub struct HttpContactCreationApi {
    http_client: RateLimitClient,
    base_url: String,
}

impl HttpContactCreationApi {
    pub fn new(config: &ImportConfig) -> AppResult<Self> {
        Ok(Self::with_client(
            RateLimitClient::new("Contacts", config)?,
            &config.api_base_url,
        ))
    }

    pub fn with_client(http_client: RateLimitClient, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn contacts_url(&self) -> String {
        format!("{}/contacts", self.base_url)
    }
}

#[async_trait]
impl ContactCreationApi for HttpContactCreationApi {
    async fn create_contact(&self, payload: &ContactPayload) -> AppResult<CreatedContact> {
        let url = self.contacts_url();
        let created: CreatedContact = self.http_client.post_json(&url, payload).await?;

        log_debug!(
            "Contacts: Created '{} {}' as {}",
            payload.last_name,
            payload.first_name,
            created.id
        );
        Ok(created)
    }
}
