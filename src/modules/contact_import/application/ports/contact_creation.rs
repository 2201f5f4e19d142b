use async_trait::async_trait;

use crate::modules::contact_import::domain::{ContactPayload, CreatedContact};
use crate::shared::errors::AppResult;

/// Port (interface) for the contact creation endpoint
///
/// An `AppError::ServiceUnavailable` return means the endpoint is down as a
/// whole; any other error is a rejection of this payload only.
#[async_trait]
pub trait ContactCreationApi: Send + Sync {
    async fn create_contact(&self, payload: &ContactPayload) -> AppResult<CreatedContact>;
}
