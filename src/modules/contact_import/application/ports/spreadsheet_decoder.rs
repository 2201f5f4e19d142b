use async_trait::async_trait;

use crate::modules::contact_import::domain::RawRow;
use crate::shared::errors::AppResult;

/// Port (interface) turning an uploaded file into header-keyed rows
#[async_trait]
pub trait SpreadsheetDecoder: Send + Sync {
    async fn decode(&self, bytes: &[u8]) -> AppResult<Vec<RawRow>>;
}
