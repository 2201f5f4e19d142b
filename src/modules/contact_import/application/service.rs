use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::modules::contact_import::domain::{
    BatchSubmitter, ContactRecord, ImportCoordinator, ImportError, ProgressTracker, UploadResult,
    ValidationReport,
};
use crate::modules::contact_import::infrastructure::{CsvSpreadsheetDecoder, HttpContactCreationApi};
use crate::modules::customer::{
    CustomerLookupApi, CustomerResolver, HttpCustomerLookupApi, ResolutionCache,
};
use crate::shared::config::ImportConfig;
use crate::shared::errors::AppResult;
use crate::log_info;

use super::ports::{ContactCreationApi, ProgressSink, SpreadsheetDecoder};

/// Entry point for contact imports.
///
/// Holds the long-lived collaborators; every call builds its own coordinator
/// so concurrent imports never share progress state. The resolution cache
/// lives inside the resolver and is shared by all imports of this service.
#[derive(Clone)]
pub struct ContactImportService {
    decoder: Arc<dyn SpreadsheetDecoder>,
    customer_resolver: CustomerResolver,
    batch_submitter: BatchSubmitter,
}

impl ContactImportService {
    pub fn new(
        decoder: Arc<dyn SpreadsheetDecoder>,
        customer_resolver: CustomerResolver,
        batch_submitter: BatchSubmitter,
    ) -> Self {
        Self {
            decoder,
            customer_resolver,
            batch_submitter,
        }
    }

    /// Wire the CSV decoder and both REST adapters from `config`
    pub fn from_config(config: &ImportConfig, cache: ResolutionCache) -> AppResult<Self> {
        let lookup_api: Arc<dyn CustomerLookupApi> = Arc::new(HttpCustomerLookupApi::new(config)?);
        let creation_api: Arc<dyn ContactCreationApi> = Arc::new(HttpContactCreationApi::new(config)?);

        let customer_resolver = CustomerResolver::new(cache, lookup_api)
            .with_lookup_concurrency(config.lookup_concurrency);
        let batch_submitter = BatchSubmitter::new(creation_api)
            .with_batch_size(config.batch_size)
            .with_max_concurrent_batches(config.max_concurrent_batches);

        log_info!(
            "Contact import service ready for {} (batch size {}, {} concurrent batches)",
            config.api_base_url,
            config.batch_size,
            config.max_concurrent_batches
        );

        Ok(Self::new(
            Arc::new(CsvSpreadsheetDecoder::new()),
            customer_resolver,
            batch_submitter,
        ))
    }

    pub fn cache(&self) -> &ResolutionCache {
        self.customer_resolver.cache()
    }

    /// Decode an uploaded sheet and import every row in it
    pub async fn import_file(
        &self,
        bytes: &[u8],
        sink: Option<Arc<dyn ProgressSink>>,
        cancel: Option<CancellationToken>,
    ) -> Result<UploadResult, ImportError> {
        let rows = self.decoder.decode(bytes).await.map_err(ImportError::Decode)?;
        let records: Vec<ContactRecord> = rows.iter().map(ContactRecord::from_raw_row).collect();

        log_info!("Decoded {} contact rows from {} bytes", records.len(), bytes.len());
        self.import_records(records, sink, cancel).await
    }

    /// Import records that were already parsed
    pub async fn import_records(
        &self,
        records: Vec<ContactRecord>,
        sink: Option<Arc<dyn ProgressSink>>,
        cancel: Option<CancellationToken>,
    ) -> Result<UploadResult, ImportError> {
        let cancel = cancel.unwrap_or_default();
        self.coordinator(sink).import_contacts(records, &cancel).await
    }

    /// Check records without resolving or sending anything
    pub fn validate_records(&self, records: &[ContactRecord]) -> ValidationReport {
        self.coordinator(None).validate(records)
    }

    fn coordinator(&self, sink: Option<Arc<dyn ProgressSink>>) -> ImportCoordinator {
        ImportCoordinator::new(
            self.customer_resolver.clone(),
            self.batch_submitter.clone(),
            ProgressTracker::new(sink),
        )
    }
}
