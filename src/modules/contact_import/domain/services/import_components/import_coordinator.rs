use crate::modules::contact_import::domain::{ContactRecord, ImportError};
use crate::modules::customer::{CustomerMappingResult, CustomerResolver};
use crate::shared::utils::logger::TimedOperation;
use crate::{log_info, log_warn};

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::batch_submitter::{BatchSubmitter, SubmissionAborted, SubmissionReport};
use super::progress_tracker::ProgressTracker;
use super::row_validator::RowValidator;
use super::types::{ImportPhase, UploadResult, ValidationReport};

/// Runs one import: validate, resolve customers, submit, aggregate
#[derive(Clone)]
pub struct ImportCoordinator {
    row_validator: RowValidator,
    customer_resolver: CustomerResolver,
    batch_submitter: BatchSubmitter,
    progress_tracker: ProgressTracker,
}

impl ImportCoordinator {
    pub fn new(
        customer_resolver: CustomerResolver,
        batch_submitter: BatchSubmitter,
        progress_tracker: ProgressTracker,
    ) -> Self {
        Self {
            row_validator: RowValidator::new(),
            customer_resolver,
            batch_submitter,
            progress_tracker,
        }
    }

    pub fn validate(&self, records: &[ContactRecord]) -> ValidationReport {
        self.row_validator.validate(records)
    }

    /// Run the whole pipeline over `records`.
    ///
    /// Invalid input returns every validation error before any network call.
    /// Unresolved companies and rejected records end up in the result; only
    /// an unreachable creation endpoint fails the run, carrying the partial
    /// result.
    pub async fn import_contacts(
        &self,
        records: Vec<ContactRecord>,
        cancel: &CancellationToken,
    ) -> Result<UploadResult, ImportError> {
        let run_id = Uuid::new_v4();
        let timer = TimedOperation::new("import_contacts");
        let total_count = records.len();

        log_info!("Import {}: starting for {} contacts", run_id, total_count);

        self.progress_tracker.emit_phase(ImportPhase::Validating);
        let validation = self.validate(&records);
        if !validation.valid {
            log_warn!(
                "Import {}: validation failed with {} errors",
                run_id,
                validation.errors.len()
            );
            self.finish(ImportPhase::Invalid);
            return Err(ImportError::Validation {
                errors: validation.errors,
            });
        }

        self.progress_tracker.emit_phase(ImportPhase::Resolving);
        let mapped = self
            .customer_resolver
            .map_customers_to_contacts(records)
            .await;
        let customer_mapping = mapped.customer_mapping;

        self.progress_tracker.emit_phase(ImportPhase::Uploading);
        let submission = self
            .batch_submitter
            .run(mapped.records, &self.progress_tracker, cancel)
            .await;

        match submission {
            Ok(report) => {
                let phase = if report.cancelled {
                    ImportPhase::Cancelled
                } else {
                    ImportPhase::Completed
                };
                let result = Self::assemble(report, customer_mapping);

                log_info!(
                    "Import {}: {} ({} customers mapped, {} unmapped, {} without company)",
                    run_id,
                    result.message,
                    result.customer_mapping.mapped_customers,
                    result.customer_mapping.unmapped_customers,
                    result.customer_mapping.contacts_without_company
                );
                timer.finish();
                self.finish(phase);
                Ok(result)
            }
            Err(SubmissionAborted { reason, report }) => {
                let partial = Self::assemble(report, customer_mapping);
                log_warn!(
                    "Import {}: aborted after {} of {} contacts: {}",
                    run_id,
                    partial.total_count,
                    total_count,
                    reason
                );
                timer.finish();
                self.finish(ImportPhase::Failed);
                Err(ImportError::Aborted {
                    reason,
                    partial: Box::new(partial),
                })
            }
        }
    }

    fn assemble(
        report: SubmissionReport,
        customer_mapping: CustomerMappingResult,
    ) -> UploadResult {
        UploadResult::from_outcomes(
            report.outcomes,
            customer_mapping,
            report.processing_time_ms,
            report.cancelled,
            report.not_submitted,
        )
    }

    fn finish(&self, phase: ImportPhase) {
        self.progress_tracker.emit_phase(phase);
        self.progress_tracker.emit_phase(ImportPhase::Idle);
    }
}
