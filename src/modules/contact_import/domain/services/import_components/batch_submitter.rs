use crate::modules::contact_import::application::ports::ContactCreationApi;
use crate::modules::contact_import::domain::{ContactPayload, ContactRecord};
use crate::shared::errors::AppError;
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::{log_debug, log_error, log_info, log_warn};

use futures::future::{self, join_all};
use futures::{stream, StreamExt};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use super::progress_tracker::{ProgressCounts, ProgressTracker};
use super::types::UploadOutcome;

pub const DEFAULT_BATCH_SIZE: usize = 10;

/// What a submission run produced, in input order
#[derive(Debug, Clone)]
pub struct SubmissionReport {
    pub outcomes: Vec<UploadOutcome>,
    pub processing_time_ms: u64,
    pub cancelled: bool,
    pub not_submitted: usize,
}

/// The creation endpoint became unreachable; remaining batches were dropped
#[derive(Debug, Clone)]
pub struct SubmissionAborted {
    pub reason: String,
    pub report: SubmissionReport,
}

/// Span from the first creation call starting to the last one settling
#[derive(Default)]
struct CallWindow {
    span: Mutex<Option<(Instant, Instant)>>,
}

impl CallWindow {
    fn call_started(&self) {
        let now = Instant::now();
        self.span
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get_or_insert((now, now));
    }

    fn call_settled(&self) {
        let now = Instant::now();
        if let Some((_, last)) = self
            .span
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_mut()
        {
            *last = (*last).max(now);
        }
    }

    fn elapsed(&self) -> Duration {
        let span = *self
            .span
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        span.map(|(first, last)| last.duration_since(first))
            .unwrap_or_default()
    }
}

/// Submits records to the creation API in fixed-size batches
#[derive(Clone)]
pub struct BatchSubmitter {
    creation_api: Arc<dyn ContactCreationApi>,
    batch_size: usize,
    max_concurrent_batches: usize,
}

impl BatchSubmitter {
    pub fn new(creation_api: Arc<dyn ContactCreationApi>) -> Self {
        Self {
            creation_api,
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrent_batches: 1,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Batches allowed in flight at once. 1 keeps them strictly in order.
    pub fn with_max_concurrent_batches(mut self, limit: usize) -> Self {
        self.max_concurrent_batches = limit.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Submit all `records`, reporting totals to `tracker` after each batch.
    ///
    /// A rejected record is recorded and never stops its siblings. Raising
    /// `cancel` stops new batches from being scheduled; batches already
    /// running finish. An unreachable endpoint does the same and turns the
    /// run into `SubmissionAborted`.
    pub async fn run(
        &self,
        records: Vec<ContactRecord>,
        tracker: &ProgressTracker,
        cancel: &CancellationToken,
    ) -> Result<SubmissionReport, SubmissionAborted> {
        let timer = TimedOperation::new("submit_contacts");
        let total = records.len();
        let batches = self.partition(records);
        let batch_count = batches.len();

        log_info!(
            "Submitting {} contacts in {} batches of up to {} ({} concurrent)",
            total,
            batch_count,
            self.batch_size,
            self.max_concurrent_batches
        );

        let counts = ProgressCounts::new(total);
        let halt = cancel.child_token();
        let abort_reason: Mutex<Option<String>> = Mutex::new(None);
        let window = CallWindow::default();

        let (counts, halt, abort_reason, window) = (&counts, &halt, &abort_reason, &window);
        let mut finished: Vec<(usize, Vec<UploadOutcome>)> = stream::iter(batches.into_iter().enumerate())
            .take_while(|_| future::ready(!halt.is_cancelled()))
            .map(|(index, batch)| async move {
                let (outcomes, unreachable) = self.submit_batch(index, batch_count, batch, window).await;

                if let Some(reason) = unreachable {
                    log_error!(
                        "Creation API unreachable during batch {}/{}: {}",
                        index + 1,
                        batch_count,
                        reason
                    );
                    abort_reason
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .get_or_insert(reason);
                    halt.cancel();
                }

                tracker.record_batch(counts, &outcomes);
                (index, outcomes)
            })
            .buffer_unordered(self.max_concurrent_batches)
            .collect()
            .await;

        let processing_time_ms = window.elapsed().as_millis() as u64;
        finished.sort_by_key(|(index, _)| *index);
        let outcomes: Vec<UploadOutcome> = finished
            .into_iter()
            .flat_map(|(_, outcomes)| outcomes)
            .collect();

        let not_submitted = total - outcomes.len();
        let abort_reason = abort_reason
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        let cancelled = abort_reason.is_none() && not_submitted > 0 && cancel.is_cancelled();

        timer.finish_with_info(&format!(
            "{} submitted, {} not submitted",
            outcomes.len(),
            not_submitted
        ));

        let report = SubmissionReport {
            outcomes,
            processing_time_ms,
            cancelled,
            not_submitted,
        };

        match abort_reason {
            Some(reason) => Err(SubmissionAborted { reason, report }),
            None => {
                if cancelled {
                    log_warn!("Submission cancelled with {} contacts not submitted", not_submitted);
                }
                Ok(report)
            }
        }
    }

    fn partition(&self, records: Vec<ContactRecord>) -> Vec<Vec<ContactRecord>> {
        let mut batches = Vec::with_capacity(records.len().div_ceil(self.batch_size));
        let mut remaining = records.into_iter().peekable();
        while remaining.peek().is_some() {
            batches.push(remaining.by_ref().take(self.batch_size).collect());
        }
        batches
    }

    /// Submit every record of one batch. Returns the outcomes in batch order
    /// and, if the endpoint was unreachable, the reason.
    async fn submit_batch(
        &self,
        index: usize,
        batch_count: usize,
        batch: Vec<ContactRecord>,
        window: &CallWindow,
    ) -> (Vec<UploadOutcome>, Option<String>) {
        log_debug!(
            "Batch {}/{}: submitting {} contacts",
            index + 1,
            batch_count,
            batch.len()
        );

        let results = join_all(batch.into_iter().map(|record| self.submit_single(record, window))).await;

        let mut unreachable = None;
        let outcomes = results
            .into_iter()
            .map(|(outcome, error)| {
                if let Some(error) = error.filter(AppError::is_unreachable) {
                    unreachable.get_or_insert(error.to_string());
                }
                outcome
            })
            .collect();

        (outcomes, unreachable)
    }

    async fn submit_single(
        &self,
        record: ContactRecord,
        window: &CallWindow,
    ) -> (UploadOutcome, Option<AppError>) {
        let payload = ContactPayload::from(&record);

        window.call_started();
        let result = self.creation_api.create_contact(&payload).await;
        window.call_settled();

        match result {
            Ok(created) => {
                log_debug!(
                    "Created contact '{}' (row {}) with id {}",
                    record.display_name(),
                    record.source_row_index,
                    created.id
                );
                (UploadOutcome::succeeded(record, created.id), None)
            }
            Err(e) => {
                LogContext::error_with_context(
                    &e,
                    &format!(
                        "Failed to create contact '{}' (row {})",
                        record.display_name(),
                        record.source_row_index
                    ),
                );
                (UploadOutcome::failed(record, e.to_string()), Some(e))
            }
        }
    }
}
