use crate::modules::contact_import::application::ports::ProgressSink;
use crate::shared::utils::logger::LogContext;
use std::sync::{Arc, Mutex};

use super::types::{ImportPhase, UploadOutcome, UploadProgress};

/// Running totals of an upload run.
///
/// Batches may finish in any order; each one is folded in under the lock,
/// so the `processed` sequence handed to the sink never decreases.
pub struct ProgressCounts {
    state: Mutex<UploadProgress>,
}

impl ProgressCounts {
    pub fn new(total: usize) -> Self {
        Self {
            state: Mutex::new(UploadProgress {
                total,
                ..UploadProgress::default()
            }),
        }
    }
}

/// Manages progress reporting for import operations
#[derive(Clone, Default)]
pub struct ProgressTracker {
    sink: Option<Arc<dyn ProgressSink>>,
}

impl ProgressTracker {
    pub fn new(sink: Option<Arc<dyn ProgressSink>>) -> Self {
        Self { sink }
    }

    pub fn emit_phase(&self, phase: ImportPhase) -> bool {
        match self.sink {
            Some(ref sink) => {
                sink.on_phase(phase);
                true
            }
            None => false,
        }
    }

    pub fn emit_progress(&self, progress: &UploadProgress) -> bool {
        match self.sink {
            Some(ref sink) => {
                sink.on_progress(progress);
                true
            }
            None => false,
        }
    }

    /// Fold a finished batch into `counts` and report the new totals.
    /// The snapshot is emitted while the lock is held.
    pub fn record_batch(&self, counts: &ProgressCounts, outcomes: &[UploadOutcome]) -> UploadProgress {
        let mut state = counts
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let succeeded = outcomes.iter().filter(|outcome| outcome.success).count();
        state.processed += outcomes.len();
        state.success_count += succeeded;
        state.fail_count += outcomes.len() - succeeded;

        let snapshot = *state;
        LogContext::import_progress(
            snapshot.processed,
            snapshot.total,
            snapshot.success_count,
            snapshot.fail_count,
        );
        self.emit_progress(&snapshot);
        snapshot
    }
}
