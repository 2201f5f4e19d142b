pub mod batch_submitter;
pub mod import_coordinator;
pub mod progress_tracker;
pub mod row_validator;
pub mod types;

// Re-export main types for public API
pub use batch_submitter::{BatchSubmitter, SubmissionAborted, SubmissionReport};
pub use import_coordinator::ImportCoordinator;
pub use progress_tracker::{ProgressCounts, ProgressTracker};
pub use row_validator::RowValidator;
pub use types::*;
