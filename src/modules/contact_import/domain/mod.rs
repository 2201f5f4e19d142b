pub mod entities;
pub mod errors;
pub mod services;

// Re-exports for easy access
pub use entities::{
    columns, split_full_name, ContactPayload, ContactRecord, CreatedContact,
    RawRow, FIRST_DATA_LINE,
};
pub use errors::ImportError;
pub use services::import_components::{
    BatchSubmitter, ImportCoordinator, ImportPhase, ProgressEvent, ProgressTracker, RowNumber,
    RowValidator, UploadOutcome, UploadProgress, UploadResult, ValidationError, ValidationReport,
};
