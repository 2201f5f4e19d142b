pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::ports::{
    progress_channel, ChannelProgressSink, ContactCreationApi, ProgressSink, SpreadsheetDecoder,
};
pub use application::ContactImportService;
pub use domain::{
    BatchSubmitter, ContactPayload, ContactRecord, CreatedContact, ImportCoordinator, ImportError,
    ImportPhase, ProgressEvent, ProgressTracker, RawRow, RowNumber, RowValidator, UploadOutcome,
    UploadProgress, UploadResult, ValidationError, ValidationReport,
};
pub use infrastructure::{CsvSpreadsheetDecoder, HttpContactCreationApi};
