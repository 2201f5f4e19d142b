//! Contact spreadsheet import: parse rows, validate them, resolve company
//! names to customer ids and submit the contacts in batches.

pub mod modules;
pub mod shared;

pub use modules::contact_import::{
    progress_channel, ContactImportService, ContactRecord, ImportError, ImportPhase,
    ProgressEvent, ProgressSink, UploadProgress, UploadResult, ValidationError,
};
pub use modules::customer::{CustomerMappingResult, ResolutionCache};
pub use shared::{AppError, AppResult, ImportConfig};
pub use shared::utils::init_logger;
