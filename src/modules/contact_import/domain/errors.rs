use thiserror::Error;

use crate::shared::errors::AppError;

use super::services::import_components::types::{UploadResult, ValidationError};

/// Ways an import run can end without a result
#[derive(Debug, Error)]
pub enum ImportError {
    /// Nothing was sent; every problem found is listed
    #[error("Validation failed with {} error(s)", .errors.len())]
    Validation { errors: Vec<ValidationError> },

    /// The creation endpoint went away mid-run
    #[error("Import aborted: {reason}")]
    Aborted {
        reason: String,
        partial: Box<UploadResult>,
    },

    #[error("Failed to decode spreadsheet: {0}")]
    Decode(#[source] AppError),
}

impl ImportError {
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ImportError::Validation { errors } => errors,
            _ => &[],
        }
    }

    /// Outcomes that were recorded before the run failed
    pub fn partial_result(&self) -> Option<&UploadResult> {
        match self {
            ImportError::Aborted { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
