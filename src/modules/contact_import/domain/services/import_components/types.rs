use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::modules::contact_import::domain::ContactRecord;
use crate::modules::customer::CustomerMappingResult;

/// Row reference of a validation error: a 1-based position within the
/// validated batch, or the whole input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowNumber {
    All,
    Row(usize),
}

impl fmt::Display for RowNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowNumber::All => f.write_str("ALL"),
            RowNumber::Row(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for RowNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RowNumber::All => serializer.serialize_str("ALL"),
            RowNumber::Row(n) => serializer.serialize_u64(*n as u64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub row_number: RowNumber,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(row_number: RowNumber, field: &str, message: &str) -> Self {
        Self {
            row_number,
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} [{}]: {}", self.row_number, self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Result of submitting one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub record: ContactRecord,
    pub success: bool,
    pub error: Option<String>,
    pub created_id: Option<String>,
}

impl UploadOutcome {
    pub fn succeeded(record: ContactRecord, created_id: String) -> Self {
        Self {
            record,
            success: true,
            error: None,
            created_id: Some(created_id),
        }
    }

    pub fn failed(record: ContactRecord, error: String) -> Self {
        Self {
            record,
            success: false,
            error: Some(error),
            created_id: None,
        }
    }
}

/// Running totals reported after each completed batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadProgress {
    pub processed: usize,
    pub total: usize,
    pub success_count: usize,
    pub fail_count: usize,
}

/// Lifecycle of one import run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportPhase {
    Idle,
    Validating,
    Invalid,
    Resolving,
    Uploading,
    Completed,
    Cancelled,
    Failed,
}

/// Everything a progress consumer can observe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ProgressEvent {
    Phase(ImportPhase),
    Progress(UploadProgress),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success: bool,
    pub message: String,
    pub total_count: usize,
    pub success_count: usize,
    pub fail_count: usize,
    pub success_items: Vec<UploadOutcome>,
    pub failed_items: Vec<UploadOutcome>,
    pub customer_mapping: CustomerMappingResult,
    pub processing_time_ms: u64,
    pub cancelled: bool,
    /// Records never scheduled because the run was cancelled or aborted
    pub not_submitted_count: usize,
}

impl UploadResult {
    pub fn from_outcomes(
        outcomes: Vec<UploadOutcome>,
        customer_mapping: CustomerMappingResult,
        processing_time_ms: u64,
        cancelled: bool,
        not_submitted_count: usize,
    ) -> Self {
        let total_count = outcomes.len();
        let (success_items, failed_items): (Vec<_>, Vec<_>) =
            outcomes.into_iter().partition(|outcome| outcome.success);
        let success_count = success_items.len();
        let fail_count = failed_items.len();

        let message = if cancelled {
            format!(
                "Import cancelled: {} created, {} failed, {} not submitted",
                success_count, fail_count, not_submitted_count
            )
        } else if fail_count == 0 {
            format!("{} contacts created", success_count)
        } else {
            format!("{} contacts created, {} failed", success_count, fail_count)
        };

        Self {
            success: fail_count == 0 && !cancelled && not_submitted_count == 0,
            message,
            total_count,
            success_count,
            fail_count,
            success_items,
            failed_items,
            customer_mapping,
            processing_time_ms,
            cancelled,
            not_submitted_count,
        }
    }
}
