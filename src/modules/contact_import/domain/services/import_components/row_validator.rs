use crate::log_debug;
use crate::modules::contact_import::domain::ContactRecord;
use crate::shared::utils::validation::Validator;

use super::types::{RowNumber, ValidationError, ValidationReport};

pub const MSG_NO_DATA: &str = "no data";
pub const MSG_LAST_NAME_REQUIRED: &str = "lastName is required";
pub const MSG_FIRST_NAME_REQUIRED: &str = "firstName is required";
pub const MSG_INVALID_EMAIL: &str = "invalid email format";
pub const MSG_INVALID_PHONE: &str = "phone may contain only digits, spaces and hyphens";
pub const MSG_INVALID_MOBILE: &str = "mobile may contain only digits, spaces and hyphens";

/// Stateless field checks run before any network call
#[derive(Debug, Clone, Copy, Default)]
pub struct RowValidator;

impl RowValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check every record and every rule; nothing short-circuits.
    /// Row numbers are 1-based positions in `records`.
    pub fn validate(&self, records: &[ContactRecord]) -> ValidationReport {
        if records.is_empty() {
            return ValidationReport::from_errors(vec![ValidationError::new(
                RowNumber::All,
                "rows",
                MSG_NO_DATA,
            )]);
        }

        let mut errors = Vec::new();
        for (index, record) in records.iter().enumerate() {
            self.validate_record(RowNumber::Row(index + 1), record, &mut errors);
        }

        log_debug!(
            "Validated {} records: {} errors",
            records.len(),
            errors.len()
        );
        ValidationReport::from_errors(errors)
    }

    fn validate_record(
        &self,
        row: RowNumber,
        record: &ContactRecord,
        errors: &mut Vec<ValidationError>,
    ) {
        if Validator::is_blank(&record.last_name) {
            errors.push(ValidationError::new(row, "lastName", MSG_LAST_NAME_REQUIRED));
        }
        if Validator::is_blank(&record.first_name) {
            errors.push(ValidationError::new(row, "firstName", MSG_FIRST_NAME_REQUIRED));
        }

        let email = record.email.trim();
        if !email.is_empty() && !Validator::is_valid_email(email) {
            errors.push(ValidationError::new(row, "email", MSG_INVALID_EMAIL));
        }

        let phone = record.phone.trim();
        if !phone.is_empty() && !Validator::is_valid_phone(phone) {
            errors.push(ValidationError::new(row, "phone", MSG_INVALID_PHONE));
        }

        let mobile = record.mobile.trim();
        if !mobile.is_empty() && !Validator::is_valid_phone(mobile) {
            errors.push(ValidationError::new(row, "mobile", MSG_INVALID_MOBILE));
        }
    }
}
