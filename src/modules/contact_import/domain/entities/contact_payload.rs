use serde::{Deserialize, Serialize};

use super::contact_record::ContactRecord;

/// Body sent to the contact creation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

/// Response of a successful creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedContact {
    pub id: String,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl From<&ContactRecord> for ContactPayload {
    fn from(record: &ContactRecord) -> Self {
        Self {
            first_name: record.first_name.trim().to_string(),
            last_name: record.last_name.trim().to_string(),
            full_name: record.display_name(),
            position: non_empty(&record.position),
            department: non_empty(&record.department),
            email: non_empty(&record.email),
            phone: non_empty(&record.phone),
            mobile: non_empty(&record.mobile),
            contact_type: non_empty(&record.contact_type),
            note: non_empty(&record.note),
            customer_id: record.resolved_customer_id.clone(),
        }
    }
}
