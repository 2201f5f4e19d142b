use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One customer returned by the lookup API for a name search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCandidate {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl CustomerCandidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A positive resolution remembered by the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub normalized_name: String,
    pub customer_id: String,
    pub resolved_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(normalized_name: String, customer_id: String) -> Self {
        Self {
            normalized_name,
            customer_id,
            resolved_at: Utc::now(),
        }
    }
}
