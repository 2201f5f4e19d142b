use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a resolution answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    Cache,
    Api,
    /// No company name was supplied; nothing was looked up
    None,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResolutionSource::Cache => "cache",
            ResolutionSource::Api => "api",
            ResolutionSource::None => "none",
        };
        f.write_str(label)
    }
}

/// Answer of a single company name resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub customer_id: Option<String>,
    pub source: ResolutionSource,
}

impl Resolution {
    pub fn no_company() -> Self {
        Self {
            customer_id: None,
            source: ResolutionSource::None,
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.customer_id.is_some()
    }
}

/// Cache key for a company name: trimmed and lower-cased.
/// Returns `None` for blank input.
pub fn normalize_company_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut key = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        key.extend(ch.to_lowercase());
    }
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(
            normalize_company_name("  ACME Corp "),
            Some("acme corp".to_string())
        );
        assert_eq!(normalize_company_name("삼성전자"), Some("삼성전자".to_string()));
    }

    #[test]
    fn test_normalize_blank_is_none() {
        assert_eq!(normalize_company_name(""), None);
        assert_eq!(normalize_company_name(" \t "), None);
    }

    #[test]
    fn test_source_serializes_lowercase() {
        let json = serde_json::to_string(&ResolutionSource::Cache).unwrap();
        assert_eq!(json, "\"cache\"");
        assert_eq!(ResolutionSource::None.to_string(), "none");
    }
}
