use crate::modules::contact_import::domain::ContactRecord;
use crate::modules::customer::application::ports::CustomerLookupApi;
use crate::modules::customer::domain::{normalize_company_name, Resolution, ResolutionSource};
use crate::modules::customer::infrastructure::cache::ResolutionCache;
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::{log_info, log_warn};

use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

const DEFAULT_LOOKUP_CONCURRENCY: usize = 4;

/// Outcome for one distinct company name of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMappingDetail {
    pub company_name: String,
    pub mapped: bool,
    pub customer_id: Option<String>,
    pub source: ResolutionSource,
}

/// Aggregate mapping statistics of a batch.
///
/// Customer counts are over distinct names; `contacts_without_company`
/// counts records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMappingResult {
    pub total_customers: usize,
    pub mapped_customers: usize,
    pub unmapped_customers: usize,
    pub contacts_without_company: usize,
    pub mapping_details: Vec<CustomerMappingDetail>,
}

/// Records with `resolved_customer_id` back-filled, plus the statistics
#[derive(Debug, Clone)]
pub struct MappedContacts {
    pub records: Vec<ContactRecord>,
    pub customer_mapping: CustomerMappingResult,
}

/// Resolves free-text company names to customer ids, cache first
#[derive(Clone)]
pub struct CustomerResolver {
    cache: ResolutionCache,
    lookup_api: Arc<dyn CustomerLookupApi>,
    lookup_concurrency: usize,
}

impl CustomerResolver {
    pub fn new(cache: ResolutionCache, lookup_api: Arc<dyn CustomerLookupApi>) -> Self {
        Self {
            cache,
            lookup_api,
            lookup_concurrency: DEFAULT_LOOKUP_CONCURRENCY,
        }
    }

    pub fn with_lookup_concurrency(mut self, limit: usize) -> Self {
        self.lookup_concurrency = limit.max(1);
        self
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Resolve one raw company name.
    ///
    /// Blank input yields `source: None` and is never looked up. Lookup
    /// failures and ambiguous answers degrade to an unmapped API result.
    pub async fn resolve(&self, company_name_raw: &str) -> Resolution {
        if normalize_company_name(company_name_raw).is_none() {
            return Resolution::no_company();
        }

        let lookup_api = Arc::clone(&self.lookup_api);
        let lookup = self
            .cache
            .get_or_resolve(company_name_raw, move |name| {
                Self::lookup_exact(lookup_api, name)
            })
            .await;

        LogContext::lookup_operation(
            company_name_raw.trim(),
            &lookup.source.to_string(),
            lookup.customer_id.as_deref(),
        );

        Resolution {
            customer_id: lookup.customer_id,
            source: lookup.source,
        }
    }

    async fn lookup_exact(lookup_api: Arc<dyn CustomerLookupApi>, name: String) -> Option<String> {
        match lookup_api.search_customers(&name).await {
            Ok(mut candidates) if candidates.len() == 1 => candidates.pop().map(|c| c.id),
            Ok(candidates) if candidates.is_empty() => {
                log_info!("No customer found for '{}'", name);
                None
            }
            Ok(candidates) => {
                log_warn!(
                    "Ambiguous customer name '{}': {} candidates, leaving unmapped",
                    name,
                    candidates.len()
                );
                None
            }
            Err(e) => {
                LogContext::error_with_context(&e, &format!("Customer lookup failed for '{}'", name));
                None
            }
        }
    }

    /// Resolve every distinct company name of `records` once and link the
    /// resulting ids back onto the records. Never fails.
    pub async fn map_customers_to_contacts(&self, mut records: Vec<ContactRecord>) -> MappedContacts {
        let timer = TimedOperation::new("map_customers_to_contacts");

        let mut seen = HashSet::new();
        let mut distinct = Vec::new();
        let mut contacts_without_company = 0;

        for record in &records {
            match normalize_company_name(&record.company_name_raw) {
                Some(key) => {
                    if seen.insert(key.clone()) {
                        distinct.push((key, record.company_name_raw.trim().to_string()));
                    }
                }
                None => contacts_without_company += 1,
            }
        }

        log_info!(
            "Resolving {} distinct companies for {} contacts ({} without company)",
            distinct.len(),
            records.len(),
            contacts_without_company
        );

        let resolved: Vec<(String, String, Resolution)> = stream::iter(distinct)
            .map(|(key, company_name)| async move {
                let resolution = self.resolve(&company_name).await;
                (key, company_name, resolution)
            })
            .buffered(self.lookup_concurrency)
            .collect()
            .await;

        let mut ids_by_key: HashMap<String, Option<String>> = HashMap::with_capacity(resolved.len());
        let mut mapping_details = Vec::with_capacity(resolved.len());

        for (key, company_name, resolution) in resolved {
            ids_by_key.insert(key, resolution.customer_id.clone());
            mapping_details.push(CustomerMappingDetail {
                company_name,
                mapped: resolution.is_mapped(),
                customer_id: resolution.customer_id,
                source: resolution.source,
            });
        }

        for record in &mut records {
            record.resolved_customer_id = normalize_company_name(&record.company_name_raw)
                .and_then(|key| ids_by_key.get(&key).cloned().flatten());
        }

        let mapped_customers = mapping_details.iter().filter(|d| d.mapped).count();
        let customer_mapping = CustomerMappingResult {
            total_customers: mapping_details.len(),
            mapped_customers,
            unmapped_customers: mapping_details.len() - mapped_customers,
            contacts_without_company,
            mapping_details,
        };

        timer.finish_with_info(&format!(
            "{} mapped, {} unmapped",
            customer_mapping.mapped_customers, customer_mapping.unmapped_customers
        ));

        MappedContacts {
            records,
            customer_mapping,
        }
    }
}
