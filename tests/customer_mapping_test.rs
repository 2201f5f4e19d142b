/// Company name resolution over a batch of contacts
mod utils;

use async_trait::async_trait;
use contact_import::modules::customer::{
    CustomerCandidate, CustomerLookupApi, CustomerResolver, ResolutionCache, ResolutionSource,
};
use contact_import::shared::{AppError, AppResult};
use mockall::mock;
use std::sync::Arc;
use utils::factories::ContactFactory;
use utils::fakes::FakeCustomerDirectory;

mock! {
    pub Lookup {}

    #[async_trait]
    impl CustomerLookupApi for Lookup {
        async fn search_customers(&self, name: &str) -> AppResult<Vec<CustomerCandidate>>;
    }
}

fn resolver_with(mock: MockLookup) -> CustomerResolver {
    CustomerResolver::new(ResolutionCache::new(), Arc::new(mock))
}

#[tokio::test]
async fn distinguishes_missing_company_from_unmapped_company() {
    let mut lookup = MockLookup::new();
    lookup
        .expect_search_customers()
        .withf(|name: &str| name == "Acme")
        .times(1)
        .returning(|_| Ok(vec![CustomerCandidate::new("C-1", "Acme")]));
    lookup
        .expect_search_customers()
        .withf(|name: &str| name == "Unknown Co")
        .times(1)
        .returning(|_| Ok(vec![]));

    let records = vec![
        ContactFactory::new("Kim", "A").company("Acme").build(),
        ContactFactory::new("Lee", "B").company(" acme ").build(),
        ContactFactory::new("Park", "C").build(),
        ContactFactory::new("Choi", "D").company("Unknown Co").build(),
    ];

    let mapped = resolver_with(lookup).map_customers_to_contacts(records).await;
    let mapping = &mapped.customer_mapping;

    assert_eq!(mapping.total_customers, 2);
    assert_eq!(mapping.mapped_customers, 1);
    assert_eq!(mapping.unmapped_customers, 1);
    assert_eq!(mapping.contacts_without_company, 1);

    assert_eq!(mapping.mapping_details[0].company_name, "Acme");
    assert!(mapping.mapping_details[0].mapped);
    assert_eq!(mapping.mapping_details[1].company_name, "Unknown Co");
    assert_eq!(mapping.mapping_details[1].source, ResolutionSource::Api);
    assert!(!mapping.mapping_details[1].mapped);

    let ids: Vec<Option<&str>> = mapped
        .records
        .iter()
        .map(|r| r.resolved_customer_id.as_deref())
        .collect();
    assert_eq!(ids, vec![Some("C-1"), Some("C-1"), None, None]);
}

#[tokio::test]
async fn counts_reconcile_with_the_batch() {
    let directory = Arc::new(
        FakeCustomerDirectory::new()
            .with_customer("Acme", "C-1")
            .with_customer("Globex", "C-2"),
    );
    let resolver = CustomerResolver::new(ResolutionCache::new(), directory.clone());

    let companies = ["Acme", "Globex", "", "Initech", "ACME", "globex", "", "Hooli"];
    let records = companies
        .iter()
        .enumerate()
        .map(|(i, company)| {
            ContactFactory::new("Kim", &format!("N{}", i))
                .company(company)
                .build()
        })
        .collect::<Vec<_>>();

    let mapped = resolver.map_customers_to_contacts(records).await;
    let mapping = &mapped.customer_mapping;

    assert_eq!(
        mapping.mapped_customers + mapping.unmapped_customers,
        mapping.total_customers
    );
    assert_eq!(mapping.total_customers, mapping.mapping_details.len());
    assert_eq!(mapping.total_customers, 4);
    assert_eq!(mapping.contacts_without_company, 2);
    assert_eq!(directory.call_count(), 4);

    let linked = mapped
        .records
        .iter()
        .filter(|r| r.resolved_customer_id.is_some())
        .count();
    assert_eq!(linked, 4);
}

#[tokio::test]
async fn ambiguous_and_failed_lookups_stay_unmapped() {
    let mut lookup = MockLookup::new();
    lookup
        .expect_search_customers()
        .withf(|name: &str| name == "Samsung")
        .returning(|_| {
            Ok(vec![
                CustomerCandidate::new("C-1", "Samsung"),
                CustomerCandidate::new("C-2", "Samsung"),
            ])
        });
    lookup
        .expect_search_customers()
        .withf(|name: &str| name == "Offline Inc")
        .returning(|_| Err(AppError::ServiceUnavailable("connection refused".to_string())));

    let resolver = resolver_with(lookup);

    let ambiguous = resolver.resolve("Samsung").await;
    let failed = resolver.resolve("Offline Inc").await;

    assert_eq!(ambiguous.customer_id, None);
    assert_eq!(ambiguous.source, ResolutionSource::Api);
    assert_eq!(failed.customer_id, None);
    assert!(resolver.cache().is_empty());
}

#[tokio::test]
async fn second_batch_is_answered_from_the_cache() {
    let mut lookup = MockLookup::new();
    lookup
        .expect_search_customers()
        .times(1)
        .returning(|_| Ok(vec![CustomerCandidate::new("C-1", "Acme")]));

    let resolver = resolver_with(lookup);
    let batch = || vec![ContactFactory::new("Kim", "A").company("Acme").build()];

    let first = resolver.map_customers_to_contacts(batch()).await;
    let second = resolver.map_customers_to_contacts(batch()).await;

    assert_eq!(
        first.customer_mapping.mapping_details[0].source,
        ResolutionSource::Api
    );
    assert_eq!(
        second.customer_mapping.mapping_details[0].source,
        ResolutionSource::Cache
    );
    assert_eq!(
        second.records[0].resolved_customer_id.as_deref(),
        Some("C-1")
    );
}

#[tokio::test]
async fn blank_company_resolves_without_lookup() {
    let mut lookup = MockLookup::new();
    lookup.expect_search_customers().times(0);

    let resolution = resolver_with(lookup).resolve("  ").await;

    assert_eq!(resolution.source, ResolutionSource::None);
    assert!(!resolution.is_mapped());
}
