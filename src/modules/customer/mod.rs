pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::ports::CustomerLookupApi;
pub use domain::{
    normalize_company_name, CacheEntry, CustomerCandidate, CustomerMappingDetail,
    CustomerMappingResult, CustomerResolver, MappedContacts, Resolution, ResolutionSource,
};
pub use infrastructure::{CacheStats, HttpCustomerLookupApi, ResolutionCache};
