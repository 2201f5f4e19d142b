pub mod adapters;
pub mod cache;

pub use adapters::HttpCustomerLookupApi;
pub use cache::{CacheLookup, CacheStats, ResolutionCache};
