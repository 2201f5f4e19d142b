pub mod resolution_cache;

pub use resolution_cache::{CacheLookup, CacheStats, ResolutionCache};
