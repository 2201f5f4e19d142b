pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::{CacheEntry, CustomerCandidate};
pub use services::{
    CustomerMappingDetail, CustomerMappingResult, CustomerResolver, MappedContacts,
};
pub use value_objects::{normalize_company_name, Resolution, ResolutionSource};
