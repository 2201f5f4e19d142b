pub mod customer_resolver;

pub use customer_resolver::{
    CustomerMappingDetail, CustomerMappingResult, CustomerResolver, MappedContacts,
};
