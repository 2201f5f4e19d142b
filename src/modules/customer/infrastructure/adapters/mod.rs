pub mod customer_lookup_adapter;

pub use customer_lookup_adapter::HttpCustomerLookupApi;
