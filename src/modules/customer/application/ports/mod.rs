pub mod customer_lookup;

pub use customer_lookup::CustomerLookupApi;
