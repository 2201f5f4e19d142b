pub mod contact_import;
pub mod customer;
