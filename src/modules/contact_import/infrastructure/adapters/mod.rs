pub mod contact_creation_adapter;

pub use contact_creation_adapter::HttpContactCreationApi;
