/// Shared infrastructure concerns
///
/// Implementations used by more than one module (the HTTP adapters of the
/// customer and contact APIs).
pub mod http_client;

pub use http_client::RateLimitClient;
