use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::log_warn;

const DEFAULT_BATCH_SIZE: usize = 10;
const DEFAULT_MAX_CONCURRENT_BATCHES: usize = 1;
const DEFAULT_LOOKUP_CONCURRENCY: usize = 4;
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_REQUESTS_PER_SECOND: f64 = 5.0;
const DEFAULT_BURST_SIZE: u32 = 5;

/// Runtime settings for one import pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Records per creation batch
    pub batch_size: usize,
    /// Batches allowed in flight at once; 1 keeps submission strictly sequential
    pub max_concurrent_batches: usize,
    /// Distinct company names resolved in parallel
    pub lookup_concurrency: usize,
    pub api_base_url: String,
    pub request_timeout_seconds: u64,
    pub requests_per_second: f64,
    pub burst_size: u32,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrent_batches: DEFAULT_MAX_CONCURRENT_BATCHES,
            lookup_concurrency: DEFAULT_LOOKUP_CONCURRENCY,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            burst_size: DEFAULT_BURST_SIZE,
        }
    }
}

impl ImportConfig {
    /// Build from `CONTACT_IMPORT_*` environment variables, loading `.env` first.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            batch_size: positive_var("CONTACT_IMPORT_BATCH_SIZE", defaults.batch_size),
            max_concurrent_batches: positive_var(
                "CONTACT_IMPORT_MAX_CONCURRENT_BATCHES",
                defaults.max_concurrent_batches,
            ),
            lookup_concurrency: positive_var(
                "CONTACT_IMPORT_LOOKUP_CONCURRENCY",
                defaults.lookup_concurrency,
            ),
            api_base_url: std::env::var("CONTACT_IMPORT_API_BASE_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_base_url),
            request_timeout_seconds: positive_var(
                "CONTACT_IMPORT_TIMEOUT_SECONDS",
                defaults.request_timeout_seconds,
            ),
            requests_per_second: std::env::var("CONTACT_IMPORT_REQUESTS_PER_SECOND")
                .ok()
                .and_then(|raw| raw.trim().parse::<f64>().ok())
                .filter(|rps| *rps > 0.0)
                .unwrap_or(defaults.requests_per_second),
            burst_size: positive_var("CONTACT_IMPORT_BURST_SIZE", defaults.burst_size),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_max_concurrent_batches(mut self, limit: usize) -> Self {
        self.max_concurrent_batches = limit.max(1);
        self
    }

    pub fn with_lookup_concurrency(mut self, limit: usize) -> Self {
        self.lookup_concurrency = limit.max(1);
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

fn positive_var<T>(key: &str, default: T) -> T
where
    T: FromStr + PartialOrd + Default + Copy,
{
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) if value > T::default() => value,
            _ => {
                log_warn!("Ignoring invalid {}='{}', using default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}
