//! Rate limited JSON client shared by the customer lookup and contact
//! creation adapters.
//!
//! Requests are paced through a `governor` quota and are sent exactly once:
//! failed calls surface to the caller instead of being retried.

use crate::log_warn;
use crate::shared::config::ImportConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

type DirectRateLimiter = GovernorRateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

const USER_AGENT: &str = "contact-import/0.1";
const MAX_ERROR_BODY: usize = 200;

pub struct RateLimitClient {
    client: Client,
    rate_limiter: DirectRateLimiter,
    api_name: String,
}

impl RateLimitClient {
    pub fn new(api_name: &str, config: &ImportConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rate_limiter: Self::create_rate_limiter(config.requests_per_second, config.burst_size),
            api_name: api_name.to_string(),
        })
    }

    /// Create a rate limiter with specified requests per second and burst capacity
    fn create_rate_limiter(requests_per_second: f64, burst_size: u32) -> DirectRateLimiter {
        let period = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::from_secs(1)
        };

        let burst = NonZeroU32::new(burst_size.max(1)).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst);

        GovernorRateLimiter::direct(quota)
    }

    pub async fn get<T>(&self, url: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.send::<T, ()>(Method::GET, url, None).await
    }

    pub async fn post_json<T, B>(&self, url: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, url, Some(body)).await
    }

    async fn send<T, B>(&self, method: Method, url: &str, body: Option<&B>) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.rate_limiter.until_ready().await;

        let started = Instant::now();
        let mut request = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json");
        if let Some(json_body) = body {
            request = request.json(json_body);
        }

        let response = request.send().await.map_err(|e| {
            log_warn!("{} {} {} failed: {}", self.api_name, method, url, e);
            AppError::from(e)
        })?;

        let status = response.status();
        LogContext::api_call(
            &self.api_name,
            url,
            status.as_str(),
            Some(started.elapsed().as_millis() as u64),
        );

        if !status.is_success() {
            return Err(self.error_for_status(status, response).await);
        }

        self.parse_response(response).await
    }

    async fn error_for_status(&self, status: StatusCode, response: Response) -> AppError {
        let body = response.text().await.unwrap_or_default();
        let detail = truncate(body.trim());
        let message = if detail.is_empty() {
            format!("{} API returned {}", self.api_name, status)
        } else {
            format!("{} API returned {}: {}", self.api_name, status, detail)
        };

        match status.as_u16() {
            429 => AppError::RateLimitError(message),
            401 | 403 => AppError::Unauthorized(message),
            404 => AppError::NotFound(message),
            502..=504 => AppError::ServiceUnavailable(message),
            400..=499 => AppError::ValidationError(message),
            _ => AppError::ApiError(message),
        }
    }

    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!("Failed to read {} response: {}", self.api_name, e))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.api_name,
                e,
                truncate(&response_text)
            ))
        })
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    pub fn api_name(&self) -> &str {
        &self.api_name
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_ERROR_BODY {
        let head: String = text.chars().take(MAX_ERROR_BODY).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
