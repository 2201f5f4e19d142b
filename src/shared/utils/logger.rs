use log::{debug, error, info};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system
/// This should be called once at application startup
pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info) // Default level
            .filter_module("contact_import", log::LevelFilter::Debug)
            .filter_module("reqwest", log::LevelFilter::Warn) // Reduce HTTP noise
            .filter_module("hyper", log::LevelFilter::Warn)
            .filter_module("tokio", log::LevelFilter::Warn)
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .try_init();

        info!("Logging system initialized");
    });
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log API calls
    pub fn api_call(api: &str, endpoint: &str, status: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!("API: {} {} {} in {}ms", api, endpoint, status, duration),
            None => debug!("API: Starting {} {}", api, endpoint),
        }
    }

    /// Log batch progress of an upload run
    pub fn import_progress(processed: usize, total: usize, success: usize, failed: usize) {
        info!(
            "Import: [{}/{}] processed ({} ok, {} failed)",
            processed, total, success, failed
        );
    }

    /// Log customer lookups
    pub fn lookup_operation(name: &str, source: &str, customer_id: Option<&str>) {
        match customer_id {
            Some(id) => debug!("Lookup: '{}' resolved via {} to {}", name, source, id),
            None => debug!("Lookup: '{}' unresolved via {}", name, source),
        }
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, duration_ms: u64, additional_info: Option<&str>) {
        match additional_info {
            Some(info) => info!(
                "Performance: {} took {}ms ({})",
                operation, duration_ms, info
            ),
            None => info!("Performance: {} took {}ms", operation, duration_ms),
        }
    }
}

/// Helper for timing operations
pub struct TimedOperation {
    start: std::time::Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: std::time::Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn finish(self) -> u64 {
        let duration = self.elapsed_ms();
        LogContext::performance_metric(&self.operation, duration, None);
        duration
    }

    pub fn finish_with_info(self, info: &str) -> u64 {
        let duration = self.elapsed_ms();
        LogContext::performance_metric(&self.operation, duration, Some(info));
        duration
    }
}
