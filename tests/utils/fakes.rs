/// In-memory stand-ins for the remote APIs
use async_trait::async_trait;
use contact_import::modules::contact_import::{
    ContactCreationApi, ContactPayload, CreatedContact, ProgressEvent,
};
use contact_import::modules::customer::{CustomerCandidate, CustomerLookupApi};
use contact_import::shared::{AppError, AppResult};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Customer directory answering exact-name searches after a delay
pub struct FakeCustomerDirectory {
    customers: HashMap<String, Vec<CustomerCandidate>>,
    delay: Duration,
    calls: Mutex<Vec<String>>,
}

impl FakeCustomerDirectory {
    pub fn new() -> Self {
        Self {
            customers: HashMap::new(),
            delay: Duration::from_millis(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_customer(mut self, name: &str, id: &str) -> Self {
        self.customers
            .entry(name.to_lowercase())
            .or_default()
            .push(CustomerCandidate::new(id, name));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CustomerLookupApi for FakeCustomerDirectory {
    async fn search_customers(&self, name: &str) -> AppResult<Vec<CustomerCandidate>> {
        self.calls.lock().unwrap().push(name.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self
            .customers
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

/// Contact endpoint that records every payload it accepts
pub struct RecordingContactApi {
    rejected_first_names: HashSet<String>,
    unreachable_after: Option<usize>,
    delay: Duration,
    attempts: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    created: Mutex<Vec<ContactPayload>>,
}

impl RecordingContactApi {
    pub fn new() -> Self {
        Self {
            rejected_first_names: HashSet::new(),
            unreachable_after: None,
            delay: Duration::from_millis(0),
            attempts: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
        }
    }

    /// Reject records whose first name is `first_name` with a 400-style error
    pub fn rejecting(mut self, first_name: &str) -> Self {
        self.rejected_first_names.insert(first_name.to_string());
        self
    }

    /// Accept `count` calls, then behave as if the host went away
    pub fn unreachable_after(mut self, count: usize) -> Self {
        self.unreachable_after = Some(count);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<ContactPayload> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactCreationApi for RecordingContactApi {
    async fn create_contact(&self, payload: &ContactPayload) -> AppResult<CreatedContact> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if matches!(self.unreachable_after, Some(limit) if attempt >= limit) {
            return Err(AppError::ServiceUnavailable("connection refused".to_string()));
        }
        if self.rejected_first_names.contains(&payload.first_name) {
            return Err(AppError::ValidationError(format!(
                "duplicate contact {}",
                payload.first_name
            )));
        }

        let mut created = self.created.lock().unwrap();
        created.push(payload.clone());
        Ok(CreatedContact {
            id: format!("CT-{}", created.len()),
        })
    }
}

/// Everything currently buffered in a progress channel
pub fn drain_events(receiver: &mut UnboundedReceiver<ProgressEvent>) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

/// `processed` values of the progress events, in delivery order
pub fn processed_sequence(events: &[ProgressEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            ProgressEvent::Progress(progress) => Some(progress.processed),
            ProgressEvent::Phase(_) => None,
        })
        .collect()
}
