#![allow(dead_code)]

use async_trait::async_trait;
use listing_monitor::application::services::{AuthService, MonitorService};
use listing_monitor::domain::entities::{ListingTarget, PageSnapshot};
use listing_monitor::domain::repositories::{CountRepository, StoreError, StoreResult};
use listing_monitor::infrastructure::browser::{FetchError, FetchResult, PageFetcher};
use listing_monitor::infrastructure::notify::{NotifyError, NotifyResult, Notifier};
use listing_monitor::infrastructure::persistence::MemoryCountRepository;
use listing_monitor::state::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_API_KEY: &str = "test-api-key-123";

/// Serves canned stats text per URL; unknown URLs fail like a dead page.
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, stats_text: &str) -> Self {
        self.pages.insert(url.to_string(), stats_text.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<PageSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.pages.get(url) {
            Some(text) => Ok(PageSnapshot {
                stats_text: text.clone(),
                title: "Jackets".to_string(),
                refinements: vec!["Size M".to_string()],
            }),
            None => Err(FetchError::Page(format!("no route to {url}"))),
        }
    }
}

/// Records every notification; optionally fails each send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail_with_status: Option<u16>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(status: u16) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with_status: Some(status),
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, title: &str, message: &str) -> NotifyResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
        match self.fail_with_status {
            Some(status) => Err(NotifyError::Status(status)),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// In-memory store whose flush always fails.
#[derive(Default)]
pub struct UnflushableStore {
    inner: MemoryCountRepository,
}

#[async_trait]
impl CountRepository for UnflushableStore {
    async fn get_previous(&self, url: &str) -> StoreResult<Option<u64>> {
        self.inner.get_previous(url).await
    }

    async fn store(&self, url: &str, count: u64) -> StoreResult<()> {
        self.inner.store(url, count).await
    }

    async fn flush(&self) -> StoreResult<()> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }
}

pub fn targets(urls: &[&str]) -> Vec<ListingTarget> {
    urls.iter().map(|url| ListingTarget::new(*url)).collect()
}

pub fn create_monitor(
    urls: &[&str],
    fetcher: Arc<StubFetcher>,
    notifier: Arc<RecordingNotifier>,
    counts: Arc<dyn CountRepository>,
) -> Arc<MonitorService> {
    Arc::new(MonitorService::new(targets(urls), fetcher, notifier, counts))
}

pub fn create_test_state(monitor_service: Arc<MonitorService>) -> AppState {
    AppState::new(monitor_service, Arc::new(AuthService::new(TEST_API_KEY)))
}
