//! Chromium-backed page fetcher.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::service::{FetchError, FetchResult, PageFetcher};
use crate::domain::entities::PageSnapshot;

const STATS_SELECTOR: &str = "div.ais-Panel.-stats";
const TITLE_SELECTOR: &str = r#"h1[data-testid="Title"]"#;
const REFINEMENTS_SCRIPT: &str = "Array.from(document.querySelectorAll('ul.-current-refinements span.-refinement-label')).map(el => el.textContent)";
const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Browser launch and timing settings.
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub user_agent: String,
    /// Wait after navigation before reading the page.
    pub settle_delay: Duration,
    /// Upper bound for a whole fetch, launch to close.
    pub timeout: Duration,
    /// Browser executable; auto-detected when `None`.
    pub chrome_path: Option<PathBuf>,
    pub window_size: (u32, u32),
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            settle_delay: Duration::from_secs(3),
            timeout: Duration::from_secs(30),
            chrome_path: None,
            window_size: (1920, 1080),
        }
    }
}

/// Fetches listing pages with a fresh headless Chromium per call.
///
/// A new browser process is launched for every fetch and closed afterwards,
/// so no cookies or cache leak between targets.
#[derive(Debug, Clone)]
pub struct ChromeFetcher {
    settings: BrowserSettings,
}

impl ChromeFetcher {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }

    fn browser_config(&self) -> FetchResult<BrowserConfig> {
        let (width, height) = self.settings.window_size;

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(width, height)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--start-maximized")
            .arg(format!("--user-agent={}", self.settings.user_agent));

        if let Some(path) = &self.settings.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(FetchError::Launch)
    }

    /// Runs one browser session: launch, read the page, close.
    async fn session(&self, url: &str) -> FetchResult<PageSnapshot> {
        let (mut browser, mut handler) = Browser::launch(self.browser_config()?)
            .await
            .map_err(|e| FetchError::Launch(e.to_string()))?;

        let _handler = AbortOnDrop(tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler stopped: {}", e);
                    break;
                }
            }
        }));

        let result = self.read_page(&browser, url).await;

        if let Err(e) = browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = browser.wait().await {
            warn!("Failed to reap browser process: {}", e);
        }

        result
    }

    async fn read_page(&self, browser: &Browser, url: &str) -> FetchResult<PageSnapshot> {
        let page = browser
            .new_page(url)
            .await
            .map_err(|e| FetchError::Page(e.to_string()))?;

        tokio::time::sleep(self.settings.settle_delay).await;

        let stats_text = wait_for_element(&page, STATS_SELECTOR)
            .await
            .inner_text()
            .await
            .map_err(|e| FetchError::Page(e.to_string()))?
            .ok_or_else(|| FetchError::NoText(url.to_string()))?;

        if stats_text.trim().is_empty() {
            return Err(FetchError::EmptyStats);
        }
        debug!("Stats text for {}: {}", url, stats_text);

        let title = match page.find_element(TITLE_SELECTOR).await {
            Ok(element) => element.inner_text().await.ok().flatten().unwrap_or_default(),
            Err(e) => {
                debug!("No title element on {}: {}", url, e);
                String::new()
            }
        };

        let refinements = match page.evaluate(REFINEMENTS_SCRIPT).await {
            Ok(result) => result.into_value::<Vec<String>>().unwrap_or_default(),
            Err(e) => {
                debug!("Could not read refinement labels on {}: {}", url, e);
                Vec::new()
            }
        };

        Ok(PageSnapshot {
            stats_text: stats_text.trim().to_string(),
            title: title.trim().to_string(),
            refinements,
        })
    }
}

/// Aborts the CDP handler task when the session ends, including when the
/// session future is dropped by the fetch timeout.
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Polls for `selector` until it appears. The caller bounds the wait.
async fn wait_for_element(page: &Page, selector: &str) -> Element {
    loop {
        match page.find_element(selector).await {
            Ok(element) => return element,
            Err(e) => {
                debug!("Waiting for {}: {}", selector, e);
                tokio::time::sleep(ELEMENT_POLL_INTERVAL).await;
            }
        }
    }
}

#[async_trait]
impl PageFetcher for ChromeFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<PageSnapshot> {
        let timeout = self.settings.timeout;

        tokio::time::timeout(timeout, self.session(url))
            .await
            .map_err(|_| FetchError::Timeout(timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = BrowserSettings::default();
        assert_eq!(settings.settle_delay, Duration::from_secs(3));
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.window_size, (1920, 1080));
        assert!(settings.user_agent.contains("Chrome/120"));
    }

    #[test]
    fn test_browser_config_builds() {
        let fetcher = ChromeFetcher::new(BrowserSettings {
            chrome_path: Some(PathBuf::from("/usr/bin/chromium")),
            ..BrowserSettings::default()
        });

        assert!(fetcher.browser_config().is_ok());
    }

    #[tokio::test]
    async fn test_handler_task_aborted_when_session_dropped() {
        let (alive_tx, alive_rx) = tokio::sync::oneshot::channel::<()>();

        let session = async move {
            let _handler = AbortOnDrop(tokio::spawn(async move {
                let _alive = alive_tx;
                std::future::pending::<()>().await;
            }));
            std::future::pending::<()>().await;
        };

        let timed_out = tokio::time::timeout(Duration::from_millis(10), session).await;
        assert!(timed_out.is_err());

        // The sender is only dropped once the spawned task is cancelled.
        let closed = tokio::time::timeout(Duration::from_secs(1), alive_rx).await;
        assert!(matches!(closed, Ok(Err(_))));
    }
}
