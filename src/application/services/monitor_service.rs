//! Listing check pipeline: fetch, extract, compare, notify, store.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::change_detector::is_increase;
use crate::domain::entities::{ListingObservation, ListingTarget, ListingUpdate};
use crate::domain::repositories::{CountRepository, StoreError};
use crate::error::CheckError;
use crate::infrastructure::browser::PageFetcher;
use crate::infrastructure::notify::Notifier;
use crate::utils::count_extractor::extract_count;

/// Title of every count-increase notification.
pub const NOTIFICATION_TITLE: &str = "Listing Count Update";

/// A target that could not be checked during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFailure {
    pub url: String,
    pub reason: String,
}

/// Outcome of one pass over every configured target.
#[derive(Debug, Clone, Default)]
pub struct PassReport {
    /// One entry per successfully checked target, in configuration order.
    pub updates: Vec<ListingUpdate>,
    pub failures: Vec<TargetFailure>,
}

impl PassReport {
    pub fn changed(&self) -> impl Iterator<Item = &ListingUpdate> {
        self.updates.iter().filter(|u| u.changed)
    }
}

/// Runs the listing check pipeline over the configured targets.
///
/// Targets are checked one after another. A failure on one target is logged
/// and skipped; it never stops the pass and never touches that target's
/// stored count. Concurrent callers of [`MonitorService::check_all`] are
/// serialized so at most one browser session runs at a time.
pub struct MonitorService {
    targets: Vec<ListingTarget>,
    fetcher: Arc<dyn PageFetcher>,
    notifier: Arc<dyn Notifier>,
    counts: Arc<dyn CountRepository>,
    pass_lock: Mutex<()>,
}

impl MonitorService {
    pub fn new(
        targets: Vec<ListingTarget>,
        fetcher: Arc<dyn PageFetcher>,
        notifier: Arc<dyn Notifier>,
        counts: Arc<dyn CountRepository>,
    ) -> Self {
        Self {
            targets,
            fetcher,
            notifier,
            counts,
            pass_lock: Mutex::new(()),
        }
    }

    pub fn targets(&self) -> &[ListingTarget] {
        &self.targets
    }

    pub fn notifier_name(&self) -> &'static str {
        self.notifier.name()
    }

    /// Fetches a page and parses its listing count.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Fetch`] if the page could not be rendered and
    /// [`CheckError::Extract`] if the stats text holds no count.
    pub async fn observe(&self, url: &str) -> Result<ListingObservation, CheckError> {
        let snapshot = self.fetcher.fetch(url).await?;
        let extracted = extract_count(&snapshot.stats_text)?;
        let search_term = ListingObservation::describe(&snapshot.title, &snapshot.refinements);

        info!(
            "Listing cnt: {} {}, search term: {}, refinements: {}",
            extracted.count,
            extracted.unit,
            snapshot.title,
            snapshot.refinements.join(", ")
        );

        Ok(ListingObservation {
            count: extracted.count,
            search_term,
            refinements: snapshot.refinements,
        })
    }

    /// Checks one target and notifies on an increase.
    ///
    /// Store and notification errors are logged, not returned: the fetched
    /// count is still reported and (when possible) stored.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError`] when the count could not be observed. Nothing is
    /// stored in that case.
    pub async fn check_target(&self, target: &ListingTarget) -> Result<ListingUpdate, CheckError> {
        let observation = self.observe(&target.url).await?;

        let previous = match self.counts.get_previous(&target.url).await {
            Ok(previous) => previous,
            Err(e) => {
                warn!("Error getting previous count for {}: {}", target.url, e);
                None
            }
        };

        let changed = is_increase(previous, observation.count);

        if let (true, Some(prev)) = (changed, previous) {
            info!(
                "Listing count updated for {}: {} -> {}",
                target.url, prev, observation.count
            );

            let message =
                notification_message(prev, observation.count, &target.url, &observation.search_term);

            if let Err(e) = self.notifier.send(NOTIFICATION_TITLE, &message).await {
                error!("Failed to send notification for {}: {}", target.url, e);
            }
        }

        if let Err(e) = self.counts.store(&target.url, observation.count).await {
            warn!("Error storing count for {}: {}", target.url, e);
        }

        Ok(ListingUpdate {
            url: target.url.clone(),
            search_term: observation.search_term,
            current_count: observation.count,
            previous_count: previous,
            changed,
        })
    }

    /// Runs one pass over every target.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if stored counts could not be flushed at
    /// the end of the pass. Per-target failures are reported in
    /// [`PassReport::failures`].
    pub async fn check_all(&self) -> Result<PassReport, StoreError> {
        let _pass = self.pass_lock.lock().await;
        let mut report = PassReport::default();

        for target in &self.targets {
            match self.check_target(target).await {
                Ok(update) => report.updates.push(update),
                Err(e) => {
                    warn!("Error checking listing count for {}: {}", target.url, e);
                    report.failures.push(TargetFailure {
                        url: target.url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.counts.flush().await?;

        Ok(report)
    }
}

/// Builds the notification body for a count increase.
///
/// The search term is appended in parentheses when known.
pub fn notification_message(previous: u64, current: u64, url: &str, search_term: &str) -> String {
    if search_term.is_empty() {
        format!("Listings changed from {previous} to {current} at {url}")
    } else {
        format!("Listings changed from {previous} to {current} at {url} ({search_term})")
    }
}
