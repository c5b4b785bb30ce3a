//! Poll loop: check every target, sleep, repeat.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::application::services::MonitorService;

/// Runs passes over all targets until `shutdown` resolves.
///
/// Each pass is followed by a sleep of `interval`. Shutdown is observed
/// between passes, never in the middle of one, so a browser session is not
/// cut short. Returns the number of completed passes.
pub async fn run_poller<F>(service: Arc<MonitorService>, interval: Duration, shutdown: F) -> u64
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    info!(
        "Starting the monitoring process for {} target(s), every {}s. Press Ctrl+C to exit.",
        service.targets().len(),
        interval.as_secs()
    );

    let mut passes = 0u64;
    loop {
        match service.check_all().await {
            Ok(report) => {
                passes += 1;
                info!(
                    "Pass {} done: {} checked, {} increased, {} failed",
                    passes,
                    report.updates.len(),
                    report.changed().count(),
                    report.failures.len()
                );
            }
            Err(e) => {
                passes += 1;
                error!("Pass {} could not save counts: {}", passes, e);
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = &mut shutdown => {
                info!("Shutdown requested, stopping after {} pass(es)", passes);
                return passes;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ListingTarget, PageSnapshot};
    use crate::infrastructure::browser::MockPageFetcher;
    use crate::infrastructure::notify::MockNotifier;
    use crate::infrastructure::persistence::MemoryCountRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn stats(text: &str) -> PageSnapshot {
        PageSnapshot {
            stats_text: text.to_string(),
            ..PageSnapshot::default()
        }
    }

    #[tokio::test]
    async fn test_immediate_shutdown_runs_one_pass() {
        let mut fetcher = MockPageFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(stats("3 results")));

        let mut notifier = MockNotifier::new();
        notifier.expect_send().never();

        let service = Arc::new(MonitorService::new(
            vec![ListingTarget::new("https://a.test")],
            Arc::new(fetcher),
            Arc::new(notifier),
            Arc::new(MemoryCountRepository::new()),
        ));

        let passes = run_poller(service, Duration::from_secs(600), async {}).await;
        assert_eq!(passes, 1);
    }

    #[tokio::test]
    async fn test_increase_between_passes_notifies() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_fetch = calls.clone();

        let mut fetcher = MockPageFetcher::new();
        fetcher.expect_fetch().returning(move |_| {
            let n = calls_in_fetch.fetch_add(1, Ordering::SeqCst);
            Ok(stats(if n == 0 { "5 results" } else { "9 results" }))
        });

        let notified = Arc::new(Notify::new());
        let notified_in_send = notified.clone();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .withf(|_, message| message == "Listings changed from 5 to 9 at https://a.test")
            .times(1)
            .returning(move |_, _| {
                notified_in_send.notify_one();
                Ok(())
            });

        let counts = Arc::new(MemoryCountRepository::new());
        let service = Arc::new(MonitorService::new(
            vec![ListingTarget::new("https://a.test")],
            Arc::new(fetcher),
            Arc::new(notifier),
            counts.clone(),
        ));

        let passes = run_poller(service, Duration::from_millis(5), async move {
            notified.notified().await
        })
        .await;

        assert_eq!(passes, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(counts.snapshot().await.get("https://a.test"), Some(&9));
    }
}
