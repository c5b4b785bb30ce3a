//! Runtime setup for the three run modes.
//!
//! Builds the fetcher, notifier and count store from [`Config`], then either
//! serves the HTTP API, runs the poll loop, or performs a single pass.

use crate::application::poller::run_poller;
use crate::application::services::{AuthService, MonitorService, PassReport};
use crate::config::{Config, NotifierKind};
use crate::domain::repositories::CountRepository;
use crate::infrastructure::browser::ChromeFetcher;
use crate::infrastructure::notify::{Notifier, NtfyNotifier, NullNotifier, PushoverNotifier};
use crate::infrastructure::persistence::{
    JsonFileCountRepository, MemoryCountRepository, NullCountRepository,
};
use crate::routes::app_service;
use crate::state::AppState;
use crate::utils::mask::mask_secret;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Chromium page fetcher
/// - Notifier selected by `NOTIFIER`
/// - Count store (no memory between calls unless `COUNT_STORE_PATH` is set)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - `API_KEY` is missing
/// - The notifier or count store cannot be initialized
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run_server(config: Config) -> Result<()> {
    let api_key = config.require_api_key()?;
    let auth_service = Arc::new(AuthService::new(api_key));
    tracing::info!("API key loaded ({})", mask_secret(api_key));

    let counts = build_count_store(&config, Arc::new(NullCountRepository::new())).await?;
    let monitor_service = build_monitor(&config, counts)?;

    let state = AppState::new(monitor_service, auth_service);
    let app = app_service(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Runs the poll loop until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the notifier or count store cannot be initialized.
pub async fn run_watch(config: Config) -> Result<()> {
    let counts = build_count_store(&config, Arc::new(MemoryCountRepository::new())).await?;
    let monitor_service = build_monitor(&config, counts)?;

    run_poller(monitor_service, config.poll_interval(), shutdown_signal()).await;
    Ok(())
}

/// Performs a single pass and returns its report.
///
/// # Errors
///
/// Returns an error if initialization fails or stored counts cannot be saved.
pub async fn run_check(config: Config) -> Result<PassReport> {
    let counts = build_count_store(&config, Arc::new(MemoryCountRepository::new())).await?;
    let monitor_service = build_monitor(&config, counts)?;

    monitor_service
        .check_all()
        .await
        .context("Failed to save listing counts")
}

fn build_monitor(config: &Config, counts: Arc<dyn CountRepository>) -> Result<Arc<MonitorService>> {
    let fetcher = Arc::new(ChromeFetcher::new(config.browser_settings()));
    let notifier = build_notifier(config)?;

    Ok(Arc::new(MonitorService::new(
        config.targets(),
        fetcher,
        notifier,
        counts,
    )))
}

/// Creates the notifier selected by `NOTIFIER`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or Pushover
/// credentials are missing.
pub fn build_notifier(config: &Config) -> Result<Arc<dyn Notifier>> {
    let notifier: Arc<dyn Notifier> = match config.notifier {
        NotifierKind::Ntfy => {
            let ntfy = NtfyNotifier::new(&config.ntfy_server, &config.ntfy_topic)
                .context("Failed to initialize ntfy notifier")?;
            tracing::info!("Notifications enabled (ntfy, {})", ntfy.endpoint());
            Arc::new(ntfy)
        }
        NotifierKind::Pushover => {
            let (Some(token), Some(user)) = (&config.pushover_token, &config.pushover_user) else {
                anyhow::bail!("PUSHOVER_TOKEN and PUSHOVER_USER must be set when NOTIFIER=pushover");
            };
            let pushover = PushoverNotifier::new(token.as_str(), user.as_str())
                .context("Failed to initialize Pushover notifier")?;
            tracing::info!("Notifications enabled (Pushover)");
            Arc::new(pushover)
        }
        NotifierKind::None => {
            tracing::info!("Notifications disabled (log only)");
            Arc::new(NullNotifier)
        }
    };

    Ok(notifier)
}

/// Opens the JSON count file when configured, otherwise returns `in_process`.
///
/// # Errors
///
/// Returns an error if the count file exists but cannot be read or parsed.
pub async fn build_count_store(
    config: &Config,
    in_process: Arc<dyn CountRepository>,
) -> Result<Arc<dyn CountRepository>> {
    match config.count_store_path {
        Some(ref path) => {
            let store = JsonFileCountRepository::open(path)
                .await
                .with_context(|| format!("Failed to open count store {}", path.display()))?;
            tracing::info!("Count store: {}", store.path().display());
            Ok(Arc::new(store))
        }
        None => Ok(in_process),
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
