//! JobScout application shell
//!
//! Wires configuration, storage, the browser engine and the notifier into a
//! scrape orchestrator, then exposes it through the daily schedule and a
//! small HTTP surface for triggering runs and managing what is monitored.
//! Business logic lives in `crates/`.

pub mod admin;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

use anyhow::Context;
use jobscout_browser::{BrowserEngine, ClientIdentity};
use jobscout_core::{AppConfig, NotificationConfig, Notifier};
use jobscout_db::Database;
use jobscout_mail::{DisabledNotifier, SmtpNotifier};
use jobscout_scanner::{RunSummary, ScanSettings, ScrapeOrchestrator};
use jobscout_scheduler::{spawn_daily, RunQueue};
use std::sync::Arc;
use tracing::info;

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,jobscout=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Pick the digest transport; a broken mail config never stops the app.
pub fn build_notifier(config: &NotificationConfig) -> Arc<dyn Notifier> {
    if !config.enabled {
        info!("Notifications disabled");
        return Arc::new(DisabledNotifier);
    }
    match SmtpNotifier::from_config(config) {
        Ok(notifier) => Arc::new(notifier),
        Err(e) => {
            tracing::warn!("Email not configured, digests will only be logged: {}", e);
            Arc::new(DisabledNotifier)
        }
    }
}

/// Start the single run worker around `orchestrator`.
pub fn spawn_run_queue(
    orchestrator: Arc<ScrapeOrchestrator>,
) -> (RunQueue<RunSummary>, tokio::task::JoinHandle<()>) {
    RunQueue::spawn(move |_source| {
        let orchestrator = orchestrator.clone();
        async move {
            orchestrator.run().await.unwrap_or_else(|e| {
                tracing::warn!("Run not started: {}", e);
                RunSummary {
                    error: Some(e.to_string()),
                    ..RunSummary::default()
                }
            })
        }
    })
}

/// Run the application until the server stops.
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting JobScout v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_with_env().context("failed to load configuration")?;

    let db_path = config.database_path()?;
    info!("Database: {}", db_path.display());
    let db = Database::new(&db_path)
        .await
        .context("failed to open database")?;
    db.run_migrations().await?;
    db.seed(&config.seed).await?;

    let identity = ClientIdentity::desktop_chrome()
        .with_user_agent(config.scanning.user_agent.clone())
        .with_viewport(config.browser.window_width, config.browser.window_height);
    let engine = BrowserEngine::new(identity)
        .headless(config.browser.headless)
        .no_sandbox(config.browser.no_sandbox);

    let orchestrator = ScrapeOrchestrator::new(
        Arc::new(db.clone()),
        Arc::new(engine),
        build_notifier(&config.notifications),
    )
    .with_recipient(config.notifications.recipient.clone())
    .with_settings(ScanSettings::from(&config.scanning));

    let (runs, _worker) = spawn_run_queue(Arc::new(orchestrator));

    if config.schedule.enabled {
        let at = config.schedule.daily_time()?;
        spawn_daily(runs.clone(), at);
    } else {
        info!("Daily schedule disabled");
    }

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!("Listening on {}", config.server.bind);

    axum::serve(listener, router(AppState::new(runs, db.clone())))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    db.close().await;
    Ok(())
}
