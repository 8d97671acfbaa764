//! Run orchestration.
//!
//! A run loads targets and role filters, opens one browser page, walks the
//! active targets one after another, stores what each strategy found and
//! sends one digest of everything that was new. Target failures are logged
//! and never end the run. At most one run is active per orchestrator.

use crate::error::{Result, ScanError};
use crate::filter::KeywordFilter;
use crate::resolver::resolve;
use crate::strategies::{ExtractionContext, ScanSettings};
use chrono::Utc;
use jobscout_browser::{PageControl, SessionProvider};
use jobscout_core::{JobStore, Notifier, Posting, RoleFilter, Target};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::Instrument;

/// Outcome of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Active targets a strategy was invoked for
    pub targets_attempted: usize,
    /// Targets whose strategy returned an error
    pub targets_failed: usize,
    /// Postings returned by strategies, before persistence
    pub postings_found: usize,
    /// Postings the store accepted as new
    pub postings_new: usize,
    /// Whether the digest was delivered
    pub notified: bool,
    /// Why the run stopped before visiting targets, if it did
    pub error: Option<String>,
}

/// Coordinates one scrape run at a time.
pub struct ScrapeOrchestrator {
    store: Arc<dyn JobStore>,
    sessions: Arc<dyn SessionProvider>,
    notifier: Arc<dyn Notifier>,
    recipient: String,
    settings: ScanSettings,
    run_lock: Mutex<()>,
}

impl ScrapeOrchestrator {
    #[must_use]
    pub fn new(
        store: Arc<dyn JobStore>,
        sessions: Arc<dyn SessionProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            sessions,
            notifier,
            recipient: String::new(),
            settings: ScanSettings::default(),
            run_lock: Mutex::new(()),
        }
    }

    /// Address the digest is sent to.
    #[must_use]
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ScanSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Whether a run currently holds the run-lock.
    pub fn is_running(&self) -> bool {
        self.run_lock.try_lock().is_err()
    }

    /// Execute one run.
    ///
    /// Fails only with [`ScanError::RunInProgress`] when another run holds
    /// the lock; everything that goes wrong inside a run is reported in the
    /// summary instead.
    pub async fn run(&self) -> Result<RunSummary> {
        let _guard = self
            .run_lock
            .try_lock()
            .map_err(|_| ScanError::RunInProgress)?;
        Ok(self.run_locked().await)
    }

    async fn run_locked(&self) -> RunSummary {
        tracing::info!("Starting scrape run");
        let mut summary = RunSummary::default();

        let (targets, roles) = match self.load_inputs().await {
            Ok(inputs) => inputs,
            Err(e) => {
                tracing::error!("Failed to load targets and roles: {}", e);
                summary.error = Some(e.to_string());
                return summary;
            }
        };

        let targets: Vec<Target> = targets.into_iter().filter(|t| t.active).collect();
        let keywords = KeywordFilter::from_roles(&roles);
        if targets.is_empty() || keywords.is_empty() {
            tracing::info!("No active companies or roles to scrape.");
            return summary;
        }

        let page = match self.sessions.open().await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Failed to open browser session: {}", e);
                summary.error = Some(e.to_string());
                return summary;
            }
        };
        if let Err(e) = page.set_user_agent(&self.settings.user_agent).await {
            tracing::warn!("Failed to set user agent: {}", e);
        }

        let mut new_postings = Vec::new();
        for target in &targets {
            summary.targets_attempted += 1;
            let span = tracing::info_span!("target", company = %target.name);
            match self
                .scan_target(page.as_ref(), target, &keywords)
                .instrument(span.clone())
                .await
            {
                Ok(postings) => {
                    summary.postings_found += postings.len();
                    let stored = self.persist(postings).instrument(span).await;
                    tracing::info!(company = %target.name, new = stored.len(), "Target done");
                    new_postings.extend(stored);
                }
                Err(e) => {
                    summary.targets_failed += 1;
                    tracing::error!("Error scraping {}: {}", target.name, e);
                }
            }
        }

        if let Err(e) = page.close().await {
            tracing::warn!("Failed to close browser session: {}", e);
        }

        summary.postings_new = new_postings.len();
        if new_postings.is_empty() {
            tracing::info!("No new jobs found, skipping email.");
        } else {
            tracing::info!(
                "Sending email notification for {} new jobs...",
                new_postings.len()
            );
            match self
                .notifier
                .notify_new_postings(&self.recipient, &new_postings)
                .await
            {
                Ok(()) => summary.notified = true,
                Err(e) => tracing::error!("Failed to send notification: {}", e),
            }
        }

        tracing::info!(
            attempted = summary.targets_attempted,
            failed = summary.targets_failed,
            found = summary.postings_found,
            new = summary.postings_new,
            "Scrape run finished"
        );
        summary
    }

    async fn load_inputs(&self) -> Result<(Vec<Target>, Vec<RoleFilter>)> {
        let targets = self.store.list_targets().await?;
        let roles = self.store.list_role_filters().await?;
        Ok((targets, roles))
    }

    async fn scan_target(
        &self,
        page: &dyn PageControl,
        target: &Target,
        keywords: &KeywordFilter,
    ) -> Result<Vec<Posting>> {
        let kind = resolve(&target.url, &target.name);
        tracing::info!("Scraping {} --> Strategy: {}", target.name, kind);

        let ctx = ExtractionContext {
            company: &target.name,
            url: &target.url,
            keywords,
            settings: &self.settings,
            discovered_at: Utc::now(),
        };
        kind.strategy().extract(page, &ctx).await
    }

    /// Store postings one by one; returns those the store accepted as new.
    async fn persist(&self, postings: Vec<Posting>) -> Vec<Posting> {
        let mut stored = Vec::new();
        for posting in postings {
            match self.store.upsert_posting(&posting).await {
                Ok(Some(saved)) => stored.push(saved),
                Ok(None) => tracing::debug!(url = %posting.url, "Posting already known"),
                Err(e) => tracing::warn!("Failed to store posting {}: {}", posting.url, e),
            }
        }
        stored
    }
}
