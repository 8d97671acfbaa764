//! Deterministic page backend serving canned HTML.
//!
//! `FixturePage` answers navigations from a URL → HTML table and never touches
//! the network, so extraction logic can be tested without Chrome. A site can
//! hold back part of its markup until the page has been scrolled to the
//! bottom, which is how lazily rendered listings behave.

use crate::actions::{LoadSignal, PageControl, ScrollMetrics, SessionProvider, WaitOutcome};
use crate::error::{BrowserError, Result};
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Viewport height reported by fixture pages.
pub const FIXTURE_VIEWPORT_HEIGHT: u32 = 800;

/// Canned response for one URL.
#[derive(Debug, Clone, Default)]
pub struct FixtureSite {
    html: String,
    lazy_html: Option<String>,
    scroll_height: u32,
    growth_px: u32,
    fail: Option<String>,
    redirect_to: Option<String>,
}

impl FixtureSite {
    /// A page that fits in one viewport.
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            scroll_height: FIXTURE_VIEWPORT_HEIGHT,
            ..Self::default()
        }
    }

    /// A navigation that fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Markup appended once the page is scrolled to the bottom.
    pub fn with_lazy(mut self, lazy_html: impl Into<String>, scroll_height: u32) -> Self {
        self.lazy_html = Some(lazy_html.into());
        self.scroll_height = scroll_height;
        self
    }

    /// Grow the document by `extra_px` once scrolling starts, like a feed
    /// that fetches its next page as soon as the user moves.
    pub fn with_growth(mut self, extra_px: u32) -> Self {
        self.growth_px = extra_px;
        self
    }

    fn height(&self, grown: bool) -> u32 {
        if grown {
            self.scroll_height.saturating_add(self.growth_px)
        } else {
            self.scroll_height
        }
    }

    /// Report `url` as the loaded document after navigation.
    pub fn redirected_to(mut self, url: impl Into<String>) -> Self {
        self.redirect_to = Some(url.into());
        self
    }
}

/// One `navigate` call as seen by the fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRecord {
    pub url: String,
    pub signal: LoadSignal,
}

#[derive(Debug, Default)]
struct FixtureState {
    current: Option<(String, FixtureSite)>,
    scroll_offset: u32,
    grown: bool,
    revealed: bool,
    user_agent: Option<String>,
    navigations: Vec<NavigationRecord>,
    scroll_calls: usize,
    closed: bool,
}

/// In-memory `PageControl`.
#[derive(Debug, Default)]
pub struct FixturePage {
    sites: HashMap<String, FixtureSite>,
    scripts: HashMap<String, serde_json::Value>,
    state: Mutex<FixtureState>,
}

impl FixturePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `site` for navigations to `url`.
    pub fn with_site(mut self, url: impl Into<String>, site: FixtureSite) -> Self {
        self.sites.insert(url.into(), site);
        self
    }

    /// Answer `evaluate(script)` with `value`.
    pub fn with_script(mut self, script: impl Into<String>, value: serde_json::Value) -> Self {
        self.scripts.insert(script.into(), value);
        self
    }

    pub fn navigations(&self) -> Vec<NavigationRecord> {
        self.lock().navigations.clone()
    }

    pub fn user_agent(&self) -> Option<String> {
        self.lock().user_agent.clone()
    }

    pub fn scroll_calls(&self) -> usize {
        self.lock().scroll_calls
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, FixtureState> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn rendered(state: &FixtureState) -> Result<String> {
        let (_, site) = state.current.as_ref().ok_or(BrowserError::NoPage)?;
        let mut html = site.html.clone();
        if state.revealed {
            if let Some(lazy) = &site.lazy_html {
                html.push_str(lazy);
            }
        }
        Ok(html)
    }
}

#[async_trait::async_trait]
impl PageControl for FixturePage {
    async fn set_user_agent(&self, user_agent: &str) -> Result<()> {
        self.lock().user_agent = Some(user_agent.to_string());
        Ok(())
    }

    async fn navigate(&self, url: &str, signal: LoadSignal, _timeout: Duration) -> Result<()> {
        let mut state = self.lock();
        state.navigations.push(NavigationRecord {
            url: url.to_string(),
            signal,
        });

        let site = self
            .sites
            .get(url)
            .ok_or_else(|| BrowserError::NavigationError(format!("{url}: net::ERR_NAME_NOT_RESOLVED")))?;
        if let Some(reason) = &site.fail {
            return Err(BrowserError::NavigationError(format!("{url}: {reason}")));
        }

        let loaded_url = site.redirect_to.clone().unwrap_or_else(|| url.to_string());
        state.current = Some((loaded_url, site.clone()));
        state.scroll_offset = 0;
        state.grown = false;
        state.revealed = false;
        Ok(())
    }

    async fn wait_for_any(&self, selectors: &[&str], _timeout: Duration) -> Result<WaitOutcome> {
        let html = Self::rendered(&self.lock())?;
        let document = Html::parse_document(&html);
        let found = selectors.iter().any(|css| {
            Selector::parse(css)
                .map(|selector| document.select(&selector).next().is_some())
                .unwrap_or(false)
        });
        Ok(if found {
            WaitOutcome::Ready
        } else {
            WaitOutcome::TimedOut
        })
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        self.scripts
            .get(script)
            .cloned()
            .ok_or_else(|| BrowserError::EvaluationError(format!("no fixture result for {script}")))
    }

    async fn scroll_metrics(&self) -> Result<ScrollMetrics> {
        let state = self.lock();
        let (_, site) = state.current.as_ref().ok_or(BrowserError::NoPage)?;
        Ok(ScrollMetrics {
            scroll_height: site.height(state.grown),
            viewport_height: FIXTURE_VIEWPORT_HEIGHT,
        })
    }

    async fn scroll_by(&self, dy: u32) -> Result<()> {
        let mut state = self.lock();
        let scroll_height = state
            .current
            .as_ref()
            .map(|(_, site)| site.height(true))
            .ok_or(BrowserError::NoPage)?;
        state.grown = true;
        state.scroll_calls += 1;
        state.scroll_offset = state.scroll_offset.saturating_add(dy);
        if state.scroll_offset + FIXTURE_VIEWPORT_HEIGHT >= scroll_height {
            state.revealed = true;
        }
        Ok(())
    }

    async fn content(&self) -> Result<String> {
        Self::rendered(&self.lock())
    }

    async fn current_url(&self) -> Result<String> {
        self.lock()
            .current
            .as_ref()
            .map(|(url, _)| url.clone())
            .ok_or(BrowserError::NoPage)
    }

    async fn close(&self) -> Result<()> {
        self.lock().closed = true;
        Ok(())
    }
}

/// Hands out one shared `FixturePage` per run.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    page: Arc<FixturePage>,
    fail_open: bool,
    opened: Arc<AtomicUsize>,
}

impl FixtureProvider {
    pub fn new(page: Arc<FixturePage>) -> Self {
        Self {
            page,
            fail_open: false,
            opened: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A provider whose sessions never start.
    pub fn failing() -> Self {
        Self {
            fail_open: true,
            ..Self::new(Arc::new(FixturePage::new()))
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SessionProvider for FixtureProvider {
    async fn open(&self) -> Result<Box<dyn PageControl>> {
        if self.fail_open {
            return Err(BrowserError::ChromiumError(
                "could not find a Chrome executable".to_string(),
            ));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.page.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn test_navigate_records_signal_and_serves_html() {
        let page = FixturePage::new().with_site(
            "https://acme.example/jobs",
            FixtureSite::html("<a href='/1'>Engineer</a>"),
        );

        page.navigate("https://acme.example/jobs", LoadSignal::ContentLoaded, TIMEOUT)
            .await
            .unwrap();

        assert!(page.content().await.unwrap().contains("Engineer"));
        assert_eq!(
            page.navigations(),
            vec![NavigationRecord {
                url: "https://acme.example/jobs".to_string(),
                signal: LoadSignal::ContentLoaded,
            }]
        );
    }

    #[tokio::test]
    async fn test_unknown_url_fails_navigation() {
        let page = FixturePage::new();
        let err = page
            .navigate("https://missing.example", LoadSignal::NetworkIdle, TIMEOUT)
            .await
            .unwrap_err();
        assert!(matches!(err, BrowserError::NavigationError(_)));
        assert!(matches!(page.content().await, Err(BrowserError::NoPage)));
    }

    #[tokio::test]
    async fn test_lazy_markup_appears_after_scrolling_to_bottom() {
        let page = FixturePage::new().with_site(
            "https://acme.example/jobs",
            FixtureSite::html("<ul></ul>").with_lazy("<li>Late</li>", 1000),
        );
        page.navigate("https://acme.example/jobs", LoadSignal::NetworkIdle, TIMEOUT)
            .await
            .unwrap();

        page.scroll_by(100).await.unwrap();
        assert!(!page.content().await.unwrap().contains("Late"));

        page.scroll_by(100).await.unwrap();
        assert!(page.content().await.unwrap().contains("Late"));
        assert_eq!(page.scroll_calls(), 2);
    }

    #[tokio::test]
    async fn test_growth_applies_after_first_scroll() {
        let page = FixturePage::new().with_site(
            "https://acme.example/feed",
            FixtureSite::html("<ul></ul>").with_lazy("<li>Late</li>", 1000).with_growth(500),
        );
        page.navigate("https://acme.example/feed", LoadSignal::NetworkIdle, TIMEOUT)
            .await
            .unwrap();
        assert_eq!(page.scroll_metrics().await.unwrap().scroll_height, 1000);

        page.scroll_by(100).await.unwrap();
        assert_eq!(page.scroll_metrics().await.unwrap().scroll_height, 1500);

        // Renavigating starts from the original height again.
        page.navigate("https://acme.example/feed", LoadSignal::NetworkIdle, TIMEOUT)
            .await
            .unwrap();
        assert_eq!(page.scroll_metrics().await.unwrap().scroll_height, 1000);
    }

    #[tokio::test]
    async fn test_wait_for_any_reports_timeout() {
        let page = FixturePage::new()
            .with_site("https://wd.example", FixtureSite::html("<div>Loading</div>"));
        page.navigate("https://wd.example", LoadSignal::NetworkIdle, TIMEOUT)
            .await
            .unwrap();

        assert_eq!(
            page.wait_for_any(&["h3", "ul[role=\"list\"]"], TIMEOUT).await.unwrap(),
            WaitOutcome::TimedOut
        );
        assert_eq!(
            page.wait_for_any(&["div"], TIMEOUT).await.unwrap(),
            WaitOutcome::Ready
        );
    }

    #[tokio::test]
    async fn test_evaluate_answers_scripted_values() {
        let page = FixturePage::new().with_script("window.innerHeight", serde_json::json!(800));
        assert_eq!(
            page.evaluate("window.innerHeight").await.unwrap(),
            serde_json::json!(800)
        );
        assert!(matches!(
            page.evaluate("document.title").await,
            Err(BrowserError::EvaluationError(_))
        ));
    }

    #[tokio::test]
    async fn test_redirect_changes_current_url() {
        let page = FixturePage::new().with_site(
            "https://acme.example/careers",
            FixtureSite::html("").redirected_to("https://acme.wd5.myworkdayjobs.com/en-US/acme"),
        );
        page.navigate("https://acme.example/careers", LoadSignal::NetworkIdle, TIMEOUT)
            .await
            .unwrap();
        assert_eq!(
            page.current_url().await.unwrap(),
            "https://acme.wd5.myworkdayjobs.com/en-US/acme"
        );
    }

    #[tokio::test]
    async fn test_provider_shares_one_page() {
        let page = Arc::new(FixturePage::new());
        let provider = FixtureProvider::new(page.clone());

        let session = provider.open().await.unwrap();
        session.set_user_agent("JobScout/test").await.unwrap();
        session.close().await.unwrap();

        assert_eq!(provider.opened(), 1);
        assert_eq!(page.user_agent().as_deref(), Some("JobScout/test"));
        assert!(page.is_closed());
        assert!(FixtureProvider::failing().open().await.is_err());
    }
}
