use crate::actions::{LoadSignal, PageControl, ScrollMetrics, SessionProvider, WaitOutcome};
use crate::error::{BrowserError, Result};
use crate::identity::ClientIdentity;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::stream::StreamExt;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How long the resource count must stay flat before the network counts as idle.
const NETWORK_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Poll interval while waiting for a selector.
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

const SCROLL_METRICS_SCRIPT: &str = "({ scrollHeight: document.body ? document.body.scrollHeight : 0, viewportHeight: window.innerHeight })";

const RESOURCE_COUNT_SCRIPT: &str = "performance.getEntriesByType('resource').length";

/// Launches headless Chrome sessions.
#[derive(Debug, Clone)]
pub struct BrowserEngine {
    identity: ClientIdentity,
    headless: bool,
    no_sandbox: bool,
}

impl BrowserEngine {
    /// Create an engine that launches headless, sandbox-less Chrome.
    pub fn new(identity: ClientIdentity) -> Self {
        Self {
            identity,
            headless: true,
            no_sandbox: true,
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn no_sandbox(mut self, no_sandbox: bool) -> Self {
        self.no_sandbox = no_sandbox;
        self
    }

    /// Launch a browser and open one blank page carrying the client identity.
    pub async fn launch(&self) -> Result<ChromePage> {
        let mut builder = BrowserConfig::builder()
            .window_size(self.identity.viewport_width, self.identity.viewport_height)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if self.no_sandbox {
            builder = builder.no_sandbox();
        }
        if !self.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Spawn browser handler
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        let chrome_page = ChromePage {
            page,
            browser: Mutex::new(Some(browser)),
            handler,
        };
        chrome_page.set_user_agent(&self.identity.user_agent).await?;

        tracing::debug!(headless = self.headless, "browser session launched");
        Ok(chrome_page)
    }
}

#[async_trait::async_trait]
impl SessionProvider for BrowserEngine {
    async fn open(&self) -> Result<Box<dyn PageControl>> {
        Ok(Box::new(self.launch().await?))
    }
}

/// A Chrome page that owns the browser process it runs in.
pub struct ChromePage {
    page: Page,
    browser: Mutex<Option<Browser>>,
    handler: JoinHandle<()>,
}

impl ChromePage {
    async fn resource_count(&self) -> Result<u64> {
        Ok(self.evaluate(RESOURCE_COUNT_SCRIPT).await?.as_u64().unwrap_or(0))
    }

    async fn wait_for_network_idle(&self, url: &str, deadline: Instant) -> Result<()> {
        let mut last = self.resource_count().await?;
        loop {
            if Instant::now() + NETWORK_QUIET_PERIOD > deadline {
                return Err(BrowserError::Timeout(format!(
                    "network never settled on {url}"
                )));
            }
            tokio::time::sleep(NETWORK_QUIET_PERIOD).await;
            let current = self.resource_count().await?;
            if current == last {
                return Ok(());
            }
            last = current;
        }
    }
}

#[async_trait::async_trait]
impl PageControl for ChromePage {
    async fn set_user_agent(&self, user_agent: &str) -> Result<()> {
        self.page.set_user_agent(user_agent).await?;
        Ok(())
    }

    async fn navigate(&self, url: &str, signal: LoadSignal, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;

        tokio::time::timeout(timeout, self.page.goto(url))
            .await
            .map_err(|_| BrowserError::Timeout(format!("navigation to {url} exceeded {timeout:?}")))?
            .map_err(|e| BrowserError::NavigationError(format!("{url}: {e}")))?;

        if signal == LoadSignal::NetworkIdle {
            self.wait_for_network_idle(url, deadline).await?;
        }
        Ok(())
    }

    async fn wait_for_any(&self, selectors: &[&str], timeout: Duration) -> Result<WaitOutcome> {
        let joined = serde_json::to_string(&selectors.join(", "))
            .map_err(|e| BrowserError::EvaluationError(e.to_string()))?;
        let script = format!("document.querySelector({joined}) !== null");
        let deadline = Instant::now() + timeout;

        loop {
            if self.evaluate(&script).await?.as_bool() == Some(true) {
                return Ok(WaitOutcome::Ready);
            }
            if Instant::now() >= deadline {
                return Ok(WaitOutcome::TimedOut);
            }
            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::EvaluationError(e.to_string()))?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn scroll_metrics(&self) -> Result<ScrollMetrics> {
        let value = self.evaluate(SCROLL_METRICS_SCRIPT).await?;
        serde_json::from_value(value).map_err(|e| BrowserError::EvaluationError(e.to_string()))
    }

    async fn scroll_by(&self, dy: u32) -> Result<()> {
        self.evaluate(&format!("window.scrollBy(0, {dy})")).await?;
        Ok(())
    }

    async fn content(&self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    async fn current_url(&self) -> Result<String> {
        self.page.url().await?.ok_or(BrowserError::NoPage)
    }

    async fn close(&self) -> Result<()> {
        if let Some(mut browser) = self.browser.lock().await.take() {
            browser.close().await?;
            let _ = browser.wait().await;
        }
        self.handler.abort();
        tracing::debug!("browser session closed");
        Ok(())
    }
}
