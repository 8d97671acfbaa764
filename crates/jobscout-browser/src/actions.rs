use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// How long navigation waits before it counts the page as loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadSignal {
    /// Load event fired and network activity has settled
    NetworkIdle,
    /// DOM parsed; used for mostly static-rendered platforms
    ContentLoaded,
}

/// Result of waiting for one of several page structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// At least one selector matched
    Ready,
    /// None matched before the timeout; callers proceed with what is rendered
    TimedOut,
}

/// Scroll geometry of the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    /// `document.body.scrollHeight`
    pub scroll_height: u32,
    /// `window.innerHeight`
    pub viewport_height: u32,
}

/// Control over one browser page.
///
/// Extraction code is written against this trait only, so it runs the same
/// against headless Chrome and against fixtures.
#[async_trait::async_trait]
pub trait PageControl: Send + Sync {
    /// Present `user_agent` on every following request
    async fn set_user_agent(&self, user_agent: &str) -> Result<()>;

    /// Navigate to a URL and wait for `signal`, failing after `timeout`
    async fn navigate(&self, url: &str, signal: LoadSignal, timeout: Duration) -> Result<()>;

    /// Wait until any selector matches; expiry is reported, not raised
    async fn wait_for_any(&self, selectors: &[&str], timeout: Duration) -> Result<WaitOutcome>;

    /// Evaluate a script in the page and return its serialized result
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value>;

    /// Current scroll geometry
    async fn scroll_metrics(&self) -> Result<ScrollMetrics>;

    /// Scroll down by `dy` pixels
    async fn scroll_by(&self, dy: u32) -> Result<()>;

    /// Serialized rendered DOM
    async fn content(&self) -> Result<String>;

    /// URL of the loaded document after redirects
    async fn current_url(&self) -> Result<String>;

    /// Release the page and anything it owns
    async fn close(&self) -> Result<()>;
}

/// Opens the single page a run works with.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    async fn open(&self) -> Result<Box<dyn PageControl>>;
}

#[async_trait::async_trait]
impl<P: PageControl + ?Sized> PageControl for Arc<P> {
    async fn set_user_agent(&self, user_agent: &str) -> Result<()> {
        (**self).set_user_agent(user_agent).await
    }

    async fn navigate(&self, url: &str, signal: LoadSignal, timeout: Duration) -> Result<()> {
        (**self).navigate(url, signal, timeout).await
    }

    async fn wait_for_any(&self, selectors: &[&str], timeout: Duration) -> Result<WaitOutcome> {
        (**self).wait_for_any(selectors, timeout).await
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        (**self).evaluate(script).await
    }

    async fn scroll_metrics(&self) -> Result<ScrollMetrics> {
        (**self).scroll_metrics().await
    }

    async fn scroll_by(&self, dy: u32) -> Result<()> {
        (**self).scroll_by(dy).await
    }

    async fn content(&self) -> Result<String> {
        (**self).content().await
    }

    async fn current_url(&self) -> Result<String> {
        (**self).current_url().await
    }

    async fn close(&self) -> Result<()> {
        (**self).close().await
    }
}
