//! Extraction strategies, one per supported site family.
//!
//! Every strategy drives the shared page, takes a snapshot of the rendered
//! DOM and turns matching elements into [`Posting`]s. Parsing runs over the
//! snapshot so it never holds a DOM across an await point.

mod generic;
mod google;
mod greenhouse;
mod lever;
mod netflix;
mod workday;

pub use generic::GenericStrategy;
pub use google::{google_search_url, GoogleStrategy};
pub use greenhouse::GreenhouseStrategy;
pub use lever::LeverStrategy;
pub use netflix::{netflix_search_url, NetflixStrategy};
pub use workday::WorkdayStrategy;

use crate::error::{Result, ScanError};
use crate::filter::KeywordFilter;
use crate::resolver::StrategyKind;
use crate::scroll::ScrollDriver;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jobscout_browser::PageControl;
use jobscout_core::{Posting, ScanningConfig};
use std::time::Duration;
use url::Url;

/// Timeouts, client identity and scroll behaviour shared by all strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// User agent set on the session before the first navigation
    pub user_agent: String,
    /// Upper bound on one navigation
    pub navigation_timeout: Duration,
    /// Upper bound on waiting for a known page structure
    pub selector_timeout: Duration,
    /// Scrolling used before extraction on lazily rendered sites
    pub scroll: ScrollDriver,
}

impl From<&ScanningConfig> for ScanSettings {
    fn from(config: &ScanningConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            navigation_timeout: config.navigation_timeout(),
            selector_timeout: config.selector_timeout(),
            scroll: ScrollDriver::from(config),
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self::from(&ScanningConfig::default())
    }
}

/// Everything a strategy needs to know about the target it is scraping.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    /// Display name stamped on every posting
    pub company: &'a str,
    /// Careers page URL of the target
    pub url: &'a str,
    /// Active role keywords
    pub keywords: &'a KeywordFilter,
    pub settings: &'a ScanSettings,
    /// Timestamp given to postings found in this pass
    pub discovered_at: DateTime<Utc>,
}

impl ExtractionContext<'_> {
    pub(crate) fn posting(&self, title: &str, url: String) -> Posting {
        Posting::new(title, self.company, url, self.discovered_at)
    }
}

/// Rendered HTML plus the URL it was loaded from, for link resolution.
#[derive(Debug, Clone)]
pub(crate) struct PageSnapshot {
    pub html: String,
    pub base: Url,
}

impl PageSnapshot {
    pub async fn capture(page: &dyn PageControl) -> Result<Self> {
        let html = page.content().await?;
        let current = page.current_url().await?;
        let base = Url::parse(&current).map_err(|e| ScanError::UnreadablePage {
            url: current.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { html, base })
    }
}

/// One way of turning a career site into postings.
#[async_trait]
pub trait Strategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    async fn extract(
        &self,
        page: &dyn PageControl,
        ctx: &ExtractionContext<'_>,
    ) -> Result<Vec<Posting>>;
}

impl StrategyKind {
    /// The extraction behaviour behind this kind.
    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            Self::Generic => &GenericStrategy,
            Self::Workday => &WorkdayStrategy,
            Self::Greenhouse => &GreenhouseStrategy,
            Self::Lever => &LeverStrategy,
            Self::GoogleCustom => &GoogleStrategy,
            Self::NetflixCustom => &NetflixStrategy,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_maps_to_its_strategy() {
        for kind in [
            StrategyKind::Generic,
            StrategyKind::Workday,
            StrategyKind::Greenhouse,
            StrategyKind::Lever,
            StrategyKind::GoogleCustom,
            StrategyKind::NetflixCustom,
        ] {
            assert_eq!(kind.strategy().kind(), kind);
        }
    }

    #[test]
    fn test_settings_follow_config() {
        let settings = ScanSettings::default();
        assert_eq!(settings.navigation_timeout, Duration::from_secs(60));
        assert_eq!(settings.selector_timeout, Duration::from_secs(10));
        assert_eq!(settings.scroll.step_px(), 100);
    }
}
