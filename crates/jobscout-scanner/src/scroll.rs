//! Incremental scrolling so lazily rendered listings get loaded.

use crate::error::Result;
use jobscout_browser::PageControl;
use jobscout_core::ScanningConfig;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Hard stop for feeds that keep growing faster than we scroll.
const MAX_SCROLL_TICKS: u32 = 5_000;

/// Shortest tick period; `tokio::time::interval` rejects zero.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Scrolls a page by a fixed step on a fixed interval until the distance
/// covered reaches the document height minus one viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollDriver {
    step_px: u32,
    interval: Duration,
}

impl ScrollDriver {
    pub fn new(step_px: u32, interval: Duration) -> Self {
        Self {
            step_px: step_px.max(1),
            interval: interval.max(MIN_INTERVAL),
        }
    }

    pub fn step_px(&self) -> u32 {
        self.step_px
    }

    /// Scroll to the bottom, returning the number of ticks taken.
    ///
    /// The document height is re-read on every tick, so content appended
    /// while scrolling extends the run.
    pub async fn auto_scroll(&self, page: &dyn PageControl) -> Result<u32> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        let mut covered: u64 = 0;
        let mut ticks = 0;
        loop {
            ticker.tick().await;
            let metrics = page.scroll_metrics().await?;
            page.scroll_by(self.step_px).await?;
            covered += u64::from(self.step_px);
            ticks += 1;

            let bottom = metrics.scroll_height.saturating_sub(metrics.viewport_height);
            if covered >= u64::from(bottom) {
                break;
            }
            if ticks >= MAX_SCROLL_TICKS {
                tracing::warn!(ticks, covered, "page kept growing, stopped scrolling");
                break;
            }
        }

        tracing::debug!(ticks, covered, "scrolled to bottom");
        Ok(ticks)
    }
}

impl Default for ScrollDriver {
    fn default() -> Self {
        Self::from(&ScanningConfig::default())
    }
}

impl From<&ScanningConfig> for ScrollDriver {
    fn from(config: &ScanningConfig) -> Self {
        Self::new(config.scroll_step_px, config.scroll_interval())
    }
}
