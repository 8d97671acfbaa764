use super::{ExtractionContext, PageSnapshot, Strategy};
use crate::dom;
use crate::error::Result;
use crate::resolver::StrategyKind;
use async_trait::async_trait;
use jobscout_browser::{LoadSignal, PageControl};
use jobscout_core::Posting;
use scraper::Html;

const RESULTS_BASE: &str = "https://www.google.com/about/careers/applications/jobs/results/";

/// Search results URL for one role keyword, restricted to the United States.
pub fn google_search_url(keyword: &str) -> String {
    format!(
        "{RESULTS_BASE}?q={}&location=United%20States",
        urlencoding::encode(keyword)
    )
}

/// One search per keyword; every result list item with a heading and a
/// link is a posting.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleStrategy;

#[async_trait]
impl Strategy for GoogleStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::GoogleCustom
    }

    async fn extract(
        &self,
        page: &dyn PageControl,
        ctx: &ExtractionContext<'_>,
    ) -> Result<Vec<Posting>> {
        let mut postings = Vec::new();
        for keyword in ctx.keywords.keywords() {
            let search_url = google_search_url(keyword);
            tracing::debug!(url = %search_url, "Navigating to Google search");
            page.navigate(&search_url, LoadSignal::NetworkIdle, ctx.settings.navigation_timeout)
                .await?;
            let snapshot = PageSnapshot::capture(page).await?;
            postings.extend(parse(&snapshot, ctx)?);
        }
        Ok(postings)
    }
}

fn parse(snapshot: &PageSnapshot, ctx: &ExtractionContext<'_>) -> Result<Vec<Posting>> {
    let document = Html::parse_document(&snapshot.html);
    let items = dom::parse_selector("li")?;
    let heading = dom::parse_selector("h3")?;

    let mut postings = Vec::new();
    for item in document.select(&items) {
        let (Some(title_el), Some(anchor)) =
            (dom::find_descendant(item, &heading), dom::first_anchor(item))
        else {
            continue;
        };
        let Some(link) = anchor
            .value()
            .attr("href")
            .and_then(|href| dom::resolve_link(&snapshot.base, href))
        else {
            continue;
        };
        let text = dom::inner_text(title_el);
        let title = dom::first_line(&text);
        if !title.is_empty() {
            postings.push(ctx.posting(title, link));
        }
    }
    Ok(postings)
}
