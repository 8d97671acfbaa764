use super::{ExtractionContext, PageSnapshot, Strategy};
use crate::dedup::dedup_by_url;
use crate::dom;
use crate::error::Result;
use crate::filter::{length_within, GENERIC_TEXT_LEN};
use crate::resolver::StrategyKind;
use async_trait::async_trait;
use jobscout_browser::{LoadSignal, PageControl};
use jobscout_core::Posting;
use scraper::Html;

/// Plain links, ARIA link containers, heading links and list-item links.
const CANDIDATES: &str = r#"a, div[role="link"], h2 a, h3 a, li a"#;

/// Keyword and title-length heuristics over every link-like element.
///
/// Never fails: any error is logged and yields no postings.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericStrategy;

#[async_trait]
impl Strategy for GenericStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Generic
    }

    async fn extract(
        &self,
        page: &dyn PageControl,
        ctx: &ExtractionContext<'_>,
    ) -> Result<Vec<Posting>> {
        match scrape(page, ctx).await {
            Ok(postings) => Ok(postings),
            Err(e) => {
                tracing::warn!(company = ctx.company, error = %e, "Smart scrape failed");
                Ok(Vec::new())
            }
        }
    }
}

async fn scrape(page: &dyn PageControl, ctx: &ExtractionContext<'_>) -> Result<Vec<Posting>> {
    page.navigate(ctx.url, LoadSignal::NetworkIdle, ctx.settings.navigation_timeout)
        .await?;
    ctx.settings.scroll.auto_scroll(page).await?;
    let snapshot = PageSnapshot::capture(page).await?;
    parse(&snapshot, ctx)
}

fn parse(snapshot: &PageSnapshot, ctx: &ExtractionContext<'_>) -> Result<Vec<Posting>> {
    let document = Html::parse_document(&snapshot.html);
    let candidates = dom::parse_selector(CANDIDATES)?;

    let mut postings = Vec::new();
    for element in document.select(&candidates) {
        let Some(link) = dom::own_or_descendant_href(element)
            .and_then(|href| dom::resolve_link(&snapshot.base, href))
        else {
            continue;
        };
        let text = dom::inner_text(element);
        if text.is_empty()
            || !ctx.keywords.matches(&text)
            || !length_within(&text, &GENERIC_TEXT_LEN)
        {
            continue;
        }
        let title = dom::capitalize_first(dom::first_line(&text));
        postings.push(ctx.posting(&title, link));
    }

    Ok(dedup_by_url(postings))
}
