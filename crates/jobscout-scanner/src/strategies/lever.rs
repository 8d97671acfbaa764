use super::{ExtractionContext, PageSnapshot, Strategy};
use crate::dom;
use crate::error::Result;
use crate::resolver::StrategyKind;
use async_trait::async_trait;
use jobscout_browser::{LoadSignal, PageControl};
use jobscout_core::Posting;
use scraper::{ElementRef, Html};

const POSTINGS: &str = "a.posting-title, div.posting";

/// Lever puts the bare title in an `h5` and location beside it.
const NESTED_TITLE: &str = "h5";

#[derive(Debug, Clone, Copy, Default)]
pub struct LeverStrategy;

#[async_trait]
impl Strategy for LeverStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Lever
    }

    async fn extract(
        &self,
        page: &dyn PageControl,
        ctx: &ExtractionContext<'_>,
    ) -> Result<Vec<Posting>> {
        page.navigate(ctx.url, LoadSignal::ContentLoaded, ctx.settings.navigation_timeout)
            .await?;
        ctx.settings.scroll.auto_scroll(page).await?;
        let snapshot = PageSnapshot::capture(page).await?;
        parse(&snapshot, ctx)
    }
}

/// The posting element itself when it is a link, otherwise its first anchor.
fn posting_link(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if element.value().name() == "a" && element.value().attr("href").is_some() {
        Some(element)
    } else {
        dom::first_anchor(element)
    }
}

fn parse(snapshot: &PageSnapshot, ctx: &ExtractionContext<'_>) -> Result<Vec<Posting>> {
    let document = Html::parse_document(&snapshot.html);
    let postings_selector = dom::parse_selector(POSTINGS)?;
    let nested = dom::parse_selector(NESTED_TITLE)?;

    let mut postings = Vec::new();
    for element in document.select(&postings_selector) {
        let Some(anchor) = posting_link(element) else {
            continue;
        };
        let Some(link) = anchor
            .value()
            .attr("href")
            .and_then(|href| dom::resolve_link(&snapshot.base, href))
        else {
            continue;
        };
        if !ctx.keywords.matches(&dom::inner_text(element)) {
            continue;
        }

        let raw_title = dom::find_descendant(element, &nested)
            .map(dom::inner_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| dom::inner_text(anchor));
        let title = dom::first_line(&raw_title);
        if !title.is_empty() {
            postings.push(ctx.posting(title, link));
        }
    }
    Ok(postings)
}
