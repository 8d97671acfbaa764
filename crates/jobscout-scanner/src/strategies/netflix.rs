use super::{ExtractionContext, PageSnapshot, Strategy};
use crate::dom;
use crate::error::Result;
use crate::filter::{length_within, NETFLIX_TEXT_LEN};
use crate::resolver::StrategyKind;
use async_trait::async_trait;
use jobscout_browser::{LoadSignal, PageControl};
use jobscout_core::Posting;
use scraper::Html;

/// Class names are obfuscated; job detail links are the stable part.
const JOB_LINKS: &str = r#"a[href*="/jobs/"]"#;

/// Search results URL for one role keyword.
pub fn netflix_search_url(keyword: &str) -> String {
    format!("https://jobs.netflix.com/search?q={}", urlencoding::encode(keyword))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NetflixStrategy;

#[async_trait]
impl Strategy for NetflixStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::NetflixCustom
    }

    async fn extract(
        &self,
        page: &dyn PageControl,
        ctx: &ExtractionContext<'_>,
    ) -> Result<Vec<Posting>> {
        let mut postings = Vec::new();
        for keyword in ctx.keywords.keywords() {
            let search_url = netflix_search_url(keyword);
            page.navigate(&search_url, LoadSignal::NetworkIdle, ctx.settings.navigation_timeout)
                .await?;
            // Results render lazily.
            ctx.settings.scroll.auto_scroll(page).await?;
            let snapshot = PageSnapshot::capture(page).await?;
            postings.extend(parse(&snapshot, ctx)?);
        }
        Ok(postings)
    }
}

fn parse(snapshot: &PageSnapshot, ctx: &ExtractionContext<'_>) -> Result<Vec<Posting>> {
    let document = Html::parse_document(&snapshot.html);
    let links = dom::parse_selector(JOB_LINKS)?;

    let mut postings = Vec::new();
    for anchor in document.select(&links) {
        let Some(link) = anchor
            .value()
            .attr("href")
            .and_then(|href| dom::resolve_link(&snapshot.base, href))
        else {
            continue;
        };
        let text = dom::inner_text(anchor);
        if !length_within(&text, &NETFLIX_TEXT_LEN) {
            continue;
        }
        postings.push(ctx.posting(dom::first_line(&text), link));
    }
    Ok(postings)
}
