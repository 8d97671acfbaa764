use super::{ExtractionContext, PageSnapshot, Strategy};
use crate::dom;
use crate::error::Result;
use crate::resolver::StrategyKind;
use async_trait::async_trait;
use jobscout_browser::{LoadSignal, PageControl};
use jobscout_core::Posting;
use scraper::Html;

/// Classic job board openings and the table layout of newer boards.
const OPENINGS: &str = "div.opening, tr.job-row";

#[derive(Debug, Clone, Copy, Default)]
pub struct GreenhouseStrategy;

#[async_trait]
impl Strategy for GreenhouseStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Greenhouse
    }

    async fn extract(
        &self,
        page: &dyn PageControl,
        ctx: &ExtractionContext<'_>,
    ) -> Result<Vec<Posting>> {
        page.navigate(ctx.url, LoadSignal::ContentLoaded, ctx.settings.navigation_timeout)
            .await?;
        let snapshot = PageSnapshot::capture(page).await?;
        parse(&snapshot, ctx)
    }
}

fn parse(snapshot: &PageSnapshot, ctx: &ExtractionContext<'_>) -> Result<Vec<Posting>> {
    let document = Html::parse_document(&snapshot.html);
    let openings = dom::parse_selector(OPENINGS)?;

    let mut postings = Vec::new();
    for opening in document.select(&openings) {
        let Some(anchor) = dom::first_anchor(opening) else {
            continue;
        };
        let Some(link) = anchor
            .value()
            .attr("href")
            .and_then(|href| dom::resolve_link(&snapshot.base, href))
        else {
            continue;
        };
        let text = dom::inner_text(anchor);
        if !ctx.keywords.matches(&text) {
            continue;
        }
        let title = dom::first_line(&text);
        if !title.is_empty() {
            postings.push(ctx.posting(title, link));
        }
    }
    Ok(postings)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, fast_settings, single_site};
    use super::*;
    use crate::filter::KeywordFilter;

    const URL: &str = "https://boards.greenhouse.io/acme";

    #[tokio::test]
    async fn test_openings_and_job_rows() {
        let page = single_site(
            URL,
            r#"<section>
                 <div class="opening"><a href="/acme/jobs/1">Senior Engineer</a><span class="location">Remote</span></div>
                 <div class="opening"><a href="/acme/jobs/2">Account Executive</a></div>
                 <div class="opening"><span>Engineer without link</span></div>
               </section>
               <table><tr class="job-row"><td><a href="https://boards.greenhouse.io/acme/jobs/3">Staff Engineer</a></td><td>NYC</td></tr></table>"#,
        );
        let keywords = KeywordFilter::new(["engineer"]);
        let settings = fast_settings();
        let ctx = context("Acme", URL, &keywords, &settings);

        let postings = GreenhouseStrategy.extract(&page, &ctx).await.unwrap();

        let titles: Vec<_> = postings.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Senior Engineer", "Staff Engineer"]);
        assert_eq!(postings[0].url, "https://boards.greenhouse.io/acme/jobs/1");
    }

    #[tokio::test]
    async fn test_uses_content_loaded_and_skips_scrolling() {
        let page = single_site(URL, "<div class='opening'><a href='/1'>Engineer</a></div>");
        let keywords = KeywordFilter::new(["engineer"]);
        let settings = fast_settings();
        let ctx = context("Acme", URL, &keywords, &settings);

        GreenhouseStrategy.extract(&page, &ctx).await.unwrap();

        assert_eq!(page.navigations()[0].signal, LoadSignal::ContentLoaded);
        assert_eq!(page.scroll_calls(), 0);
    }
}
