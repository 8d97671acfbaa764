use super::{ExtractionContext, PageSnapshot, Strategy};
use crate::dom;
use crate::error::Result;
use crate::resolver::StrategyKind;
use async_trait::async_trait;
use jobscout_browser::{LoadSignal, PageControl, WaitOutcome};
use jobscout_core::Posting;
use scraper::Html;

/// Structures that show the job list has rendered.
const READY_SELECTORS: &[&str] = &[r#"[data-automation-id="jobTitle"]"#, "h3", r#"ul[role="list"]"#];

const TITLE_ELEMENTS: &str = r#"[data-automation-id="jobTitle"], h3 a"#;

/// Headings carry the bare title; link text often adds location lines.
const NESTED_TITLE: &str = r#"h2, h3, h4, [data-automation-id="jobTitle"]"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct WorkdayStrategy;

#[async_trait]
impl Strategy for WorkdayStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Workday
    }

    async fn extract(
        &self,
        page: &dyn PageControl,
        ctx: &ExtractionContext<'_>,
    ) -> Result<Vec<Posting>> {
        page.navigate(ctx.url, LoadSignal::NetworkIdle, ctx.settings.navigation_timeout)
            .await?;

        if page
            .wait_for_any(READY_SELECTORS, ctx.settings.selector_timeout)
            .await?
            == WaitOutcome::TimedOut
        {
            tracing::info!(company = ctx.company, "Workday wait timeout - proceeding anyway");
        }

        ctx.settings.scroll.auto_scroll(page).await?;
        let snapshot = PageSnapshot::capture(page).await?;
        parse(&snapshot, ctx)
    }
}

fn parse(snapshot: &PageSnapshot, ctx: &ExtractionContext<'_>) -> Result<Vec<Posting>> {
    let document = Html::parse_document(&snapshot.html);
    let titles = dom::parse_selector(TITLE_ELEMENTS)?;
    let nested = dom::parse_selector(NESTED_TITLE)?;

    let mut postings = Vec::new();
    for element in document.select(&titles) {
        let Some(link) = dom::closest_href(element)
            .and_then(|href| dom::resolve_link(&snapshot.base, href))
        else {
            continue;
        };
        let text = dom::inner_text(element);
        if !ctx.keywords.matches(&text) {
            continue;
        }

        let heading = dom::find_descendant(element, &nested).map(dom::inner_text);
        let title = heading
            .as_deref()
            .map(dom::first_line)
            .filter(|line| !line.is_empty())
            .unwrap_or_else(|| dom::first_line(&text));
        if title.is_empty() {
            continue;
        }
        postings.push(ctx.posting(title, link));
    }
    Ok(postings)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{context, fast_settings, single_site};
    use super::*;
    use crate::filter::KeywordFilter;
    use jobscout_browser::{FixturePage, FixtureSite};

    const URL: &str = "https://acme.wd5.myworkdayjobs.com/en-US/External";

    async fn run(page: &FixturePage) -> Result<Vec<Posting>> {
        let keywords = KeywordFilter::new(["Engineer"]);
        let settings = fast_settings();
        let ctx = context("Acme", URL, &keywords, &settings);
        WorkdayStrategy.extract(page, &ctx).await
    }

    #[tokio::test]
    async fn test_extracts_automation_titles() {
        let page = single_site(
            URL,
            r#"<ul role="list">
                 <li><a href="/en-US/External/job/Austin/Software-Engineer_R1" data-automation-id="jobTitle">Software Engineer</a></li>
                 <li><a href="/en-US/External/job/Austin/Recruiter_R2" data-automation-id="jobTitle">Recruiter</a></li>
               </ul>"#,
        );

        let postings = run(&page).await.unwrap();

        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Software Engineer");
        assert_eq!(
            postings[0].url,
            "https://acme.wd5.myworkdayjobs.com/en-US/External/job/Austin/Software-Engineer_R1"
        );
    }

    #[tokio::test]
    async fn test_prefers_nested_heading_over_link_text() {
        let page = single_site(
            URL,
            r#"<h3><a href="/job/1"><h4>Data Engineer</h4><span>Austin, TX</span></a></h3>"#,
        );

        let postings = run(&page).await.unwrap();

        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Data Engineer");
    }

    #[tokio::test]
    async fn test_selector_timeout_is_not_fatal() {
        // Nothing matches the ready selectors; extraction still runs.
        let page = single_site(URL, "<div>Loading</div>");

        let postings = run(&page).await.unwrap();

        assert!(postings.is_empty());
        assert_eq!(page.navigations().len(), 1);
        assert!(page.scroll_calls() > 0);
    }

    #[tokio::test]
    async fn test_resolves_links_against_redirected_url() {
        let page = FixturePage::new().with_site(
            "https://careers.adobe.com/jobs",
            FixtureSite::html(
                r#"<a href="job/42"><span data-automation-id="jobTitle">Engineer II</span></a>"#,
            )
            .redirected_to("https://adobe.wd5.myworkdayjobs.com/external/"),
        );
        let keywords = KeywordFilter::new(["engineer"]);
        let settings = fast_settings();
        let ctx = context("Adobe", "https://careers.adobe.com/jobs", &keywords, &settings);

        let postings = WorkdayStrategy.extract(&page, &ctx).await.unwrap();

        assert_eq!(postings.len(), 1);
        assert_eq!(
            postings[0].url,
            "https://adobe.wd5.myworkdayjobs.com/external/job/42"
        );
    }

    #[tokio::test]
    async fn test_navigation_failure_propagates() {
        let page = FixturePage::new()
            .with_site(URL, FixtureSite::failing("net::ERR_CONNECTION_RESET"));
        assert!(run(&page).await.is_err());
    }
}
