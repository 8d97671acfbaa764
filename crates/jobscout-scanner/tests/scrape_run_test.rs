mod common;

use common::{target, MemoryStore, RecordingNotifier};
use jobscout_browser::{FixturePage, FixtureProvider, FixtureSite, LoadSignal};
use jobscout_scanner::{ScanError, ScanSettings, ScrapeOrchestrator, ScrollDriver};
use std::sync::Arc;
use std::time::Duration;

const ACME: &str = "https://acme.example/careers";
const GLOBEX: &str = "https://boards.greenhouse.io/globex";
const INITECH: &str = "https://initech.wd1.myworkdayjobs.com/External";

fn fast_settings() -> ScanSettings {
    ScanSettings {
        user_agent: "JobScout/test".to_string(),
        navigation_timeout: Duration::from_secs(1),
        selector_timeout: Duration::from_millis(10),
        scroll: ScrollDriver::new(100, Duration::from_millis(1)),
    }
}

fn acme_page() -> FixtureSite {
    FixtureSite::html(format!(
        "<nav><a href='/about'>About Acme</a></nav>\
         <a href='/jobs/1'>Engineer I</a>\
         <a href='/jobs/2'>Engineer {}</a>",
        "x".repeat(151)
    ))
}

fn globex_page() -> FixtureSite {
    FixtureSite::html(
        "<div class='opening'><a href='/globex/jobs/77'>Senior Engineer</a><span>Remote</span></div>",
    )
}

struct Harness {
    store: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
    page: Arc<FixturePage>,
    provider: FixtureProvider,
    orchestrator: ScrapeOrchestrator,
}

fn harness(store: MemoryStore, page: FixturePage, notifier: RecordingNotifier) -> Harness {
    let store = Arc::new(store);
    let notifier = Arc::new(notifier);
    let page = Arc::new(page);
    let provider = FixtureProvider::new(page.clone());
    let orchestrator =
        ScrapeOrchestrator::new(store.clone(), Arc::new(provider.clone()), notifier.clone())
            .with_recipient("me@example.com")
            .with_settings(fast_settings());
    Harness {
        store,
        notifier,
        page,
        provider,
        orchestrator,
    }
}

fn two_target_harness(store_tweak: impl FnOnce(MemoryStore) -> MemoryStore) -> Harness {
    let store = MemoryStore::new(
        vec![target("a", "Acme", ACME), target("b", "Globex", GLOBEX)],
        &["Engineer"],
    );
    let page = FixturePage::new()
        .with_site(ACME, acme_page())
        .with_site(GLOBEX, globex_page());
    harness(store_tweak(store), page, RecordingNotifier::default())
}

#[tokio::test]
async fn test_end_to_end_generic_and_greenhouse() {
    let h = two_target_harness(|s| s);

    let summary = h.orchestrator.run().await.unwrap();

    assert_eq!(summary.targets_attempted, 2);
    assert_eq!(summary.targets_failed, 0);
    assert_eq!(summary.postings_found, 2);
    assert_eq!(summary.postings_new, 2);
    assert!(summary.notified);

    let calls = h.notifier.calls();
    assert_eq!(calls.len(), 1);
    let (recipient, postings) = &calls[0];
    assert_eq!(recipient, "me@example.com");
    let urls: Vec<_> = postings.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        [
            "https://acme.example/jobs/1",
            "https://boards.greenhouse.io/globex/jobs/77"
        ]
    );
    assert_eq!(postings[0].company_name, "Acme");
    assert_eq!(postings[1].title, "Senior Engineer");

    // One session for the whole run, identity set, released afterwards.
    assert_eq!(h.provider.opened(), 1);
    assert_eq!(h.page.user_agent().as_deref(), Some("JobScout/test"));
    assert!(h.page.is_closed());
    let signals: Vec<_> = h.page.navigations().iter().map(|n| n.signal).collect();
    assert_eq!(signals, [LoadSignal::NetworkIdle, LoadSignal::ContentLoaded]);
}

#[tokio::test]
async fn test_failing_target_does_not_affect_others() {
    let store = MemoryStore::new(
        vec![
            target("w", "Initech", INITECH),
            target("a", "Acme", ACME),
            target("b", "Globex", GLOBEX),
        ],
        &["Engineer"],
    );
    let page = FixturePage::new()
        .with_site(INITECH, FixtureSite::failing("net::ERR_TIMED_OUT"))
        .with_site(ACME, acme_page())
        .with_site(GLOBEX, globex_page());
    let h = harness(store, page, RecordingNotifier::default());

    let summary = h.orchestrator.run().await.unwrap();

    assert_eq!(summary.targets_attempted, 3);
    assert_eq!(summary.targets_failed, 1);
    assert_eq!(summary.postings_new, 2);
    assert_eq!(h.notifier.calls().len(), 1);
}

#[tokio::test]
async fn test_inactive_targets_are_skipped() {
    let mut globex = target("b", "Globex", GLOBEX);
    globex.active = false;
    let store = MemoryStore::new(vec![target("a", "Acme", ACME), globex], &["Engineer"]);
    let page = FixturePage::new().with_site(ACME, acme_page());
    let h = harness(store, page, RecordingNotifier::default());

    let summary = h.orchestrator.run().await.unwrap();

    assert_eq!(summary.targets_attempted, 1);
    assert_eq!(h.page.navigations().len(), 1);
}

#[tokio::test]
async fn test_second_run_stores_nothing_new_and_skips_notification() {
    let h = two_target_harness(|s| s);

    let first = h.orchestrator.run().await.unwrap();
    let second = h.orchestrator.run().await.unwrap();

    assert_eq!(first.postings_new, 2);
    assert_eq!(second.postings_found, 2);
    assert_eq!(second.postings_new, 0);
    assert!(!second.notified);
    assert_eq!(h.notifier.calls().len(), 1);
    assert_eq!(h.store.stored().len(), 2);
}

#[tokio::test]
async fn test_known_posting_is_not_counted_as_new() {
    let h = two_target_harness(|s| s.already_known("https://acme.example/jobs/1"));

    let summary = h.orchestrator.run().await.unwrap();

    assert_eq!(summary.postings_new, 1);
    assert_eq!(h.notifier.calls()[0].1.len(), 1);
}

#[tokio::test]
async fn test_persistence_failure_skips_only_that_posting() {
    let h = two_target_harness(|s| s.failing_on("https://acme.example/jobs/1"));

    let summary = h.orchestrator.run().await.unwrap();

    assert_eq!(summary.targets_failed, 0);
    assert_eq!(summary.postings_found, 2);
    assert_eq!(summary.postings_new, 1);
    assert_eq!(
        h.store.stored()[0].url,
        "https://boards.greenhouse.io/globex/jobs/77"
    );
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_run() {
    let store = MemoryStore::new(vec![target("b", "Globex", GLOBEX)], &["Engineer"]);
    let page = FixturePage::new().with_site(GLOBEX, globex_page());
    let h = harness(store, page, RecordingNotifier::failing());

    let summary = h.orchestrator.run().await.unwrap();

    assert_eq!(summary.postings_new, 1);
    assert!(!summary.notified);
    assert_eq!(h.store.stored().len(), 1);
}

#[tokio::test]
async fn test_nothing_to_do_opens_no_session() {
    let store = MemoryStore::new(vec![target("a", "Acme", ACME)], &[]);
    let h = harness(store, FixturePage::new(), RecordingNotifier::default());

    let summary = h.orchestrator.run().await.unwrap();

    assert_eq!(summary.targets_attempted, 0);
    assert!(summary.error.is_none());
    assert_eq!(h.provider.opened(), 0);
}

#[tokio::test]
async fn test_session_failure_is_reported_in_summary() {
    let store = Arc::new(MemoryStore::new(vec![target("a", "Acme", ACME)], &["Engineer"]));
    let notifier = Arc::new(RecordingNotifier::default());
    let orchestrator = ScrapeOrchestrator::new(
        store,
        Arc::new(FixtureProvider::failing()),
        notifier.clone(),
    );

    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.targets_attempted, 0);
    assert!(summary.error.unwrap().contains("Chrome"));
    assert!(notifier.calls().is_empty());
}

#[tokio::test]
async fn test_store_failure_is_reported_in_summary() {
    let h = two_target_harness(MemoryStore::failing_listing);

    let summary = h.orchestrator.run().await.unwrap();

    assert!(summary.error.unwrap().contains("database is locked"));
    assert_eq!(h.provider.opened(), 0);
}

#[tokio::test]
async fn test_overlapping_run_is_rejected() {
    let h = two_target_harness(|s| s);

    let (first, second) = tokio::join!(h.orchestrator.run(), h.orchestrator.run());

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(ScanError::RunInProgress))));
    assert!(!h.orchestrator.is_running());
}
