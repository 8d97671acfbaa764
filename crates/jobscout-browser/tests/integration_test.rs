use jobscout_browser::{BrowserEngine, ClientIdentity, LoadSignal, PageControl, SessionProvider};
use std::time::Duration;

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_browser_session_launch() {
    let engine = BrowserEngine::new(ClientIdentity::desktop_chrome());
    let session = engine.open().await;
    assert!(session.is_ok(), "Failed to launch browser session");
    session.unwrap().close().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_navigation_and_scroll_metrics() {
    let engine = BrowserEngine::new(ClientIdentity::desktop_chrome());
    let page = engine.launch().await.unwrap();

    page.navigate(
        "https://example.com",
        LoadSignal::ContentLoaded,
        Duration::from_secs(60),
    )
    .await
    .expect("navigation failed");

    let metrics = page.scroll_metrics().await.unwrap();
    assert!(metrics.viewport_height > 0);
    assert!(page.content().await.unwrap().contains("Example Domain"));

    page.close().await.unwrap();
}
