//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the engine
//! end-to-end against them.

use paexkey::config::CrawlConfig;
use paexkey::crawler::{CrawlEngine, SkipReason};
use paexkey::output::MemorySink;
use paexkey::state::EntryState;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration seeded at the mock server root
fn create_test_config(server: &MockServer, max_depth: u32) -> CrawlConfig {
    let seed = Url::parse(&format!("{}/", server.uri())).expect("Failed to parse seed URL");
    let mut config = CrawlConfig::new(seed);
    config.max_depth = max_depth;
    config.workers = 4;
    config.request_timeout = Duration::from_secs(5);
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_relative_link_discovered_at_depth_one() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<html><body><a href="/b">b</a></body></html>"#).await;
    mount_page(&server, "/b", "<html><body><p>leaf</p></body></html>").await;

    let mut engine = CrawlEngine::new(create_test_config(&server, 1), MemorySink::new())
        .expect("Failed to create engine");
    let stats = engine.run().await.expect("Crawl failed");

    assert_eq!(engine.sink().urls(), vec![format!("{}/b", base)]);
    assert!(engine.visited().contains(&format!("{}/", base)));
    assert!(engine.visited().contains(&format!("{}/b", base)));
    assert_eq!(stats.pages_fetched, 2);
    assert_eq!(stats.pages_extracted, 2);
    assert_eq!(stats.deepest_level, 1);
    assert_eq!(stats.state_count(EntryState::Completed), 2);
}

#[tokio::test]
async fn test_binary_content_visited_without_extraction() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"\x89PNG\r\n\x1a\n<a href=\"/x\">".to_vec(), "image/png"),
        )
        .mount(&server)
        .await;

    let mut engine = CrawlEngine::new(create_test_config(&server, 2), MemorySink::new())
        .expect("Failed to create engine");
    let stats = engine.run().await.expect("Crawl failed");

    assert!(engine.sink().urls().is_empty());
    assert!(engine.visited().contains(&format!("{}/", base)));
    assert_eq!(stats.skipped_count(SkipReason::UnsupportedContentType), 1);
    assert_eq!(stats.pages_extracted, 0);
    assert_eq!(stats.state_count(EntryState::SkippedNoExtract), 1);
}

#[tokio::test]
async fn test_max_depth_zero_fetches_only_seed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/b">b</a><a href="/c">c</a></body></html>"#,
    )
    .await;

    for route in ["/b", "/c"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html("<p>never fetched</p>"))
            .expect(0)
            .mount(&server)
            .await;
    }

    let mut engine = CrawlEngine::new(create_test_config(&server, 0), MemorySink::new())
        .expect("Failed to create engine");
    let stats = engine.run().await.expect("Crawl failed");

    assert_eq!(
        engine.sink().urls(),
        vec![format!("{}/b", base), format!("{}/c", base)]
    );
    assert_eq!(stats.pages_fetched, 1);
    assert_eq!(stats.urls_enqueued, 1);
    assert_eq!(stats.deepest_level, 0);
    assert_eq!(engine.visited().len(), 1);
}

#[tokio::test]
async fn test_not_found_is_not_visited() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            br#"<a href="/hidden">hidden</a>"#.to_vec(),
            "text/html",
        ))
        .mount(&server)
        .await;

    let mut engine = CrawlEngine::new(create_test_config(&server, 2), MemorySink::new())
        .expect("Failed to create engine");
    let stats = engine.run().await.expect("Crawl failed");

    assert!(engine.sink().urls().is_empty());
    assert!(!engine.visited().contains(&format!("{}/", base)));
    assert_eq!(stats.skipped_count(SkipReason::NonSuccessStatus), 1);
    assert_eq!(stats.pages_fetched, 0);
}

#[tokio::test]
async fn test_links_beyond_max_depth_recorded_but_not_fetched() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="/a">a</a>"#).await;
    mount_page(&server, "/a", r#"<a href="/deep">deep</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/deep"))
        .respond_with(html("<p>too deep</p>"))
        .expect(0)
        .mount(&server)
        .await;

    let mut engine = CrawlEngine::new(create_test_config(&server, 1), MemorySink::new())
        .expect("Failed to create engine");
    engine.run().await.expect("Crawl failed");

    let urls = engine.sink().urls();
    assert_eq!(urls, vec![format!("{}/a", base), format!("{}/deep", base)]);
    assert!(!engine.visited().contains(&format!("{}/deep", base)));
}

#[tokio::test]
async fn test_shared_page_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="/x">x</a> <a href="/y">y</a>"#).await;
    mount_page(&server, "/x", r#"<a href="/shared">s</a> <a href="/">home</a>"#).await;
    mount_page(&server, "/y", r#"<a href="/shared">s</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(html("<p>shared</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut engine = CrawlEngine::new(create_test_config(&server, 2), MemorySink::new())
        .expect("Failed to create engine");
    let stats = engine.run().await.expect("Crawl failed");

    let urls = engine.sink().urls();
    // Seed was visited before /x linked back to it
    assert!(!urls.contains(&format!("{}/", base)));
    // Both level-1 pages saw /shared before it was fetched
    assert_eq!(
        urls.iter()
            .filter(|u| **u == format!("{}/shared", base))
            .count(),
        2
    );
    assert_eq!(stats.pages_fetched, 4);
    assert_eq!(stats.state_count(EntryState::Discarded), 1);
}

#[tokio::test]
async fn test_undecodable_page_marked_visited() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="/bad">bad</a> <a href="/good">good</a>"#).await;
    mount_page(&server, "/good", r#"<a href="/bad">bad again</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0xff, 0xfe, 0xfd], "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let mut engine = CrawlEngine::new(create_test_config(&server, 2), MemorySink::new())
        .expect("Failed to create engine");
    let stats = engine.run().await.expect("Crawl failed");

    assert!(engine.visited().contains(&format!("{}/bad", base)));
    assert_eq!(stats.skipped_count(SkipReason::DecodeError), 1);
    // /good ran after /bad was marked, so it adds nothing
    assert_eq!(
        engine.sink().urls(),
        vec![format!("{}/bad", base), format!("{}/good", base)]
    );
}

#[tokio::test]
async fn test_server_error_retried_from_later_level() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="/flaky">f</a> <a href="/other">o</a>"#).await;
    mount_page(&server, "/other", r#"<a href="/flaky">f</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let mut engine = CrawlEngine::new(create_test_config(&server, 2), MemorySink::new())
        .expect("Failed to create engine");
    let stats = engine.run().await.expect("Crawl failed");

    assert!(!engine.visited().contains(&format!("{}/flaky", base)));
    assert_eq!(stats.skipped_count(SkipReason::NonSuccessStatus), 2);
}

#[tokio::test]
async fn test_resource_strategies_through_fetch() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<html><head>
        <link rel="stylesheet" href="/css/site.css">
        <script src="/js/app.js"></script>
        <style>body { background: url('/img/bg.png'); }</style>
        </head><body><a href="docs/">docs</a></body></html>"#,
    )
    .await;

    let mut engine = CrawlEngine::new(create_test_config(&server, 0), MemorySink::new())
        .expect("Failed to create engine");
    engine.run().await.expect("Crawl failed");

    let urls = engine.sink().urls();
    for expected in ["/css/site.css", "/js/app.js", "/img/bg.png", "/docs/"] {
        let expected = format!("{}{}", base, expected);
        assert!(urls.contains(&expected), "missing {} in {:?}", expected, urls);
    }
}

#[tokio::test]
async fn test_textual_non_html_is_extracted() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<script src="/app.js"></script>"#).await;
    Mock::given(method("GET"))
        .and(path("/app.js"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"// items live at https://api.example.com/v1/items\nload();\n".to_vec(),
            "application/javascript",
        ))
        .mount(&server)
        .await;

    let mut engine = CrawlEngine::new(create_test_config(&server, 1), MemorySink::new())
        .expect("Failed to create engine");
    let stats = engine.run().await.expect("Crawl failed");

    let urls = engine.sink().urls();
    assert!(urls.contains(&format!("{}/app.js", base)));
    assert!(urls.contains(&"https://api.example.com/v1/items".to_string()));
    assert_eq!(stats.pages_extracted, 2);
}
