//! Integration tests for file output and keyword filtering
//!
//! A full `crawl` run against a mock server, writing into a temporary output
//! directory.

use paexkey::config::{resolve_settings, Overrides, Settings};
use paexkey::crawler::crawl;
use paexkey::url::output_domain;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start_site() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            br#"<html><body>
            <a href="/admin/login">login</a>
            <a href="/home">home</a>
            </body></html>"#
                .to_vec(),
            "text/html",
        ))
        .mount(&server)
        .await;

    server
}

fn settings_for(
    server: &MockServer,
    output: &Path,
    keywords: Option<PathBuf>,
    delete_input: bool,
) -> Settings {
    let overrides = Overrides {
        seed_url: format!("{}/", server.uri()),
        max_depth: Some(0),
        threads: Some(2),
        output_dir: Some(output.to_path_buf()),
        keywords,
        delete_input,
        ..Default::default()
    };
    resolve_settings(overrides, None).expect("Failed to resolve settings")
}

fn domain_of(server: &MockServer) -> String {
    let seed = Url::parse(&server.uri()).expect("Failed to parse server URI");
    output_domain(&seed).expect("Failed to extract domain")
}

fn write_keywords(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("keywords.txt");
    std::fs::write(&path, content).expect("Failed to write keyword file");
    path
}

#[tokio::test]
async fn test_crawl_writes_domain_file() {
    let server = start_site().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("Output");

    let stats = crawl(settings_for(&server, &output, None, false))
        .await
        .expect("Crawl failed");

    let domain = domain_of(&server);
    let file = output.join(&domain).join(format!("{}.txt", domain));
    let content = std::fs::read_to_string(&file).expect("Output file missing");
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(
        lines,
        vec![
            format!("{}/admin/login", server.uri()),
            format!("{}/home", server.uri()),
        ]
    );
    assert_eq!(stats.urls_discovered, 2);
    assert!(!output
        .join(&domain)
        .join(format!("{}_filtered.txt", domain))
        .exists());
}

#[tokio::test]
async fn test_crawl_appends_across_runs() {
    let server = start_site().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("Output");

    crawl(settings_for(&server, &output, None, false)).await.unwrap();
    crawl(settings_for(&server, &output, None, false)).await.unwrap();

    let domain = domain_of(&server);
    let content =
        std::fs::read_to_string(output.join(&domain).join(format!("{}.txt", domain))).unwrap();
    assert_eq!(content.lines().count(), 4);
}

#[tokio::test]
async fn test_crawl_with_keywords() {
    let server = start_site().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("Output");
    let keywords = write_keywords(&dir, "admin\n");

    crawl(settings_for(&server, &output, Some(keywords), false))
        .await
        .expect("Crawl failed");

    let domain = domain_of(&server);
    let domain_dir = output.join(&domain);
    let filtered = std::fs::read_to_string(domain_dir.join(format!("{}_filtered.txt", domain)))
        .expect("Filtered file missing");

    assert_eq!(filtered, format!("{}/admin/login\n", server.uri()));
    assert!(domain_dir.join(format!("{}.txt", domain)).exists());
}

#[tokio::test]
async fn test_crawl_with_keywords_and_delete_input() {
    let server = start_site().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("Output");
    let keywords = write_keywords(&dir, "home\n\nlogin\n");

    crawl(settings_for(&server, &output, Some(keywords), true))
        .await
        .expect("Crawl failed");

    let domain = domain_of(&server);
    let domain_dir = output.join(&domain);
    let filtered =
        std::fs::read_to_string(domain_dir.join(format!("{}_filtered.txt", domain))).unwrap();

    assert_eq!(filtered.lines().count(), 2);
    assert!(!domain_dir.join(format!("{}.txt", domain)).exists());
}

#[tokio::test]
async fn test_unreachable_seed_still_creates_empty_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("Output");
    let overrides = Overrides {
        seed_url: "http://127.0.0.1:1/".to_string(),
        max_depth: Some(1),
        timeout_secs: Some(2),
        output_dir: Some(output.clone()),
        ..Default::default()
    };
    let settings = resolve_settings(overrides, None).unwrap();

    let stats = crawl(settings).await.expect("Crawl failed");

    let file = output.join("127.0.0.1:1").join("127.0.0.1:1.txt");
    assert!(file.exists());
    assert_eq!(std::fs::read_to_string(file).unwrap(), "");
    assert_eq!(stats.pages_fetched, 0);
}
