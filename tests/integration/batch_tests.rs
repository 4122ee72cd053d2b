use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use vdp_seeder::config::Config;
use vdp_seeder::crawler::{run_batch, Coordinator, HttpFetcher, Pacer};
use vdp_seeder::output::{FailureKind, FileResultWriter, WriteOutcome};
use vdp_seeder::sites::parse_site_list;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRIMARY_PATH: &str = "/dealer-inspire-inventory/inventory_sitemap.xml";

/// Records pauses instead of sleeping
#[derive(Clone, Default)]
struct RecordingPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

/// Creates a test configuration with no warm-up pause and short timeouts
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.crawler.warmup_min_ms = 0;
    config.crawler.warmup_max_ms = 0;
    config.crawler.homepage_timeout_secs = 5;
    config.crawler.primary_timeout_secs = 5;
    config.crawler.fallback_timeout_secs = 5;
    config.crawler.robots_timeout_secs = 5;
    config
}

async fn mount_homepage(server: &MockServer, title: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(
                    "<html><head><title>{}</title></head><body>Welcome</body></html>",
                    title
                ))
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_xml(server: &MockServer, at: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

async fn forbid(server: &MockServer, at: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_string("<urlset></urlset>"))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_primary_sitemap_end_to_end() {
    let server = MockServer::start().await;
    mount_homepage(&server, "Example Ford").await;
    mount_xml(
        &server,
        PRIMARY_PATH,
        200,
        "<urlset><url><loc>https://example.com/vdp/123</loc></url></urlset>",
    )
    .await;
    forbid(&server, "/sitemap.xml").await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output").join("vdp.txt");
    let sites = parse_site_list(&format!("{}|FORD", server.uri()));

    let config = create_test_config();
    let fetcher = HttpFetcher::new(&config.fetch).unwrap();
    let mut coordinator = Coordinator::new(&config, fetcher, RecordingPacer::default());
    let writer = FileResultWriter::new(&output);

    let (report, outcome) = coordinator.run(&sites, &writer).await.unwrap();

    assert_eq!(report.total_sites, 1);
    assert_eq!(report.succeeded_count(), 1);
    assert_eq!(outcome, WriteOutcome::Written { count: 1 });
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "https://example.com/vdp/123|FORD"
    );
}

#[tokio::test]
async fn test_blocked_site_skipped_and_batch_continues() {
    let blocked = MockServer::start().await;
    mount_homepage(&blocked, "403 Forbidden").await;
    forbid(&blocked, "/robots.txt").await;
    forbid(&blocked, PRIMARY_PATH).await;

    let good = MockServer::start().await;
    mount_homepage(&good, "Good Dealer").await;
    mount_xml(
        &good,
        PRIMARY_PATH,
        200,
        "<urlset><url><loc>https://good.example.com/vdp/1</loc></url></urlset>",
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("vdp.txt");
    let sites = parse_site_list(&format!("{}|JEEP\n{}|RAM", blocked.uri(), good.uri()));

    let config = create_test_config();
    let fetcher = HttpFetcher::new(&config.fetch).unwrap();
    let pacer = RecordingPacer::default();
    let mut coordinator = Coordinator::new(&config, fetcher, pacer);
    let writer = FileResultWriter::new(&output);

    let (report, _) = coordinator.run(&sites, &writer).await.unwrap();

    assert_eq!(report.total_sites, 2);
    assert_eq!(report.succeeded_count(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, FailureKind::SiteBlocked);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "https://good.example.com/vdp/1|RAM"
    );
}

#[tokio::test]
async fn test_all_sites_fail_writes_nothing() {
    let mut servers = Vec::new();
    for _ in 0..3 {
        let server = MockServer::start().await;
        mount_homepage(&server, "Dealer").await;
        servers.push(server);
    }

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("vdp.txt");
    let list: Vec<String> = servers.iter().map(|s| s.uri()).collect();
    let sites = parse_site_list(&list.join("\n"));

    let config = create_test_config();
    let fetcher = HttpFetcher::new(&config.fetch).unwrap();
    let mut coordinator = Coordinator::new(&config, fetcher, RecordingPacer::default());
    let writer = FileResultWriter::new(&output);

    let (report, outcome) = coordinator.run(&sites, &writer).await.unwrap();

    assert_eq!(outcome, WriteOutcome::NothingToWrite);
    assert_eq!(vdp_seeder::output::success_ratio(&report), "0/3");
    assert!(report
        .failures
        .iter()
        .all(|f| f.kind == FailureKind::NotFound));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_fallback_requires_inventory_content() {
    let server = MockServer::start().await;
    mount_homepage(&server, "Dealer").await;
    mount_xml(
        &server,
        "/sitemap.xml",
        200,
        "<urlset><url><loc>https://dealer.example.com/about-us</loc></url></urlset>",
    )
    .await;
    mount_xml(
        &server,
        "/sitemaps/inventory.xml",
        200,
        "<urlset><url><loc>https://dealer.example.com/inventory/used-2020-ram</loc></url>\
         <url><loc>https://dealer.example.com/inventory/new-2024-jeep</loc></url></urlset>",
    )
    .await;
    forbid(&server, "/inventory-sitemap.xml").await;
    forbid(&server, "/sitemap_index.xml").await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("vdp.txt");
    let sites = parse_site_list(&server.uri());

    let config = create_test_config();
    let fetcher = HttpFetcher::new(&config.fetch).unwrap();
    let mut coordinator = Coordinator::new(&config, fetcher, RecordingPacer::default());

    coordinator
        .run(&sites, &FileResultWriter::new(&output))
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "https://dealer.example.com/inventory/used-2020-ram|UNK"
    );
}

#[tokio::test]
async fn test_primary_timeout_falls_back() {
    let server = MockServer::start().await;
    mount_homepage(&server, "Dealer").await;
    Mock::given(method("GET"))
        .and(path(PRIMARY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<urlset><url><loc>https://slow.example.com/1</loc></url></urlset>")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    mount_xml(
        &server,
        "/sitemap.xml",
        200,
        "<urlset><url><loc>https://dealer.example.com/vehicle/42</loc></url></urlset>",
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("vdp.txt");
    let sites = parse_site_list(&format!("{}|CHRYSLER", server.uri()));

    let mut config = create_test_config();
    config.crawler.primary_timeout_secs = 1;
    let fetcher = HttpFetcher::new(&config.fetch).unwrap();
    let mut coordinator = Coordinator::new(&config, fetcher, RecordingPacer::default());

    let (report, _) = coordinator
        .run(&sites, &FileResultWriter::new(&output))
        .await
        .unwrap();

    assert_eq!(report.succeeded_count(), 1);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "https://dealer.example.com/vehicle/42|CHRYSLER"
    );
}

#[tokio::test]
async fn test_empty_sitemap_counts_as_failure() {
    let server = MockServer::start().await;
    mount_homepage(&server, "Dealer").await;
    mount_xml(&server, PRIMARY_PATH, 200, "<urlset></urlset>").await;
    forbid(&server, "/sitemap.xml").await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("vdp.txt");
    let sites = parse_site_list(&server.uri());

    let config = create_test_config();
    let fetcher = HttpFetcher::new(&config.fetch).unwrap();
    let mut coordinator = Coordinator::new(&config, fetcher, RecordingPacer::default());

    let (report, outcome) = coordinator
        .run(&sites, &FileResultWriter::new(&output))
        .await
        .unwrap();

    assert_eq!(outcome, WriteOutcome::NothingToWrite);
    assert_eq!(report.failures[0].kind, FailureKind::EmptyFeed);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_delay_applied_after_each_site() {
    let a = MockServer::start().await;
    mount_homepage(&a, "A").await;
    let b = MockServer::start().await;
    mount_homepage(&b, "403").await;

    let sites = parse_site_list(&format!("{}\n{}", a.uri(), b.uri()));
    let mut config = create_test_config();
    config.crawler.delay_seconds = 7;

    let pacer = RecordingPacer::default();
    let fetcher = HttpFetcher::new(&config.fetch).unwrap();
    let mut coordinator = Coordinator::new(&config, fetcher, pacer.clone());
    let dir = TempDir::new().unwrap();

    let (report, _) = coordinator
        .run(&sites, &FileResultWriter::new(dir.path().join("vdp.txt")))
        .await
        .unwrap();

    assert_eq!(report.succeeded_count(), 0);
    assert_eq!(report.failures.len(), 2);

    let site_delays = pacer
        .pauses
        .lock()
        .unwrap()
        .iter()
        .filter(|d| **d == Duration::from_secs(7))
        .count();
    assert_eq!(site_delays, 2);
}

#[tokio::test]
async fn test_run_batch_with_real_pacer() {
    let server = MockServer::start().await;
    mount_homepage(&server, "Dealer").await;
    mount_xml(
        &server,
        PRIMARY_PATH,
        200,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://dealer.example.com/new/2024-Ram-1500.htm</loc><lastmod>2024-01-01</lastmod></url>
  <url><loc>https://dealer.example.com/new/2024-Jeep-Wrangler.htm</loc></url>
</urlset>"#,
    )
    .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("vdp.txt");
    let sites = parse_site_list(&format!("{}/|RAM", server.uri()));

    let mut config = create_test_config();
    config.crawler.delay_seconds = 0;

    let (report, outcome) = run_batch(&config, &sites, &FileResultWriter::new(&output))
        .await
        .unwrap();

    assert_eq!(report.succeeded_count(), 1);
    assert_eq!(outcome, WriteOutcome::Written { count: 1 });
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "https://dealer.example.com/new/2024-Ram-1500.htm|RAM"
    );
}
