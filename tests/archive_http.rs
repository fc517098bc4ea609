//! End-to-end runs against a mock results archive.

use std::sync::Arc;

use fourd::error::AppError;
use fourd::models::{Config, OutputConfig};
use fourd::pipeline::{run_collect, run_latest, run_list};
use fourd::storage::{DrawStorage, LocalStorage};
use fourd::utils::http::{HttpPageSource, PageSource};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING: &str = r#"<html><body>
<select name="drawDate">
  <option>Select a draw</option>
  <option querystring="sppl=d1">Sun, 19 Oct 2025</option>
  <option querystring="sppl=d2">Sat, 18 Oct 2025</option>
  <option querystring="sppl=d3">Wed, 15 Oct 2025</option>
</select>
</body></html>"#;

fn detail(draw: &str, date: &str, first: &str, second: Option<&str>) -> String {
    let second = second
        .map(|n| format!(r#"<td class="tdSecondPrize">{n}</td>"#))
        .unwrap_or_default();
    let starters: String = (0..10).map(|n| format!("<td>10{n:02}</td>")).collect();
    let consolations: String = (0..10).map(|n| format!("<td>20{n:02}</td>")).collect();
    format!(
        r#"<html><body>
        <table><thead><tr>
          <th class="drawDate">{date}</th><th class="drawNumber">Draw No. {draw}</th>
        </tr></thead></table>
        <table><tbody>
          <tr><td class="tdFirstPrize">{first}</td></tr>
          <tr>{second}</tr>
          <tr><td class="tdThirdPrize">0003</td></tr>
        </tbody></table>
        <table><tbody class="tbodyStarterPrizes"><tr>{starters}</tr></tbody></table>
        <table><tbody class="tbodyConsolationPrizes"><tr>{consolations}</tr></tbody></table>
        </body></html>"#
    )
}

fn config(server: &MockServer, tmp: &TempDir) -> Config {
    let mut config = Config::default();
    config.source.listing_url = format!("{}/list.html", server.uri());
    config.source.detail_base_url = format!("{}/4d_results.aspx", server.uri());
    config.crawler.request_delay_ms = 0;
    config.crawler.timeout_secs = 5;
    config.crawler.accept_language = "en-SG".to_string();
    config.output = OutputConfig {
        dir: tmp.path().display().to_string(),
        ..OutputConfig::default()
    };
    config
}

fn source(config: &Config) -> Arc<dyn PageSource> {
    Arc::new(HttpPageSource::from_config(&config.crawler).unwrap())
}

async fn mount_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/list.html"))
        .and(header("user-agent", "Mozilla/5.0"))
        .and(header("accept-language", "en-SG"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, id: &str, body: String, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/4d_results.aspx"))
        .and(query_param("sppl", id))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn bounded_collect_fetches_in_listing_order() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    mount_listing(&server).await;
    mount_detail(&server, "d1", detail("5400", "Sun, 19 Oct 2025", "1111", Some("2222")), 1).await;
    mount_detail(&server, "d2", detail("5399", "Sat, 18 Oct 2025", "3333", Some("4444")), 1).await;
    mount_detail(&server, "d3", detail("5398", "Wed, 15 Oct 2025", "5555", Some("6666")), 0).await;

    let mut config = config(&server, &tmp);
    config.batch.limit = 2;
    let storage = LocalStorage::new(&config.output);

    let summary = run_collect(&config, source(&config), &storage, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(summary.listed, 3);
    assert_eq!(summary.parsed, 2);

    let saved = storage.load_batch().await.unwrap();
    let records = saved.records();
    assert_eq!(records[0].draw_number, "Draw No. 5400");
    assert_eq!(records[0].first_prize, "1111");
    assert_eq!(records[1].draw_number, "Draw No. 5399");
    assert_eq!(records[1].starter_prizes.len(), 10);
    assert_eq!(records[1].consolation_prizes[0], "2000");
}

#[tokio::test]
async fn server_error_skips_only_that_draw() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    mount_listing(&server).await;
    Mock::given(method("GET"))
        .and(path("/4d_results.aspx"))
        .and(query_param("sppl", "d1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_detail(&server, "d2", detail("5399", "Sat, 18 Oct 2025", "3333", None), 1).await;
    mount_detail(&server, "d3", detail("5398", "Wed, 15 Oct 2025", "5555", Some("6666")), 1).await;

    let mut config = config(&server, &tmp);
    config.batch.all = true;
    config.batch.limit = 1;
    let storage = LocalStorage::new(&config.output);

    let summary = run_collect(&config, source(&config), &storage, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].as_str(), "sppl=d1");

    let saved = storage.load_batch().await.unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved.records()[0].draw_number, "Draw No. 5399");
    assert_eq!(saved.records()[0].second_prize, "");
    assert_eq!(saved.records()[1].second_prize, "6666");
}

#[tokio::test]
async fn listing_failure_is_reported() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/list.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = config(&server, &tmp);
    let storage = LocalStorage::new(&config.output);

    let result = run_collect(&config, source(&config), &storage, CancellationToken::new()).await;
    assert!(matches!(result, Err(AppError::Listing { .. })));
    assert!(storage.load_batch().await.unwrap().is_empty());
}

#[tokio::test]
async fn latest_writes_record_and_numbers() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    mount_listing(&server).await;
    mount_detail(&server, "d1", detail("5400", "Sun, 19 Oct 2025", "1111", Some("2222")), 1).await;

    let config = config(&server, &tmp);
    let storage = LocalStorage::new(&config.output);

    let record = run_latest(&config, source(&config), &storage).await.unwrap();
    assert_eq!(record.date, "Sun, 19 Oct 2025");

    let numbers: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(tmp.path().join("4d.json")).unwrap())
            .unwrap();
    assert_eq!(numbers.len(), 23);
    assert_eq!(numbers[0], "1111");
    assert_eq!(numbers[22], "2009");
}

#[tokio::test]
async fn list_returns_identifiers() {
    let server = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    mount_listing(&server).await;

    let config = config(&server, &tmp);
    let ids = run_list(&config, source(&config)).await.unwrap();
    let ids: Vec<_> = ids.iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["sppl=d1", "sppl=d2", "sppl=d3"]);
}
