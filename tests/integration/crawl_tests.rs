//! Integration tests for the harvester
//!
//! These tests use wiremock to serve a small paginated catalog and run the
//! full walk, extract and store cycle against an on-disk database.

use catalog_harvest::browser::{FieldSelectors, HttpProductBrowser, LineCheckpoint};
use catalog_harvest::config::Config;
use catalog_harvest::crawler::{build_http_client, HttpPageSource, SessionSummary};
use catalog_harvest::storage::{ProductStore, SqliteStore};
use catalog_harvest::{Harvester, ListingWalker, ResumeCursor, WalkOutcome};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_PATH: &str = "/search/categories/Wine";
const PAGE_TWO_PATH: &str = "/search/categories/Wine/page/2";

/// Creates a test configuration pointed at the mock catalog
fn create_test_config(base_url: &str, db_path: &str) -> Config {
    let mut config = Config::default();
    config.site.start_url = format!("{}{}", base_url, LISTING_PATH);
    config.site.page_delay_ms = 0;
    config.user_agent.crawler_name = "TestHarvester".to_string();
    config.output.database_path = db_path.to_string();
    config.session.manual_checkpoint = false;
    config
}

fn listing_html(product_paths: &[&str], next_page: Option<(&str, &str)>) -> String {
    let products: String = product_paths
        .iter()
        .map(|p| format!(r#"<div class="product-card" data-href="{}"></div>"#, p))
        .collect();

    let pagination = match next_page {
        Some((label, href)) => format!(
            r#"<ul class="pagination"><li class="page-item0"><a class="page-link" href="{}">{}</a></li></ul>"#,
            href, label
        ),
        None => String::new(),
    };

    format!("<html><body>{}{}</body></html>", products, pagination)
}

fn product_html(name: &str, price: &str) -> String {
    format!(
        r#"<html><body>
        <h1> {} </h1>
        <span class="product-category">Red Wine</span>
        <span class="product-brand">Test Winery</span>
        <span class="product-abv">13.5%</span>
        <span class="product-price">{}</span>
        <span class="product-size">750ml</span>
        </body></html>"#,
        name, price
    )
}

async fn mount_html(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Serves two listing pages with two products each
async fn mount_catalog(server: &MockServer) {
    mount_html(
        server,
        LISTING_PATH,
        listing_html(
            &["/product/merlot", "/product/shiraz"],
            Some(("2", PAGE_TWO_PATH)),
        ),
    )
    .await;
    mount_html(
        server,
        PAGE_TWO_PATH,
        listing_html(&["/product/riesling", "/product/malbec"], None),
    )
    .await;

    mount_html(server, "/product/merlot", product_html("Merlot 2019", "$18.99")).await;
    mount_html(server, "/product/shiraz", product_html("Shiraz 2020", "$22.00")).await;
    mount_html(server, "/product/riesling", product_html("Riesling", "$15.50")).await;
    mount_html(server, "/product/malbec", product_html("Malbec Reserva", "$30.00")).await;
}

/// Runs one session the way the binary does
async fn harvest(config: &Config, store: &mut SqliteStore) -> SessionSummary {
    let cursor = ResumeCursor::from_store(&*store).expect("Failed to read resume marker");
    let client = build_http_client(&config.user_agent).expect("Failed to build client");

    let mut walker = ListingWalker::from_config(
        HttpPageSource::new(client.clone()),
        &config.site,
        cursor,
    )
    .expect("Failed to build walker");

    let selectors =
        FieldSelectors::from_config(&config.extraction).expect("Failed to build selectors");
    let mut browser = HttpProductBrowser::new(client, selectors);
    let mut checkpoint = LineCheckpoint::new(&b""[..]);

    let mut harvester = Harvester::new(
        store,
        &mut browser,
        &mut checkpoint,
        config.site.product_type.clone(),
    )
    .expect("Failed to create harvester")
    .with_manual_checkpoint(config.session.manual_checkpoint);

    harvester.run(&mut walker).await
}

#[tokio::test]
async fn test_full_harvest_two_pages() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("products.db");
    let config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());

    let mut store = SqliteStore::new(&db_path).expect("Failed to open store");
    let summary = harvest(&config, &mut store).await;

    assert_eq!(summary.outcome, WalkOutcome::Exhausted);
    assert_eq!(summary.pages_fetched, 2);
    assert_eq!(summary.counters.persisted, 4);
    assert_eq!(summary.counters.failed, 0);
    assert_eq!(summary.final_total, Some(4));

    let merlot = store
        .get_product("Merlot 2019")
        .unwrap()
        .expect("Merlot should be stored");
    assert_eq!(merlot.source, format!("{}{}", mock_server.uri(), LISTING_PATH));
    assert_eq!(merlot.product_type, "wine");
    assert_eq!(merlot.subtype, "Red Wine");
    assert_eq!(merlot.brand, "Test Winery");
    assert_eq!(merlot.abv, "13.5%");
    assert_eq!(merlot.price, "$18.99");
    assert_eq!(merlot.volume_packaging, "750ml");

    let malbec = store.get_product("Malbec Reserva").unwrap().unwrap();
    assert_eq!(malbec.source, format!("{}{}", mock_server.uri(), PAGE_TWO_PATH));

    // The last stored row marks where the next run resumes
    assert_eq!(
        store.last_source().unwrap(),
        Some(format!("{}{}", mock_server.uri(), PAGE_TWO_PATH))
    );
}

#[tokio::test]
async fn test_rerun_resumes_past_stored_products() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("products.db");
    let config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());

    {
        let mut store = SqliteStore::new(&db_path).expect("Failed to open store");
        let first = harvest(&config, &mut store).await;
        assert_eq!(first.counters.persisted, 4);
        store.close().expect("Failed to close store");
    }

    let mut store = SqliteStore::new(&db_path).expect("Failed to reopen store");
    let second = harvest(&config, &mut store).await;

    assert_eq!(second.outcome, WalkOutcome::Exhausted);
    assert_eq!(second.counters.total_before, 4);
    assert_eq!(second.counters.handled(), 0);
    assert_eq!(second.final_total, Some(4));
    assert_eq!(store.count_products().unwrap(), 4);
}

#[tokio::test]
async fn test_page_fetch_failure_keeps_earlier_products() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        LISTING_PATH,
        listing_html(&["/product/merlot"], Some(("2", PAGE_TWO_PATH))),
    )
    .await;
    mount_html(&mock_server, "/product/merlot", product_html("Merlot 2019", "$18.99")).await;

    Mock::given(method("GET"))
        .and(path(PAGE_TWO_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("products.db");
    let config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());

    let mut store = SqliteStore::new(&db_path).expect("Failed to open store");
    let summary = harvest(&config, &mut store).await;

    match &summary.outcome {
        WalkOutcome::FetchFailed { url, .. } => {
            assert_eq!(url, &format!("{}{}", mock_server.uri(), PAGE_TWO_PATH));
        }
        other => panic!("expected a fetch failure, got {:?}", other),
    }
    assert!(summary.outcome.is_finished());
    assert_eq!(summary.pages_fetched, 1);
    assert_eq!(summary.counters.persisted, 1);
    assert!(store.get_product("Merlot 2019").unwrap().is_some());
}

#[tokio::test]
async fn test_broken_product_page_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        LISTING_PATH,
        listing_html(&["/product/gone", "/product/nameless", "/product/merlot"], None),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/product/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_html(
        &mock_server,
        "/product/nameless",
        "<html><body><span class=\"product-price\">$9.99</span></body></html>".to_string(),
    )
    .await;
    mount_html(&mock_server, "/product/merlot", product_html("Merlot 2019", "$18.99")).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("products.db");
    let config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());

    let mut store = SqliteStore::new(&db_path).expect("Failed to open store");
    let summary = harvest(&config, &mut store).await;

    assert_eq!(summary.outcome, WalkOutcome::Exhausted);
    assert_eq!(summary.counters.failed, 2);
    assert_eq!(summary.counters.persisted, 1);
    assert_eq!(store.count_products().unwrap(), 1);
}

#[tokio::test]
async fn test_duplicate_names_are_stored_once() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        LISTING_PATH,
        listing_html(
            &["/product/merlot", "/product/merlot-magnum", "/product/merlot"],
            None,
        ),
    )
    .await;
    mount_html(&mock_server, "/product/merlot", product_html("Merlot 2019", "$18.99")).await;
    // Same product name behind a different link
    mount_html(
        &mock_server,
        "/product/merlot-magnum",
        product_html("Merlot 2019", "$36.00"),
    )
    .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("products.db");
    let config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());

    let mut store = SqliteStore::new(&db_path).expect("Failed to open store");
    let summary = harvest(&config, &mut store).await;

    assert_eq!(summary.counters.persisted, 1);
    assert_eq!(summary.counters.already_stored, 1);
    assert_eq!(store.count_products().unwrap(), 1);
    assert_eq!(
        store.get_product("Merlot 2019").unwrap().unwrap().price,
        "$18.99"
    );
}

#[tokio::test]
async fn test_operator_checkpoint_with_closed_input() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("products.db");
    let mut config = create_test_config(&mock_server.uri(), db_path.to_str().unwrap());
    config.session.manual_checkpoint = true;

    let mut store = SqliteStore::new(&db_path).expect("Failed to open store");
    let summary = harvest(&config, &mut store).await;

    assert_eq!(summary.counters.persisted, 4);
    assert_eq!(summary.counters.failed, 0);
}
