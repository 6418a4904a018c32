//! Static extractor tests against a local mock origin.

use std::sync::Arc;
use std::time::Duration;

use headwire_common::ExtractorConfig;
use headwire_extract::rendered::RenderedExtractor;
use headwire_extract::static_page::StaticExtractor;
use headwire_extract::strategy::StrategySelector;
use headwire_extract::{
    ExtractError, HeadlinePipeline, NO_TITLE, NewsRecord, SiteAwareFetcher, TitleOutcome,
};
use headwire_http::PageClient;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn extractor() -> StaticExtractor {
    StaticExtractor::new(PageClient::new(false).unwrap(), Duration::from_secs(5))
}

fn page_url(server: &MockServer, p: &str) -> Url {
    Url::parse(&format!("{}{p}", server.uri())).unwrap()
}

#[tokio::test]
async fn og_title_meta_wins_over_title_tag() {
    let server = MockServer::start().await;
    let html = r#"<html><head>
        <meta property="og:title" content="Breaking News"/>
        <title>Breaking News - SiteName</title>
    </head><body><h1>Something Else</h1></body></html>"#;
    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let outcome = extractor().extract(&page_url(&server, "/story")).await.unwrap();
    assert_eq!(outcome, TitleOutcome::Found("Breaking News".into()));
}

#[tokio::test]
async fn page_without_signals_is_not_found_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body><p>nothing</p></body></html>"))
        .mount(&server)
        .await;

    let outcome = extractor().extract(&page_url(&server, "/")).await.unwrap();
    assert_eq!(outcome, TitleOutcome::NotFound);
}

#[tokio::test]
async fn non_200_status_is_a_retryable_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    match extractor().extract(&page_url(&server, "/gone")).await {
        Err(ExtractError::Status(404)) => {}
        other => panic!("expected status failure, got {other:?}"),
    }
}

/// Full pipeline over the static path: fetch, retry on 5xx, normalize.
#[tokio::test]
async fn pipeline_retries_transient_statuses_up_to_the_ceiling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let config = ExtractorConfig {
        max_retries: 2,
        backoff_base_ms: 10,
        batch_cooldown_ms: 0,
        ..ExtractorConfig::default()
    };
    let fetcher = SiteAwareFetcher::new(
        StrategySelector::default(),
        StaticExtractor::new(PageClient::new(false).unwrap(), Duration::from_secs(5)),
        RenderedExtractor::new(true, Duration::from_secs(5), "out/debug"),
    );
    let pipeline = HeadlinePipeline::new(Arc::new(fetcher), config);

    let record: NewsRecord =
        serde_json::from_value(json!({ "url": format!("{}/flaky", server.uri()) })).unwrap();
    let enriched = pipeline.enrich_all(vec![record]).await;

    assert_eq!(enriched[0].title(), Some(NO_TITLE));
    // wiremock verifies the .expect(2) attempt count on drop.
}

#[tokio::test]
async fn pipeline_normalizes_titles_from_real_markup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><title>Quake hits coast - Agency</title></head><body></body></html>",
        ))
        .mount(&server)
        .await;

    let fetcher = SiteAwareFetcher::new(
        StrategySelector::default(),
        StaticExtractor::new(PageClient::new(false).unwrap(), Duration::from_secs(5)),
        RenderedExtractor::new(true, Duration::from_secs(5), "out/debug"),
    );
    let pipeline = HeadlinePipeline::new(Arc::new(fetcher), ExtractorConfig::default());

    let record: NewsRecord =
        serde_json::from_value(json!({ "url": format!("{}/story", server.uri()) })).unwrap();
    let enriched = pipeline.enrich_all(vec![record]).await;

    assert_eq!(enriched[0].title(), Some("Quake hits coast"));
}

#[tokio::test]
async fn short_url_is_preferred_as_the_fetch_target() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/short"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><title>Via Short Link</title></head></html>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = SiteAwareFetcher::new(
        StrategySelector::default(),
        StaticExtractor::new(PageClient::new(false).unwrap(), Duration::from_secs(5)),
        RenderedExtractor::new(true, Duration::from_secs(5), "out/debug"),
    );
    let pipeline = HeadlinePipeline::new(Arc::new(fetcher), ExtractorConfig::default());

    let record: NewsRecord = serde_json::from_value(json!({
        "url": "https://unreachable.invalid/full",
        "short_url": format!("{}/short", server.uri())
    }))
    .unwrap();
    let enriched = pipeline.enrich_all(vec![record]).await;

    assert_eq!(enriched[0].title(), Some("Via Short Link"));
}
