//! End-to-end pipeline tests against a mocked JMA endpoint
//! Run with: cargo test --test weather_pipeline_test

use std::sync::{Arc, Once};
use std::time::Duration;

use chrono::NaiveDate;
use tenki_bot::application::messaging::echo_reply;
use tenki_bot::application::services::weather_service::PAST_DAY_UNAVAILABLE;
use tenki_bot::infrastructure::forecast::JmaForecastClient;
use tenki_bot::{Day, IntentExtractor, MessageDispatcher, RegionTable, WeatherResolver};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn resolver(server: &MockServer) -> WeatherResolver {
    let client = JmaForecastClient::new(server.uri(), Duration::from_secs(3)).unwrap();
    WeatherResolver::new(Arc::new(RegionTable::builtin()), Arc::new(client)).with_today(today)
}

async fn mount_tokyo(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/130000.json"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_today_forecast_from_upstream() {
    ensure_init();
    let server = MockServer::start().await;
    mount_tokyo(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"timeSeries": [{"areas": [{"weathers": ["晴れ", "曇り"]}]}]}
        ])),
    )
    .await;

    let reply = resolver(&server).resolve(Some("東京"), Day::Today).await;
    assert!(reply.contains("東京"), "{}", reply);
    assert!(reply.contains("2026-10-18"), "{}", reply);
    assert!(reply.contains("晴れ"), "{}", reply);
}

#[tokio::test]
async fn test_upstream_500_becomes_reply() {
    ensure_init();
    let server = MockServer::start().await;
    mount_tokyo(&server, ResponseTemplate::new(500)).await;

    let reply = resolver(&server).resolve(Some("東京"), Day::Tomorrow).await;
    assert!(reply.contains("エラー"), "{}", reply);
    assert!(reply.contains("500"), "{}", reply);
}

#[tokio::test]
async fn test_yesterday_never_hits_upstream() {
    ensure_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let reply = resolver(&server).resolve(Some("東京"), Day::Yesterday).await;
    assert_eq!(reply, PAST_DAY_UNAVAILABLE);
}

#[tokio::test]
async fn test_every_call_fetches_fresh() {
    ensure_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/130000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"timeSeries": [{"areas": [{"weathers": ["雨"]}]}]}
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let r = resolver(&server);
    assert_eq!(r.resolve(Some("東京"), Day::Today).await, r.resolve(Some("東京"), Day::Today).await);
}

#[tokio::test]
async fn test_dispatcher_end_to_end() {
    ensure_init();
    let server = MockServer::start().await;
    mount_tokyo(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"timeSeries": [
                {"areas": [{"winds": ["北の風"]}]},
                {"areas": [{"weathers": ["晴れ", "くもり　時々　雨"]}]}
            ]}
        ])),
    )
    .await;

    let regions = Arc::new(RegionTable::builtin());
    let dispatcher = MessageDispatcher::new(IntentExtractor::new(regions), resolver(&server));

    assert_eq!(
        dispatcher.handle_text("東京都の明日の天気を教えて").await,
        "東京 の 明日 (2026-10-19) の天気は「くもり　時々　雨」です。"
    );
    assert_eq!(dispatcher.handle_text("ありがとう").await, echo_reply("ありがとう"));
}
