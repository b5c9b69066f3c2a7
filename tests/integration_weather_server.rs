//! Integration tests for the HTTP transport
//!
//! Most tests drive the real route tree through `warp::test::request()`.
//! The last ones bind a real listener on an ephemeral port and talk to it
//! with `WeatherClient`.

use airport_weather::app::services::airport_registry::parse_airport_feed_reader;
use airport_weather::cli::commands::demo::run_session;
use airport_weather::cli::commands::load::{UploadSummary, upload_airports};
use airport_weather::client::WeatherClient;
use airport_weather::{AtmosphericInformation, DataPointType, Error, HealthReport, WeatherStore, server};
use indicatif::ProgressBar;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use warp::http::StatusCode;

const BOSTON_WIND: &str = r#"{"mean":20.0,"first":10,"second":20,"third":30,"count":50}"#;

fn test_store() -> Arc<WeatherStore> {
    Arc::new(WeatherStore::bootstrap().expect("starter airports are valid"))
}

fn json(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("response body is JSON")
}

#[tokio::test]
async fn test_ping_endpoints() {
    let routes = server::routes(test_store(), CancellationToken::new());

    let response = warp::test::request()
        .method("GET")
        .path("/collect/ping")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"ready");

    let response = warp::test::request()
        .method("GET")
        .path("/query/ping")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let report: HealthReport = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(report.fresh_record_count, 0);
    assert_eq!(report.per_airport_query_fraction.len(), 5);
    assert_eq!(report.radius_histogram.len(), 1001);
}

/// Boston wind reading followed by a 500 km radius query
///
/// Purpose: Exercise the collect and query paths end to end over HTTP
/// Benefit: JFK lies within range but has no readings, so it must be left out
#[tokio::test]
async fn test_boston_radius_scenario() {
    let store = test_store();
    let routes = server::routes(store.clone(), CancellationToken::new());

    let response = warp::test::request()
        .method("POST")
        .path("/collect/weather/BOS/wind")
        .body(BOSTON_WIND)
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response.body())["outcome"], "accepted");

    let response = warp::test::request()
        .method("GET")
        .path("/query/weather/BOS/500")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let records: Vec<AtmosphericInformation> = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(records.len(), 1);
    let wind = records[0].reading(DataPointType::Wind).unwrap();
    assert_eq!(wind.mean, 20.0);
    assert_eq!(wind.low, 10);
    assert_eq!(wind.sample_count, 50);

    let value = json(response.body());
    assert_eq!(value[0]["wind"]["first"], 10);
    assert!(value[0]["lastUpdateTime"].as_i64().unwrap() > 0);

    let report = store.health();
    assert_eq!(report.fresh_record_count, 1);
    assert_eq!(report.per_airport_query_fraction["BOS"], 1.0);
}

#[tokio::test]
async fn test_point_query_forms_are_equivalent() {
    let routes = server::routes(test_store(), CancellationToken::new());

    for path in ["/query/weather/JFK", "/query/weather/JFK/0", "/query/weather/JFK/0.0"] {
        let response = warp::test::request()
            .method("GET")
            .path(path)
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert_eq!(json(response.body()), serde_json::json!([{ "lastUpdateTime": 0 }]));
    }
}

#[tokio::test]
async fn test_rejected_reading_is_not_stored() {
    let store = test_store();
    let routes = server::routes(store.clone(), CancellationToken::new());

    let response = warp::test::request()
        .method("POST")
        .path("/collect/weather/BOS/pressure")
        .body(r#"{"mean":800.0,"count":1}"#)
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response.body())["outcome"], "rejected");

    assert!(!store.atmosphere("BOS").unwrap().is_populated());
}

#[tokio::test]
async fn test_legacy_point_type_spellings() {
    let store = test_store();
    let routes = server::routes(store.clone(), CancellationToken::new());

    for (point_type, data_type) in [
        ("humidty", DataPointType::Humidity),
        ("cloudcover", DataPointType::CloudCover),
        ("PRECIPITATION", DataPointType::Precipitation),
    ] {
        let response = warp::test::request()
            .method("POST")
            .path(&format!("/collect/weather/EWR/{point_type}"))
            .body(r#"{"mean":50.0}"#)
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK, "{point_type}");
        assert!(store.atmosphere("EWR").unwrap().reading(data_type).is_some());
    }
}

#[tokio::test]
async fn test_bad_requests_map_to_status_codes() {
    let routes = server::routes(test_store(), CancellationToken::new());

    let cases = [
        ("POST", "/collect/weather/BOS/fog", BOSTON_WIND, StatusCode::BAD_REQUEST),
        ("POST", "/collect/weather/BOS/wind", "{not json", StatusCode::BAD_REQUEST),
        ("POST", "/collect/weather/LHR/wind", BOSTON_WIND, StatusCode::NOT_FOUND),
        ("GET", "/query/weather/LHR/0", "", StatusCode::NOT_FOUND),
        ("GET", "/query/weather/BOS/-5", "", StatusCode::BAD_REQUEST),
        ("GET", "/query/weather/BOS/far", "", StatusCode::BAD_REQUEST),
        ("GET", "/collect/airport/LHR", "", StatusCode::NOT_FOUND),
        ("POST", "/collect/airport/BOS/42.36/-71.0", "", StatusCode::CONFLICT),
        ("POST", "/collect/airport/LHR/north/-0.46", "", StatusCode::BAD_REQUEST),
        ("POST", "/collect/airport/LHR/95.0/-0.46", "", StatusCode::BAD_REQUEST),
        ("POST", "/collect/airport/lhr/51.47/-0.46", "", StatusCode::BAD_REQUEST),
        ("DELETE", "/collect/airport/LHR", "", StatusCode::NOT_FOUND),
    ];

    for (method, path, body, expected) in cases {
        let response = warp::test::request()
            .method(method)
            .path(path)
            .body(body)
            .reply(&routes)
            .await;
        assert_eq!(response.status(), expected, "{method} {path}");
        if !expected.is_success() {
            assert!(json(response.body())["error"].is_string(), "{method} {path}");
        }
    }
}

#[tokio::test]
async fn test_airport_lifecycle() {
    let store = test_store();
    let routes = server::routes(store.clone(), CancellationToken::new());

    let response = warp::test::request()
        .method("POST")
        .path("/collect/airport/LHR/51.4706/-0.461941")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json(response.body()),
        serde_json::json!({ "iata": "LHR", "latitude": 51.4706, "longitude": -0.461941 })
    );

    let response = warp::test::request()
        .method("GET")
        .path("/collect/airports")
        .reply(&routes)
        .await;
    assert_eq!(
        json(response.body()),
        serde_json::json!(["BOS", "EWR", "JFK", "LGA", "LHR", "MMU"])
    );

    let response = warp::test::request()
        .method("GET")
        .path("/collect/airport/LHR")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response.body())["iata"], "LHR");

    let response = warp::test::request()
        .method("DELETE")
        .path("/collect/airport/LHR")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.find_airport("LHR").is_none());
    assert!(store.atmosphere("LHR").is_err());
}

#[tokio::test]
async fn test_exit_cancels_shutdown_token() {
    let shutdown = CancellationToken::new();
    let routes = server::routes(test_store(), shutdown.clone());

    let response = warp::test::request()
        .method("GET")
        .path("/collect/exit")
        .reply(&routes)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.body().is_empty());
    assert!(shutdown.is_cancelled());
}

/// Reference client session against a live listener
///
/// Purpose: Run the demo session through `WeatherClient` over real sockets
/// Benefit: Covers client error mapping and graceful shutdown via /collect/exit
#[tokio::test]
async fn test_demo_session_against_live_server() {
    let store = test_store();
    let shutdown = CancellationToken::new();
    let (address, server) = server::bind(
        "127.0.0.1:0".parse().unwrap(),
        store.clone(),
        shutdown.clone(),
    )
    .unwrap();
    let handle = tokio::spawn(server);

    let client = WeatherClient::new(format!("http://{}", address)).unwrap();
    let transcript = run_session(&client, true).await.unwrap();

    assert_eq!(transcript[0], "collect.ping: ready");
    assert!(transcript.iter().any(|line| line.contains("LHR (delete): 404")));
    assert_eq!(transcript.last().map(String::as_str), Some("collect.exit: 204"));

    handle.await.unwrap();
    assert!(shutdown.is_cancelled());

    let wind = store.atmosphere("BOS").unwrap();
    assert_eq!(wind.reading(DataPointType::Wind).unwrap().mean, 6.0);

    // Five point queries, one per starter airport
    let report = store.health();
    assert!(report.per_airport_query_fraction.values().all(|f| *f == 0.2));
}

#[tokio::test]
async fn test_client_maps_error_statuses() {
    let shutdown = CancellationToken::new();
    let (address, server) =
        server::bind("127.0.0.1:0".parse().unwrap(), test_store(), shutdown.clone()).unwrap();
    let handle = tokio::spawn(server);
    let client = WeatherClient::new(format!("http://{}", address)).unwrap();

    assert!(matches!(
        client.airport("LHR").await,
        Err(Error::AirportNotFound { code }) if code == "LHR"
    ));
    assert!(matches!(
        client.add_airport("BOS", 42.0, -71.0).await,
        Err(Error::DuplicateAirport { code }) if code == "BOS"
    ));
    assert!(matches!(
        client.query("BOS", -1.0).await,
        Err(Error::InvalidQuery { .. })
    ));

    let added = client.add_airport("LHR", 51.4706, -0.461941).await.unwrap();
    assert_eq!(added.code(), "LHR");
    assert_eq!(client.airports().await.unwrap().len(), 6);
    assert_eq!(client.delete_airport("LHR").await.unwrap().code(), "LHR");

    shutdown.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_feed_upload_against_live_server() {
    let feed = concat!(
        r#"507,"Heathrow","London","United Kingdom","LHR","EGLL",51.4706,-0.461941,83,0,"E""#,
        "\n",
        r#"1382,"Charles de Gaulle","Paris","France","CDG","LFPG",49.012779,2.55,392,1,"E""#,
        "\n",
        r#"3448,"General Edward Lawrence Logan Intl","Boston","United States","BOS","KBOS",42.364347,-71.005181,19,-5,"A""#,
        "\n",
    );
    let (airports, stats) = parse_airport_feed_reader(feed.as_bytes(), "inline").unwrap();
    assert_eq!(stats.airports_parsed, 3);

    let store = test_store();
    let shutdown = CancellationToken::new();
    let (address, server) =
        server::bind("127.0.0.1:0".parse().unwrap(), store.clone(), shutdown.clone()).unwrap();
    let handle = tokio::spawn(server);
    let client = WeatherClient::new(format!("http://{}", address)).unwrap();

    let summary = upload_airports(
        &client,
        airports,
        2,
        &ProgressBar::hidden(),
        &CancellationToken::new(),
    )
    .await;

    assert_eq!(summary.uploaded, 2);
    assert_eq!(summary.already_registered, 1);
    assert!(summary.failed.is_empty());
    assert_eq!(store.airport_count(), 7);

    shutdown.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_cancelled_upload_skips_remaining_airports() {
    let (airports, _) = parse_airport_feed_reader(
        r#"507,"Heathrow","London","United Kingdom","LHR","EGLL",51.4706,-0.461941,83,0,"E""#
            .as_bytes(),
        "inline",
    )
    .unwrap();

    // Nothing listens here; a cancelled upload must not try to connect
    let client = WeatherClient::new("http://127.0.0.1:9").unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let summary = upload_airports(&client, airports, 4, &ProgressBar::hidden(), &cancel).await;
    assert_eq!(summary.cancelled, 1);
    assert_eq!(summary.uploaded, 0);
    assert!(matches!(
        summary.ensure_complete(),
        Err(Error::Interrupted { .. })
    ));
    assert!(UploadSummary::default().ensure_complete().is_ok());
}
