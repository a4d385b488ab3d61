mod common;

use common::{StubServer, FLIGHTS_JSON, STATS_JSON};
use flightdash::error::DashboardError;
use flightdash::fetch::{FetchOptions, FlightApi, HttpApi};
use flightdash::filter::FilterCriteria;

fn api(server: &StubServer) -> HttpApi {
    HttpApi::new(&FetchOptions {
        api_url: server.base_url.clone(),
        proxy: None,
        timeout: 5,
    })
    .unwrap()
}

fn backend() -> StubServer {
    StubServer::start(|target| {
        if target == "/api/stats" {
            (200, STATS_JSON.to_string())
        } else if target.starts_with("/api/flights") {
            (200, FLIGHTS_JSON.to_string())
        } else {
            (404, r#"{"error":"not found"}"#.to_string())
        }
    })
}

#[tokio::test]
async fn decodes_stats() {
    let server = backend();
    let stats = api(&server).fetch_stats().await.unwrap();
    assert_eq!(stats.total_flights, 12345);
    assert_eq!(stats.flights_today, 87);
    assert!((stats.average_altitude_ft - 4321.6).abs() < 1e-9);
}

#[tokio::test]
async fn decodes_flights_with_nulls_and_sqlite_flags() {
    let server = backend();
    let flights = api(&server)
        .fetch_flights(&FilterCriteria::default())
        .await
        .unwrap();
    assert_eq!(flights.len(), 2);
    assert_eq!(flights[0].callsign.as_deref(), Some("DLH4AB"));
    assert_eq!(flights[0].is_departing_fra, Some(true));
    assert_eq!(flights[0].closest_point, Some(false));
    assert_eq!(flights[1].altitude_ft, None);
    assert_eq!(flights[1].aircraft_type, None);
    assert_eq!(flights[1].record_type, None);
    assert_eq!(flights[1].callsign(), None);
    assert_eq!(server.requests(), vec!["/api/flights".to_string()]);
}

#[tokio::test]
async fn filtered_request_carries_only_present_params() {
    let server = backend();
    let criteria = FilterCriteria {
        altitude_max: Some(3000.0),
        tracking_number: Some("3c6".into()),
        ..FilterCriteria::default()
    };
    api(&server).fetch_flights(&criteria).await.unwrap();
    assert_eq!(
        server.requests(),
        vec!["/api/flights/filtered?altitude_max=3000&tracking_number=3c6".to_string()]
    );
}

#[tokio::test]
async fn snapshot_issues_both_requests() {
    let server = backend();
    let (stats, flights) = flightdash::snapshot(&api(&server), &FilterCriteria::default())
        .await
        .unwrap();
    assert_eq!(stats.total_flights, 12345);
    assert_eq!(flights.len(), 2);

    let mut requests = server.requests();
    requests.sort();
    assert_eq!(requests, vec!["/api/flights", "/api/stats"]);
}

#[tokio::test]
async fn server_error_is_http_status() {
    let server = StubServer::start(|_| (500, r#"{"error":"db locked"}"#.to_string()));
    let err = api(&server).fetch_stats().await.unwrap_err();
    assert!(matches!(err, DashboardError::HttpStatus(500)));
    assert_eq!(err.exit_code(), 5);
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = StubServer::start(|_| (429, "{}".to_string()));
    let err = api(&server)
        .fetch_flights(&FilterCriteria::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::RateLimited));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = StubServer::start(|_| (200, "<html>oops</html>".to_string()));
    let err = api(&server).fetch_stats().await.unwrap_err();
    assert!(matches!(err, DashboardError::Decode(_)));
    assert_eq!(err.kind(), "decode_error");
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let server = backend();
    let api = HttpApi::new(&FetchOptions {
        api_url: format!("{}/", server.base_url),
        proxy: None,
        timeout: 5,
    })
    .unwrap();
    api.fetch_stats().await.unwrap();
    assert_eq!(server.requests(), vec!["/api/stats".to_string()]);
}
