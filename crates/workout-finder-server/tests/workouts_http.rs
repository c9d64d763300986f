// SPDX-License-Identifier: Apache-2.0

use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use workout_finder_model::{CalendarZone, Category, DatasetLayout, Workout, WorkoutId};
use workout_finder_query::{QueryEngine, QueryLimits};
use workout_finder_server::{build_router, open_catalog, ApiConfig, AppState, CatalogConfig};
use workout_finder_store::{MemoryShardStore, ShardReader};

/// Record `i` of the fixture dataset: every 44th record starts in May 2025,
/// the rest in 2024; categories cycle `c1`..`c7`.
fn fixture_record(i: usize) -> Value {
    let start = if i % 44 == 0 {
        format!("2025-05-{:02}T09:30:00.000Z", i % 28 + 1)
    } else {
        format!("2024-{:02}-15T12:00:00.000Z", i % 12 + 1)
    };
    json!({
        "id": format!("w-{i}"),
        "name": format!("Workout {}", i + 1),
        "description": "Full body session",
        "startDate": start,
        "category": format!("c{}", i % 7 + 1),
    })
}

fn write_fixture_dataset(dir: &Path) {
    for shard in 1..=50 {
        let rows: Vec<Value> = ((shard - 1) * 20..shard * 20).map(fixture_record).collect();
        std::fs::write(
            dir.join(format!("workouts-page-{shard}.json")),
            serde_json::to_vec(&rows).expect("shard json"),
        )
        .expect("write shard");
    }
}

fn fixture_state() -> (TempDir, AppState) {
    let dir = tempdir().expect("tempdir");
    write_fixture_dataset(dir.path());
    let engine = open_catalog(&CatalogConfig {
        data_dir: dir.path().to_path_buf(),
        calendar_zone: CalendarZone::utc(),
        ..CatalogConfig::default()
    });
    (dir, AppState::new(engine))
}

async fn spawn_app(state: AppState) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, build_router(state))
            .await
            .expect("serve");
    });
    addr
}

async fn send_raw(
    addr: SocketAddr,
    path: &str,
    headers: &[(&str, &str)],
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    req.push_str("\r\n");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

fn header_value(head: &str, name: &str) -> Option<String> {
    head.lines().skip(1).find_map(|line| {
        let (k, v) = line.split_once(':')?;
        k.trim()
            .eq_ignore_ascii_case(name)
            .then(|| v.trim().to_string())
    })
}

fn json_body(body: &str) -> Value {
    serde_json::from_str(body).expect("json body")
}

fn names(body: &Value) -> Vec<String> {
    body["workouts"]
        .as_array()
        .expect("workouts")
        .iter()
        .map(|w| w["name"].as_str().expect("name").to_string())
        .collect()
}

#[tokio::test]
async fn unfiltered_pages_and_page_validation() {
    let (_dir, state) = fixture_state();
    let addr = spawn_app(state).await;

    let (status, head, body) = send_raw(addr, "/api/workouts", &[]).await;
    assert_eq!(status, 200);
    assert!(header_value(&head, "content-type")
        .is_some_and(|v| v.starts_with("application/json")));
    let body = json_body(&body);
    assert_eq!(body["totalItems"], 1000);
    assert_eq!(body["totalPages"], 50);
    assert_eq!(names(&body).len(), 20);
    assert_eq!(names(&body)[0], "Workout 1");
    assert_eq!(body["workouts"][0]["startDate"], "2025-05-01T09:30:00.000Z");

    let (status, _, body) = send_raw(addr, "/api/workouts?page=50", &[]).await;
    assert_eq!(status, 200);
    assert_eq!(names(&json_body(&body))[19], "Workout 1000");

    let (status, head, body) = send_raw(addr, "/api/workouts?page=51", &[]).await;
    assert_eq!(status, 400);
    let err = &json_body(&body)["error"];
    assert_eq!(err["code"], "PageOutOfRange");
    assert_eq!(err["message"], "Invalid page number");
    assert_eq!(
        header_value(&head, "x-request-id").as_deref(),
        err["request_id"].as_str()
    );

    let (status, _, body) = send_raw(addr, "/api/workouts?page=0", &[]).await;
    assert_eq!(status, 400);
    assert_eq!(json_body(&body)["error"]["code"], "PageOutOfRange");

    let (status, _, body) = send_raw(addr, "/api/workouts?page=abc", &[]).await;
    assert_eq!(status, 400);
    assert_eq!(json_body(&body)["error"]["code"], "InvalidQueryParameter");
}

#[tokio::test]
async fn filtered_pages_report_filtered_totals() {
    let (_dir, state) = fixture_state();
    let addr = spawn_app(state).await;

    let (status, _, body) = send_raw(addr, "/api/workouts?startDate=2025-05", &[]).await;
    assert_eq!(status, 200);
    let body = json_body(&body);
    assert_eq!(body["totalItems"], 23);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(names(&body).len(), 20);

    let (_, _, body) = send_raw(addr, "/api/workouts?startDate=2025-05&page=2", &[]).await;
    assert_eq!(names(&json_body(&body)), vec!["Workout 881", "Workout 925", "Workout 969"]);

    let (status, _, body) = send_raw(addr, "/api/workouts?startDate=2025-05&page=3", &[]).await;
    assert_eq!(status, 200);
    let body = json_body(&body);
    assert!(names(&body).is_empty());
    assert_eq!(body["totalItems"], 23);
    assert_eq!(body["totalPages"], 2);

    let (_, _, body) = send_raw(addr, "/api/workouts?startDate=2025-05&category=c1", &[]).await;
    let body = json_body(&body);
    assert_eq!(body["totalItems"], 4);
    assert_eq!(body["totalPages"], 1);

    let (_, _, body) = send_raw(addr, "/api/workouts?category=c1&category=c2&category=c1", &[]).await;
    assert_eq!(json_body(&body)["totalItems"], 286);

    let (status, _, body) = send_raw(addr, "/api/workouts?startDate=2025-13", &[]).await;
    assert_eq!(status, 400);
    assert_eq!(json_body(&body)["error"]["code"], "InvalidQueryParameter");

    let (status, _, body) = send_raw(addr, "/api/workouts?startDate=&category=", &[]).await;
    assert_eq!(status, 200);
    assert_eq!(json_body(&body)["totalItems"], 1000);
}

#[tokio::test]
async fn point_lookup_takes_precedence_and_misses_are_404() {
    let (_dir, state) = fixture_state();
    let addr = spawn_app(state).await;

    let (status, _, body) = send_raw(addr, "/api/workouts?id=w-730", &[]).await;
    assert_eq!(status, 200);
    let body = json_body(&body);
    assert_eq!(body["workout"]["name"], "Workout 731");
    assert_eq!(body["workout"]["category"], "c3");

    let (status, _, body) =
        send_raw(addr, "/api/workouts?id=w-3&page=abc&startDate=bad", &[]).await;
    assert_eq!(status, 200);
    assert_eq!(json_body(&body)["workout"]["id"], "w-3");

    let (status, _, body) = send_raw(addr, "/api/workouts?id=missing", &[]).await;
    assert_eq!(status, 404);
    let err = &json_body(&body)["error"];
    assert_eq!(err["code"], "WorkoutNotFound");
    assert_eq!(err["message"], "Workout not found");

    let long_id = format!("/api/workouts?id={}", "x".repeat(129));
    let (status, _, body) = send_raw(addr, &long_id, &[]).await;
    assert_eq!(status, 404);
    assert_eq!(json_body(&body)["error"]["code"], "WorkoutNotFound");

    let (status, _, _) = send_raw(addr, "/api/workouts?id=%20w-3%20", &[]).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn identical_queries_share_an_etag_and_revalidate() {
    let (_dir, state) = fixture_state();
    let addr = spawn_app(state).await;
    let path = "/api/workouts?category=c4&page=2";

    let (status, head, first_body) = send_raw(addr, path, &[]).await;
    assert_eq!(status, 200);
    let etag = header_value(&head, "etag").expect("etag header");
    assert!(header_value(&head, "cache-control").is_some_and(|v| v.contains("max-age")));

    let (_, head, second_body) = send_raw(addr, path, &[]).await;
    assert_eq!(header_value(&head, "etag").as_deref(), Some(etag.as_str()));
    assert_eq!(first_body, second_body);

    let (status, _, body) = send_raw(addr, path, &[("If-None-Match", &etag)]).await;
    assert_eq!(status, 304);
    assert!(body.is_empty());
}

#[tokio::test]
async fn caller_request_id_is_echoed_on_errors() {
    let (_dir, state) = fixture_state();
    let addr = spawn_app(state).await;

    let (status, head, body) =
        send_raw(addr, "/api/workouts?page=99", &[("x-request-id", "req-test-1")]).await;
    assert_eq!(status, 400);
    assert_eq!(header_value(&head, "x-request-id").as_deref(), Some("req-test-1"));
    assert_eq!(json_body(&body)["error"]["request_id"], "req-test-1");
}

#[tokio::test]
async fn missing_shard_reads_as_empty_page() {
    let (dir, state) = fixture_state();
    std::fs::remove_file(dir.path().join("workouts-page-1.json")).expect("remove shard");
    let metrics_state = state.clone();
    let addr = spawn_app(state).await;

    let (status, _, body) = send_raw(addr, "/api/workouts?page=1", &[]).await;
    assert_eq!(status, 200);
    let body = json_body(&body);
    assert!(names(&body).is_empty());
    assert_eq!(body["totalItems"], 1000);
    assert_eq!(body["totalPages"], 50);

    let (_, _, body) = send_raw(addr, "/api/workouts?startDate=2025-05", &[]).await;
    assert_eq!(json_body(&body)["totalItems"], 22);

    assert_eq!(metrics_state.engine.diagnostics().failures(), 2);
    let (_, _, text) = send_raw(addr, "/metrics", &[]).await;
    assert!(text.contains("workout_finder_shard_read_failures_total 2"));
    assert!(text.contains("workout_finder_scan_queries_total 1"));
}

#[tokio::test]
async fn slow_scan_hits_request_timeout() {
    let layout = DatasetLayout::new(2, 4).expect("layout");
    let records = (0..8)
        .map(|i| {
            Workout::new(
                WorkoutId::parse(&format!("s-{i}")).expect("id"),
                "slow",
                "",
                "2025-05-01T00:00:00.000Z",
                Category::parse("c1").expect("category"),
            )
        })
        .collect();
    let store = MemoryShardStore::from_records(layout, records)
        .with_read_delay(Duration::from_millis(500));
    let engine = QueryEngine::new(
        ShardReader::new(Arc::new(store)),
        CalendarZone::utc(),
        QueryLimits::default(),
    );
    let state = AppState::with_config(
        engine,
        ApiConfig {
            request_timeout: Duration::from_millis(25),
            ..ApiConfig::default()
        },
    );
    let addr = spawn_app(state).await;

    let (status, head, body) = send_raw(addr, "/api/workouts?category=c1", &[]).await;
    assert_eq!(status, 503);
    assert_eq!(header_value(&head, "retry-after").as_deref(), Some("3"));
    assert_eq!(json_body(&body)["error"]["code"], "Timeout");
}

#[tokio::test]
async fn ops_endpoints_report_health_and_contract() {
    let (_dir, state) = fixture_state();
    let ready = state.ready.clone();
    let addr = spawn_app(state).await;

    let (status, _, body) = send_raw(addr, "/healthz", &[]).await;
    assert_eq!((status, body.as_str()), (200, "ok"));

    let (status, _, _) = send_raw(addr, "/readyz", &[]).await;
    assert_eq!(status, 200);
    ready.store(false, Ordering::Relaxed);
    let (status, _, body) = send_raw(addr, "/readyz", &[]).await;
    assert_eq!(status, 503);
    assert_eq!(json_body(&body)["error"]["code"], "NotReady");

    let (status, _, body) = send_raw(addr, "/v1/version", &[]).await;
    assert_eq!(status, 200);
    let version = json_body(&body);
    assert_eq!(version["dataset"]["totalRecords"], 1000);
    assert_eq!(version["dataset"]["pageSize"], 20);

    let (status, _, body) = send_raw(addr, "/v1/openapi.json", &[]).await;
    assert_eq!(status, 200);
    assert!(json_body(&body)["paths"].get("/api/workouts").is_some());

    let (status, head, text) = send_raw(addr, "/metrics", &[]).await;
    assert_eq!(status, 200);
    assert!(header_value(&head, "content-type").is_some_and(|v| v.starts_with("text/plain")));
    assert!(text.contains("workout_finder_requests_total{route=\"/healthz\",status=\"200\"} 1"));
    assert!(text.contains("workout_finder_requests_total{route=\"/readyz\",status=\"503\"} 1"));
}
