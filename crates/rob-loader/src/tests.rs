//! End-to-end loader tests against local files and an in-process HTTP
//! server standing in for S3.

use std::path::PathBuf;

use axum::{Router, http::StatusCode, routing::get};
use rob_core::CaseStatus;

use crate::{LoadError, Source, load};

const EXPORT: &str = "\
Sys_id,Erstellt_am,Einlieferungsdatum,Tierart,Fundort,Lat,Long,Aktuell
1,2020-01-01 09:00:00,2020-01-01,Seehund,Büsum,54.1333,8.8667,Reha
1,2020-02-01 09:00:00,2020-01-01,Seehund,Büsum,54.1333,8.8667,Ausgewildert
2,2020-01-03 12:00:00,2020-01-03,Kegelrobbe,,,,Verstorben
";

/// Serve `body` with `status` for every object path; returns the endpoint.
async fn fake_bucket(status: StatusCode, body: &'static str) -> String {
  let app = Router::new()
    .route("/{bucket}/{*key}", get(move || async move { (status, body) }));
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
    .await
    .expect("bind test listener");
  let addr = listener.local_addr().expect("local addr");
  tokio::spawn(async move {
    axum::serve(listener, app).await.expect("test server");
  });
  format!("http://{addr}")
}

fn s3_at(endpoint: String) -> Source {
  Source::S3 {
    bucket:   "rob-oliver".into(),
    key:      "data/deployment/rob.csv".into(),
    region:   None,
    endpoint: Some(endpoint),
  }
}

fn temp_path(name: &str) -> PathBuf {
  std::env::temp_dir()
    .join(format!("rob-loader-{}-{name}.csv", std::process::id()))
}

// ─── Files ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn loads_a_local_export() {
  let path = temp_path("ok");
  std::fs::write(&path, EXPORT).unwrap();

  let log = load(&Source::File { path: path.clone() }).await.unwrap();
  std::fs::remove_file(&path).ok();

  assert_eq!(log.len(), 3);
  assert_eq!(log.case_count(), 2);
  assert_eq!(log.records()[1].status, CaseStatus::Released);
  assert!(log.records()[2].location.is_none());
}

#[tokio::test]
async fn missing_file_is_not_found() {
  let source = Source::File { path: temp_path("does-not-exist") };
  let err = load(&source).await.unwrap_err();
  assert!(matches!(err, LoadError::NotFound { .. }), "{err:?}");
}

#[tokio::test]
async fn malformed_file_fails_the_whole_load() {
  let path = temp_path("bad");
  std::fs::write(
    &path,
    "Sys_id,Erstellt_am,Einlieferungsdatum,Tierart,Aktuell\n1,2020-01-01,2020-01-01,Seehund,Reha\n2,2020-01-02,nie,Seehund,Reha\n",
  )
  .unwrap();

  let err = load(&Source::File { path: path.clone() }).await.unwrap_err();
  std::fs::remove_file(&path).ok();

  match err {
    LoadError::Malformed { row, column, value } => {
      assert_eq!(row, 2);
      assert_eq!(column, "Einlieferungsdatum");
      assert_eq!(value, "nie");
    }
    other => panic!("expected Malformed, got {other:?}"),
  }
}

// ─── S3 over HTTP ────────────────────────────────────────────────────────────

#[tokio::test]
async fn loads_from_a_bucket() {
  let endpoint = fake_bucket(StatusCode::OK, EXPORT).await;
  let log = load(&s3_at(endpoint)).await.unwrap();
  assert_eq!(log.len(), 3);
}

#[tokio::test]
async fn missing_key_is_not_found() {
  let endpoint = fake_bucket(StatusCode::NOT_FOUND, "NoSuchKey").await;
  let err = load(&s3_at(endpoint)).await.unwrap_err();
  assert!(matches!(err, LoadError::NotFound { .. }), "{err:?}");
  assert!(err.to_string().contains("s3://rob-oliver/data/deployment/rob.csv"));
}

#[tokio::test]
async fn forbidden_key_is_access_denied() {
  let endpoint = fake_bucket(StatusCode::FORBIDDEN, "AccessDenied").await;
  let err = load(&s3_at(endpoint)).await.unwrap_err();
  assert!(matches!(err, LoadError::AccessDenied { .. }), "{err:?}");
}

#[tokio::test]
async fn other_statuses_are_remote_errors() {
  let endpoint =
    fake_bucket(StatusCode::SERVICE_UNAVAILABLE, "SlowDown").await;
  let err = load(&s3_at(endpoint)).await.unwrap_err();
  assert!(
    matches!(err, LoadError::Remote { status: 503, .. }),
    "{err:?}"
  );
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
  // Bind and immediately drop a listener to get a port nobody serves.
  let addr = {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
  };
  let err = load(&s3_at(format!("http://{addr}"))).await.unwrap_err();
  assert!(matches!(err, LoadError::Transport(_)), "{err:?}");
}
