use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::path::Path;
use symbio::{
    api::{create_router, AppState},
    config::ArtifactsConfig,
    ArtifactLoader,
};
use tempfile::TempDir;
use tower::ServiceExt;

const FIXTURES: [&str; 4] = [
    "modelo_risco.onnx",
    "label_encoder_risco.json",
    "modelo_cluster.onnx",
    "scaler_cluster.onnx",
];

fn fixture_dir(names: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    for name in names {
        std::fs::copy(source.join(name), dir.path().join(name)).expect("failed to copy fixture");
    }
    dir
}

fn app_from(dir: &Path) -> Router {
    let config = ArtifactsConfig::in_dir(dir);
    let artifacts = ArtifactLoader::new(&config).load_all();
    create_router(AppState::new(artifacts, config.require_label_encoder))
}

async fn call(
    app: Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).expect("failed to build request");

    let response = app.oneshot(request).await.expect("router request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (status, bytes.to_vec())
}

async fn post_json(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let (status, bytes) = call(app, Method::POST, path, Some(body)).await;
    let body = serde_json::from_slice(&bytes).expect("response is not json");
    (status, body)
}

#[tokio::test]
async fn risk_prediction_decodes_label() {
    let dir = fixture_dir(&FIXTURES);
    let (status, body) = post_json(
        app_from(dir.path()),
        "/predict/risk",
        json!({"features": [90, 10, 70]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"risco_predito": "BAIXO"}));
}

#[tokio::test]
async fn risk_prediction_without_encoder_returns_raw_class() {
    let dir = fixture_dir(&["modelo_risco.onnx"]);
    let (status, body) = post_json(
        app_from(dir.path()),
        "/prever/risco",
        json!({"features": [90, 10, 70]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"risco_predito": 2}));
}

#[tokio::test]
async fn cluster_prediction_is_deterministic() {
    let dir = fixture_dir(&FIXTURES);
    let app = app_from(dir.path());

    for _ in 0..3 {
        let (status, body) = post_json(
            app.clone(),
            "/predict/cluster",
            json!({"features": [1, 2, 3, 4, 2, 5]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"cluster_predito": 3}));
    }
}

#[tokio::test]
async fn wrong_feature_count_is_rejected() {
    let dir = fixture_dir(&FIXTURES);
    let app = app_from(dir.path());

    let (status, body) =
        post_json(app.clone(), "/predict/risk", json!({"features": [1, 2]})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].as_str().unwrap().contains('3'));

    let (status, body) = post_json(
        app,
        "/predict/cluster",
        json!({"features": [1, 2, 3, 4, 5, 6, 7]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].as_str().unwrap().contains('6'));
}

#[tokio::test]
async fn non_numeric_features_are_rejected() {
    let dir = fixture_dir(&FIXTURES);
    let (status, body) = post_json(
        app_from(dir.path()),
        "/predict/risk",
        json!({"features": [true, "10", null]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["erro"].is_string());
}

#[tokio::test]
async fn missing_artifacts_answer_500() {
    let dir = fixture_dir(&[]);
    let app = app_from(dir.path());

    let (status, body) =
        post_json(app.clone(), "/predict/risk", json!({"features": [90, 10, 70]})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["erro"].is_string());

    let (status, body) = post_json(
        app,
        "/predict/cluster",
        json!({"features": [1, 2, 3, 4, 2, 5]}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["erro"].is_string());
}

#[tokio::test]
async fn cluster_needs_the_scaler_too() {
    let dir = fixture_dir(&["modelo_cluster.onnx"]);
    let (status, _) = post_json(
        app_from(dir.path()),
        "/predict/cluster",
        json!({"features": [1, 2, 3, 4, 2, 5]}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn liveness_does_not_depend_on_artifacts() {
    let dir = fixture_dir(&[]);
    let app = app_from(dir.path());

    let (status, body) = call(app.clone(), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("SYMBIO"));

    let (status, _) = call(app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_reports_artifacts_and_endpoints() {
    let dir = fixture_dir(&["modelo_cluster.onnx", "scaler_cluster.onnx"]);
    let (status, bytes) = call(app_from(dir.path()), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "degraded");

    let artifacts = body["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), 4);
    let classifier = artifacts
        .iter()
        .find(|a| a["kind"] == "classifier")
        .unwrap();
    assert_eq!(classifier["state"], "missing");

    let endpoints = body["endpoints"].as_array().unwrap();
    let risk = endpoints
        .iter()
        .find(|e| e["path"] == "/predict/risk")
        .unwrap();
    assert_eq!(risk["available"], false);
    let cluster = endpoints
        .iter()
        .find(|e| e["path"] == "/predict/cluster")
        .unwrap();
    assert_eq!(cluster["available"], true);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let dir = fixture_dir(&[]);
    let (status, _) = call(app_from(dir.path()), Method::GET, "/predict/salary", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
