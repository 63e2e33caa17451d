#![allow(clippy::disallowed_methods)]

use std::error::Error;
use std::sync::{Arc, Mutex};

use api::{ApiConfig, ApiError, BeerGardenClient, QueueService, SystemService};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use garden_core::{QueueRow, SystemSummary};
use serde::Deserialize;
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Backend {
    cleared: Arc<Mutex<Vec<String>>>,
    cleared_all: Arc<Mutex<u32>>,
    grouped_flags: Arc<Mutex<Vec<bool>>>,
}

#[derive(Deserialize)]
struct SystemsQuery {
    grouped: bool,
}

async fn list_queues() -> Json<Vec<QueueRow>> {
    Json(vec![
        QueueRow::new("echo", "1.0.0", "default", "echo.1-0-0.default", 7).with_display("Echo"),
        QueueRow::new("sleeper", "2.1.0", "default", "sleeper.2-1-0.default", 0),
    ])
}

async fn clear_queue(State(backend): State<Backend>, Path(name): Path<String>) -> impl IntoResponse {
    if name == "locked" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "message": "lock timeout" })),
        )
            .into_response();
    }
    backend.cleared.lock().unwrap().push(name);
    StatusCode::NO_CONTENT.into_response()
}

async fn clear_all(State(backend): State<Backend>) -> StatusCode {
    *backend.cleared_all.lock().unwrap() += 1;
    StatusCode::NO_CONTENT
}

async fn list_systems(
    State(backend): State<Backend>,
    Query(query): Query<SystemsQuery>,
) -> Json<Vec<SystemSummary>> {
    backend.grouped_flags.lock().unwrap().push(query.grouped);
    Json(vec![SystemSummary::new("5c1b", "echo", "1.0.0").with_instance("default", "RUNNING")])
}

async fn spawn_backend() -> Result<(String, Backend), Box<dyn Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let backend = Backend::default();
    let app = Router::new()
        .route("/api/v1/queues/", get(list_queues).delete(clear_all))
        .route("/api/v1/queues/:name", axum::routing::delete(clear_queue))
        .route("/api/v1/systems/", get(list_systems))
        .with_state(backend.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), backend))
}

async fn spawn_broken_backend() -> Result<String, Box<dyn Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route(
            "/api/v1/queues/",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "backend down\n") }),
        )
        .route("/api/v1/systems/", get(|| async { "definitely not json" }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn client_for(base_url: &str) -> Result<BeerGardenClient, ApiError> {
    BeerGardenClient::new(&ApiConfig::default().with_base_url(base_url))
}

#[tokio::test]
async fn lists_queues() -> Result<(), Box<dyn Error>> {
    let (url, _backend) = spawn_backend().await?;
    let client = client_for(&url)?;

    let queues = client.list_queues().await?;
    assert_eq!(queues.len(), 2);
    assert_eq!(queues[0].display.as_deref(), Some("Echo"));
    assert_eq!(queues[1].name, "sleeper.2-1-0.default");
    Ok(())
}

#[tokio::test]
async fn clears_single_and_all_queues() -> Result<(), Box<dyn Error>> {
    let (url, backend) = spawn_backend().await?;
    let client = client_for(&url)?;

    client.clear_queue("echo.1-0-0.default").await?;
    client.clear_all_queues().await?;

    assert_eq!(*backend.cleared.lock().unwrap(), vec!["echo.1-0-0.default".to_string()]);
    assert_eq!(*backend.cleared_all.lock().unwrap(), 1);
    Ok(())
}

#[tokio::test]
async fn clear_failure_carries_server_message() -> Result<(), Box<dyn Error>> {
    let (url, _backend) = spawn_backend().await?;
    let client = client_for(&url)?;

    let err = client.clear_queue("locked").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.detail(), Some("lock timeout"));
    Ok(())
}

#[tokio::test]
async fn lists_systems_with_grouping_flag() -> Result<(), Box<dyn Error>> {
    let (url, backend) = spawn_backend().await?;
    let client = client_for(&url)?;

    let systems = client.list_systems(false).await?;
    assert_eq!(systems.len(), 1);
    assert_eq!(systems[0].running_instances(), 1);
    assert_eq!(*backend.grouped_flags.lock().unwrap(), vec![false]);
    Ok(())
}

#[tokio::test]
async fn plain_text_error_and_bad_json_are_reported() -> Result<(), Box<dyn Error>> {
    let url = spawn_broken_backend().await?;
    let client = client_for(&url)?;

    let err = client.list_queues().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.detail(), Some("backend down"));

    let err = client.list_systems(false).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() -> Result<(), Box<dyn Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = client_for(&format!("http://{addr}"))?;
    let err = client.list_queues().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    Ok(())
}
