use crate::infra::AppState;
use axum::body::Bytes;
use axum::extract::Path;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use lead_dork::error::AppError;
use lead_dork::store::LogTable;
use lead_dork::workflows::request::parse_body;
use lead_dork::workflows::{intel_router, IntelService};
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

const MISSING_UI: &str = "<h1>Error: index.html not found.</h1>";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LogRequest {
    pub(crate) keyword: String,
    pub(crate) category: String,
}

pub(crate) fn with_app_routes(service: Arc<IntelService>) -> Router {
    intel_router(service)
        .route("/", get(index))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/history/add", post(add_history))
        .route("/api/history/get", get(list_history))
        .route("/api/history/delete/:id", delete(delete_history))
        .route("/api/saved/add", post(add_saved))
        .route("/api/saved/get", get(list_saved))
        .route("/api/saved/delete/:id", delete(delete_saved))
        .route("/shutdown", post(shutdown_endpoint))
}

pub(crate) async fn index(Extension(state): Extension<AppState>) -> Response {
    match tokio::fs::read(state.ui_path.as_path()).await {
        Ok(contents) => {
            let mime = mime_guess::from_path(state.ui_path.as_path()).first_or(mime::TEXT_HTML_UTF_8);
            let content_type = HeaderValue::from_str(mime.as_ref())
                .unwrap_or_else(|_| HeaderValue::from_static("text/html; charset=utf-8"));
            ([(header::CONTENT_TYPE, content_type)], contents).into_response()
        }
        Err(err) => {
            warn!(path = %state.ui_path.display(), error = %err, "ui file unavailable");
            Html(MISSING_UI).into_response()
        }
    }
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn add_entry(
    state: &AppState,
    table: LogTable,
    body: &[u8],
) -> Result<Json<serde_json::Value>, AppError> {
    let request: LogRequest = parse_body(body)?;
    let id = state
        .store
        .add(table, request.keyword.trim(), request.category.trim())?;
    info!(table = table.name(), id, "search log entry added");
    Ok(Json(json!({ "status": "ok" })))
}

fn list_entries(state: &AppState, table: LogTable) -> Result<Json<serde_json::Value>, AppError> {
    let entries = state.store.list(table)?;
    Ok(Json(json!({ table.name(): entries })))
}

fn delete_entry(
    state: &AppState,
    table: LogTable,
    id: i64,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.delete(table, id)?;
    Ok(Json(json!({ "status": "deleted" })))
}

async fn add_history(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    add_entry(&state, LogTable::History, &body)
}

async fn list_history(
    Extension(state): Extension<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    list_entries(&state, LogTable::History)
}

async fn delete_history(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    delete_entry(&state, LogTable::History, id)
}

async fn add_saved(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    add_entry(&state, LogTable::Saved, &body)
}

async fn list_saved(
    Extension(state): Extension<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    list_entries(&state, LogTable::Saved)
}

async fn delete_saved(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    delete_entry(&state, LogTable::Saved, id)
}

pub(crate) async fn shutdown_endpoint(Extension(state): Extension<AppState>) -> Json<serde_json::Value> {
    info!("shutdown requested");
    state.shutdown.notify_one();
    Json(json!({ "status": "shutting down" }))
}
