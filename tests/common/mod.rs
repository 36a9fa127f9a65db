//! In-process stand-in for the governance service

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::sync::Mutex;

use afdb_console::config::ApiConfig;
use afdb_console::org::{OrgUnit, UpsertUnitRequest};
use afdb_console::screens::contracts::{DataContract, RegisterContractRequest};
use afdb_console::screens::ingestion::UploadRequest;
use afdb_console::screens::query::QueryRequest;
use afdb_console::screens::role::AssumeRoleRequest;
use afdb_console::screens::taxonomy::AddPathRequest;
use afdb_console::{ApiClient, SessionStore};

#[derive(Clone, Default)]
pub struct MockState {
    pub units: Arc<Mutex<Vec<OrgUnit>>>,
    pub paths: Arc<Mutex<Vec<String>>>,
    pub contracts: Arc<Mutex<Vec<DataContract>>>,
    pub uploads: Arc<Mutex<Vec<UploadRequest>>>,
    /// X-Session-Id of every request, in arrival order
    pub sessions_seen: Arc<Mutex<Vec<Option<String>>>>,
    pub fail_units: Arc<AtomicBool>,
    /// Served verbatim by GET /org/units when set
    pub raw_units_body: Arc<Mutex<Option<String>>>,
}

impl MockState {
    pub fn with_units(units: Vec<OrgUnit>) -> Self {
        let state = Self::default();
        *state.units.try_lock().unwrap() = units;
        state
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_units.store(failing, Ordering::SeqCst);
    }
}

async fn record_session(state: &MockState, headers: &HeaderMap) {
    let session = headers
        .get("x-session-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.sessions_seen.lock().await.push(session);
}

async fn list_units(State(state): State<MockState>, headers: HeaderMap) -> Response {
    record_session(&state, &headers).await;
    if state.fail_units.load(Ordering::SeqCst) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"message": "org index rebuilding"})),
        )
            .into_response();
    }
    if let Some(body) = state.raw_units_body.lock().await.clone() {
        return ([(header::CONTENT_TYPE, "application/json")], body).into_response();
    }
    Json(state.units.lock().await.clone()).into_response()
}

async fn upsert_unit(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(req): Json<UpsertUnitRequest>,
) -> Response {
    record_session(&state, &headers).await;
    if req.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "name is required"})),
        )
            .into_response();
    }
    let unit = OrgUnit::new(req.id, req.name, req.parents);
    let mut units = state.units.lock().await;
    match units.iter_mut().find(|u| u.id == unit.id) {
        Some(existing) => *existing = unit,
        None => units.push(unit),
    }
    Json(json!({"ok": true})).into_response()
}

async fn list_paths(State(state): State<MockState>, headers: HeaderMap) -> Json<Vec<String>> {
    record_session(&state, &headers).await;
    Json(state.paths.lock().await.clone())
}

async fn add_path(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(req): Json<AddPathRequest>,
) -> StatusCode {
    record_session(&state, &headers).await;
    let mut paths = state.paths.lock().await;
    if !paths.contains(&req.path) {
        paths.push(req.path);
    }
    StatusCode::OK
}

async fn assume_role(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(req): Json<AssumeRoleRequest>,
) -> Json<serde_json::Value> {
    record_session(&state, &headers).await;
    Json(json!({"session_id": format!("sess-{}-{}", req.person_id, req.scope_ids.len())}))
}

async fn list_contracts(
    State(state): State<MockState>,
    headers: HeaderMap,
) -> Json<Vec<DataContract>> {
    record_session(&state, &headers).await;
    Json(state.contracts.lock().await.clone())
}

async fn register_contract(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(req): Json<RegisterContractRequest>,
) -> Json<serde_json::Value> {
    record_session(&state, &headers).await;
    state.contracts.lock().await.push(req.contract);
    Json(json!({"status": "registered"}))
}

async fn semanticql(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(req): Json<QueryRequest>,
) -> Json<serde_json::Value> {
    record_session(&state, &headers).await;
    Json(json!({"ql": req.ql, "hits": [{"id": "doc-1", "score": 0.9}]}))
}

async fn ingest(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(req): Json<UploadRequest>,
) -> Json<serde_json::Value> {
    record_session(&state, &headers).await;
    let count = req.artifacts.len();
    state.uploads.lock().await.push(req);
    Json(json!({"ingested": count}))
}

pub fn router(state: MockState) -> Router {
    Router::new()
        .route("/org/units", get(list_units))
        .route("/org/units/upsert", post(upsert_unit))
        .route("/taxonomy/paths", get(list_paths).post(add_path))
        .route("/assume_role", post(assume_role))
        .route("/contracts", get(list_contracts).post(register_contract))
        .route("/semanticql", post(semanticql))
        .route("/ingest", post(ingest))
        .with_state(state)
}

/// Serve the mock on an ephemeral port; returns its base URL
pub async fn spawn(state: MockState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn client(base_url: &str, session: SessionStore) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    };
    ApiClient::new(&config, session).unwrap()
}
