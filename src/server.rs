// src/server.rs
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::check::FactCheckClient;
use crate::history::HistoryStore;
use crate::types::{is_blank_claim, HistoryEntry};

pub struct Engine {
    pub checker: FactCheckClient,
    pub history: Mutex<HistoryStore>,
    in_flight: Mutex<()>,
}

impl Engine {
    pub fn new(checker: FactCheckClient, history: HistoryStore) -> Self {
        Self { checker, history: Mutex::new(history), in_flight: Mutex::new(()) }
    }
}

#[derive(Deserialize)]
pub struct CheckReq {
    claim: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: msg.into() })).into_response()
}

pub async fn check_claim(State(engine): State<Arc<Engine>>, Json(req): Json<CheckReq>) -> Response {
    if is_blank_claim(&req.claim) {
        return error_response(StatusCode::BAD_REQUEST, "Claim must not be empty.");
    }
    // one outstanding check at a time
    let Ok(_guard) = engine.in_flight.try_lock() else {
        return error_response(StatusCode::CONFLICT, "A check is already in progress.");
    };

    let result = match engine.checker.check(&req.claim).await {
        Ok(r) => r,
        Err(e) => return error_response(StatusCode::BAD_GATEWAY, e.to_string()),
    };

    let entry = HistoryEntry::new(req.claim, result);
    let mut history = engine.history.lock().await;
    if let Err(e) = history.add(entry.clone()) {
        tracing::error!(error = %e, "failed to persist history");
    }
    Json(entry).into_response()
}

pub async fn list_history(State(engine): State<Arc<Engine>>) -> Json<Vec<HistoryEntry>> {
    Json(engine.history.lock().await.list().to_vec())
}

pub async fn clear_history(State(engine): State<Arc<Engine>>) -> StatusCode {
    if let Err(e) = engine.history.lock().await.clear() {
        tracing::error!(error = %e, "failed to remove history record");
    }
    StatusCode::NO_CONTENT
}

pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/check", post(check_claim))
        .route("/history", get(list_history).delete(clear_history))
        .with_state(engine)
}

pub async fn run_server(engine: Engine, addr: &str) -> anyhow::Result<()> {
    let app = router(Arc::new(engine));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "veritas listening");
    axum::serve(listener, app).await?;
    Ok(())
}
