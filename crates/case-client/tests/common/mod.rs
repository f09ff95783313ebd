//! Mock case review backend served on an ephemeral local port

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use case_core::fixtures::{sample_cases, sample_document, sample_documents};
use case_core::Case;
use serde_json::json;
use tower_http::trace::TraceLayer;

/// Case id whose lookups fail with a 500
pub const BROKEN_CASE: &str = "case-500";
/// Case id whose document list names another case
pub const FOREIGN_DOCS_CASE: &str = "case-foreign";
/// Case id whose record comes back without an id
pub const ANONYMOUS_CASE: &str = "case-anon";

#[derive(Clone)]
struct Backend {
    cases: Arc<Vec<Case>>,
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Start the mock backend and return its base URL
pub async fn spawn_backend() -> anyhow::Result<String> {
    init_tracing();

    let state = Backend {
        cases: Arc::new(sample_cases()),
    };

    let app = Router::new()
        .route("/api/cases", get(list_cases))
        .route("/api/cases/:id", get(get_case))
        .route("/api/documents/cases/:id/documents", get(list_documents))
        .route("/api/corpus/regenerate-index", post(regenerate_index))
        .route("/api/documents/regenerate-analysis", post(regenerate_analysis))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{}", addr))
}

/// A base URL with nothing listening behind it
pub async fn unreachable_base() -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

async fn list_cases(State(state): State<Backend>) -> Json<Vec<Case>> {
    Json(state.cases.as_ref().clone())
}

async fn get_case(State(state): State<Backend>, Path(id): Path<String>) -> Response {
    match id.as_str() {
        BROKEN_CASE => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "database offline" })),
        )
            .into_response(),
        ANONYMOUS_CASE => Json(json!({ "title": "No id here" })).into_response(),
        FOREIGN_DOCS_CASE => Json(json!({ "id": FOREIGN_DOCS_CASE, "title": "Mixed up" }))
            .into_response(),
        _ => match state.cases.iter().find(|c| c.id == id) {
            Some(case) => Json(case.clone()).into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Case not found" })),
            )
                .into_response(),
        },
    }
}

async fn list_documents(Path(id): Path<String>) -> Response {
    if id == FOREIGN_DOCS_CASE {
        return Json(vec![sample_document("doc-900", "case-002", true)]).into_response();
    }
    Json(sample_documents(&id)).into_response()
}

async fn regenerate_index() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Corpus index regenerated",
        "total_documents": 42,
        "research_areas": ["Contract Law", "Employment Law"],
        "legal_concepts_count": 128,
        "last_updated": "2024-03-01T12:00:00Z"
    }))
}

async fn regenerate_analysis() -> Json<serde_json::Value> {
    Json(json!({
        "success": false,
        "message": "Analysis finished with failures",
        "total_documents": 5,
        "analyzed_documents": 3,
        "failed_documents": 2,
        "average_confidence": 0.81,
        "processing_time_seconds": 4.5
    }))
}
