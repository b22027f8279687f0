//! HTTP API for the course assistant.
//!
//! Thin axum transport over [`RagSystem`]: query answering, corpus
//! statistics, and session management.

pub mod types;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::rag::RagSystem;
use types::{
    ClearSessionResponse, CourseStatsResponse, ErrorResponse, HealthResponse, QueryRequest,
    QueryResponse,
};

/// Shared state for all handlers.
pub struct AppState {
    pub rag: Arc<RagSystem>,
}

/// Build the application router.
pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/query", post(query))
        .route("/api/courses", get(courses))
        .route("/api/sessions/:session_id/clear", delete(clear_session))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn serve(config: &Config, rag: Arc<RagSystem>) -> anyhow::Result<()> {
    let state = Arc::new(AppState { rag });
    let app = routes(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn internal_error(message: String) -> Response {
    error!("{}", message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}

async fn query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Response {
    let session_id = match request.session_id {
        Some(id) => id,
        None => state.rag.sessions.create_session().await,
    };

    match state.rag.query(&request.query, Some(&session_id)).await {
        Ok((answer, sources)) => Json(QueryResponse {
            answer,
            sources,
            session_id,
        })
        .into_response(),
        Err(e) => internal_error(format!("Query failed: {}", e)),
    }
}

async fn courses(State(state): State<Arc<AppState>>) -> Json<CourseStatsResponse> {
    let analytics = state.rag.analytics().await;
    Json(CourseStatsResponse {
        total_courses: analytics.total_courses,
        course_titles: analytics.course_titles,
    })
}

async fn clear_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Json<ClearSessionResponse> {
    state.rag.sessions.clear_session(&session_id).await;
    Json(ClearSessionResponse {
        message: "Session cleared successfully".to_string(),
        session_id,
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
