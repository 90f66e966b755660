//! # API Module
//!
//! Axum HTTP surface over the scoring engine.
//!
//! Routes:
//! - `GET  /health` — liveness + version
//! - `GET  /status` — store counts and cache statistics
//! - `POST /responses` — submit one rating response
//! - `GET  /employees/{employee}/cycles/{cycle}/score` — the score boundary
//! - `GET  /cycles/{cycle}/summary` — all scores for a cycle
//!
//! Viewer role arrives in the `x-viewer-role` header (`ic`, `manager`,
//! `hr`). Individual contributors never see numeric scores: for `ic`
//! viewers the score endpoints return the label and reviewer count only.
//! A missing or unknown header is treated as `ic` — the least privileged
//! view is the default.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use threesixty_core::{
    CalculatedScore, CoreError, CycleId, EmployeeId, RatingResponse, ScoringEngine,
};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// STATE
// =============================================================================

/// Shared application state.
///
/// Score reads take the write lock too: computing a score updates the
/// LRU cache inside the engine.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RwLock<ScoringEngine>>,
}

impl AppState {
    /// Wrap an engine for sharing across handlers.
    #[must_use]
    pub fn new(engine: ScoringEngine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }
}

// =============================================================================
// VIEWER ROLE
// =============================================================================

/// Who is looking at the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRole {
    /// Individual contributor: label only, no numbers.
    Ic,
    /// Manager: full view.
    Manager,
    /// HR: full view.
    Hr,
}

impl ViewerRole {
    /// Parse from the `x-viewer-role` header; anything unrecognized is `Ic`.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers
            .get("x-viewer-role")
            .and_then(|v| v.to_str().ok())
        {
            Some("manager") => Self::Manager,
            Some("hr") => Self::Hr,
            _ => Self::Ic,
        }
    }

    /// Whether this role may see numeric scores.
    #[must_use]
    pub fn sees_numbers(&self) -> bool {
        !matches!(self, Self::Ic)
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

/// API errors with their HTTP mappings.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no score for employee {0} in cycle {1}")]
    NoScore(u64, u64),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unprocessable(String),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DuplicateResponse { .. } => Self::Conflict(err.to_string()),
            CoreError::InvalidRating(_)
            | CoreError::InvalidWeights(_)
            | CoreError::InvalidThresholds(_) => Self::Unprocessable(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NoScore(..) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

// =============================================================================
// RESPONSE BODIES
// =============================================================================

/// Health check body.
#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub version: &'static str,
}

/// Per-type breakdown row in the full score view.
#[derive(Debug, Serialize)]
pub struct TypeRow {
    pub reviewer_type: &'static str,
    pub mean: f64,
    pub reviewers: u32,
    pub responses: u32,
}

/// Full score view for manager/HR viewers.
#[derive(Debug, Serialize)]
pub struct FullScoreBody {
    pub employee_id: EmployeeId,
    pub cycle_id: CycleId,
    pub colleague_score: f64,
    pub score_hundredths: u32,
    pub label: threesixty_core::RatingLabel,
    pub label_name: &'static str,
    pub total_reviewers: u32,
    pub total_responses: u32,
    pub by_type: Vec<TypeRow>,
}

/// Redacted score view for individual contributors.
#[derive(Debug, Serialize)]
pub struct RedactedScoreBody {
    pub employee_id: EmployeeId,
    pub cycle_id: CycleId,
    pub label: threesixty_core::RatingLabel,
    pub label_name: &'static str,
    pub total_reviewers: u32,
}

/// Either view, picked by role.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScoreBody {
    Full(FullScoreBody),
    Redacted(RedactedScoreBody),
}

fn hundredths_to_score(hundredths: u32) -> f64 {
    f64::from(hundredths) / 100.0
}

impl ScoreBody {
    /// Render a calculated score for the given viewer.
    #[must_use]
    pub fn render(score: CalculatedScore, role: ViewerRole) -> Self {
        if role.sees_numbers() {
            Self::Full(FullScoreBody {
                employee_id: score.employee_id,
                cycle_id: score.cycle_id,
                colleague_score: hundredths_to_score(score.score_hundredths),
                score_hundredths: score.score_hundredths,
                label: score.label,
                label_name: score.label.display_name(),
                total_reviewers: score.total_reviewers,
                total_responses: score.total_responses,
                by_type: score
                    .by_type
                    .into_iter()
                    .map(|(ty, breakdown)| TypeRow {
                        reviewer_type: ty.as_str(),
                        mean: hundredths_to_score(breakdown.mean_hundredths),
                        reviewers: breakdown.reviewers,
                        responses: breakdown.responses,
                    })
                    .collect(),
            })
        } else {
            Self::Redacted(RedactedScoreBody {
                employee_id: score.employee_id,
                cycle_id: score.cycle_id,
                label: score.label,
                label_name: score.label.display_name(),
                total_reviewers: score.total_reviewers,
            })
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn status(State(state): State<AppState>) -> Response {
    let engine = state.engine.read().await;
    Json(engine.status()).into_response()
}

async fn submit_response(
    State(state): State<AppState>,
    Json(response): Json<RatingResponse>,
) -> Result<Response, ApiError> {
    let mut engine = state.engine.write().await;
    engine.submit(response.clone())?;
    tracing::info!(
        employee = response.employee_id.0,
        cycle = response.cycle_id.0,
        reviewer = response.reviewer_id.0,
        reviewer_type = response.reviewer_type.as_str(),
        "response submitted"
    );
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "status": "accepted" }))).into_response())
}

async fn get_score(
    State(state): State<AppState>,
    Path((employee, cycle)): Path<(u64, u64)>,
    headers: HeaderMap,
) -> Result<Json<ScoreBody>, ApiError> {
    let role = ViewerRole::from_headers(&headers);
    let mut engine = state.engine.write().await;
    let score = engine
        .get_score(EmployeeId(employee), CycleId(cycle))
        .ok_or(ApiError::NoScore(employee, cycle))?;
    Ok(Json(ScoreBody::render(score, role)))
}

async fn cycle_summary(
    State(state): State<AppState>,
    Path(cycle): Path<u64>,
    headers: HeaderMap,
) -> Json<Vec<ScoreBody>> {
    let role = ViewerRole::from_headers(&headers);
    let mut engine = state.engine.write().await;
    let scores = engine.cycle_summary(CycleId(cycle));
    Json(
        scores
            .into_iter()
            .map(|score| ScoreBody::render(score, role))
            .collect(),
    )
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/responses", post(submit_response))
        .route("/employees/{employee}/cycles/{cycle}/score", get(get_score))
        .route("/cycles/{cycle}/summary", get(cycle_summary))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the HTTP server until shutdown.
pub async fn serve(bind: &str, engine: ScoringEngine) -> Result<(), std::io::Error> {
    let state = AppState::new(engine);
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(addr = %bind, "threesixty server listening");
    axum::serve(listener, router).await
}
