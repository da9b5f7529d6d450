//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::guidelines;
use crate::state::AppState;
use authorcheck_core::{Analysis, Submission};

/// Prefix of the detection API
pub const API_PREFIX: &str = "/api/v1/ai-detection";

const SERVICE_NAME: &str = "authorcheck";

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/analyze", post(analyze))
        .route("/guidelines", get(get_guidelines))
        .route("/declare-usage", post(declare_usage))
        .route("/health", get(health_check));

    let router = Router::new()
        .route("/", get(root))
        .route("/metrics", get(metrics))
        .nest(API_PREFIX, api_routes)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http());

    let router = if state.config.cors.allow_any_origin {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.with_state(state)
}

/// Response envelope shared by the detection endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A student's own account of their AI usage
#[derive(Debug, Deserialize)]
pub struct UsageDeclaration {
    pub submission_id: String,
    pub student_id: String,
    pub declared_usage: bool,
    #[serde(default, alias = "usage_description")]
    pub description: Option<String>,
    #[serde(default)]
    pub declared_at: Option<DateTime<Utc>>,
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "analyze": format!("{}/analyze", API_PREFIX),
            "guidelines": format!("{}/guidelines", API_PREFIX),
            "declare_usage": format!("{}/declare-usage", API_PREFIX),
            "health": format!("{}/health", API_PREFIX),
            "metrics": "/metrics",
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Score a submission
async fn analyze(
    State(state): State<AppState>,
    Json(submission): Json<Submission>,
) -> Result<Json<ApiResponse<Analysis>>, AppError> {
    metrics::counter!("authorcheck_requests_total", "endpoint" => "analyze").increment(1);
    info!(
        submission_id = %submission.submission_id,
        student_id = %submission.student_id,
        kind = %submission.kind,
        "Received analysis request"
    );

    validate_submission(&submission)?;

    let start = Instant::now();
    let analysis = state.service.analyze(&submission);
    metrics::histogram!("authorcheck_analysis_latency_us")
        .record(start.elapsed().as_micros() as f64);
    metrics::counter!(
        "authorcheck_analyses_total",
        "kind" => submission.kind.as_str(),
        "category" => analysis.category.as_str()
    )
    .increment(1);

    if analysis.requires_verification {
        warn!(
            submission_id = %analysis.submission_id,
            score = analysis.usage_score,
            category = %analysis.category,
            "Comprehension verification required"
        );
    }

    Ok(Json(ApiResponse::ok(analysis)))
}

async fn get_guidelines() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::ok(guidelines::document()))
}

/// Record a usage declaration (logged, not stored)
async fn declare_usage(Json(declaration): Json<UsageDeclaration>) -> Result<Json<Value>, AppError> {
    metrics::counter!("authorcheck_requests_total", "endpoint" => "declare_usage").increment(1);

    if declaration.submission_id.trim().is_empty() || declaration.student_id.trim().is_empty() {
        return Err(authorcheck_core::Error::validation(
            "submission_id and student_id must not be empty",
        )
        .into());
    }

    let declared_at = declaration.declared_at.unwrap_or_else(Utc::now);
    info!(
        submission_id = %declaration.submission_id,
        student_id = %declaration.student_id,
        declared_usage = declaration.declared_usage,
        description = declaration.description.as_deref().unwrap_or(""),
        "AI usage declaration received"
    );

    Ok(Json(json!({
        "success": true,
        "message": "AI usage declaration recorded. Thank you for your honesty.",
        "data": {
            "submission_id": declaration.submission_id,
            "declared_at": declared_at,
        }
    })))
}

async fn fallback() -> AppError {
    AppError::NotFound("Not found".to_string())
}

fn validate_submission(submission: &Submission) -> authorcheck_core::Result<()> {
    let fields = [
        ("submission_id", &submission.submission_id),
        ("student_id", &submission.student_id),
        ("content", &submission.content),
    ];

    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(authorcheck_core::Error::validation(format!(
                "{} must not be empty",
                name
            )));
        }
    }

    Ok(())
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    NotFound(String),
    InternalError(String),
}

impl From<authorcheck_core::Error> for AppError {
    fn from(err: authorcheck_core::Error) -> Self {
        match err {
            authorcheck_core::Error::Validation(msg) => AppError::InvalidRequest(msg),
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            AppError::InternalError(msg) => {
                error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Analysis failed. Please try again.".to_string(),
                )
            }
        };

        metrics::counter!("authorcheck_errors_total", "type" => kind).increment(1);

        (status, Json(ApiResponse::<()>::failure(message))).into_response()
    }
}
