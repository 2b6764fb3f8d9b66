mod report;
mod runs;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    middleware::from_fn,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use leadlens_core::{AppConfig, ReportRow};

use crate::middleware::{request_id, RequestId};
use crate::ui;

/// Shared server state: the immutable config plus the guarded run slot.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    runs: Arc<Mutex<RunSlot>>,
}

/// The single run slot. The pipeline allows no concurrent runs, so the
/// server tracks one `running` flag and the most recent completed report.
#[derive(Debug, Default)]
struct RunSlot {
    running: bool,
    last: Option<StoredReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredReport {
    pub query: String,
    pub pages: u32,
    pub finished_at: DateTime<Utc>,
    pub rows: Vec<ReportRow>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            runs: Arc::new(Mutex::new(RunSlot::default())),
        }
    }

    /// Claims the run slot. Returns `false` when a run is already active —
    /// the caller must reject the trigger rather than queue it.
    pub async fn try_begin_run(&self) -> bool {
        let mut slot = self.runs.lock().await;
        if slot.running {
            return false;
        }
        slot.running = true;
        true
    }

    /// Releases the run slot, recording the report when the run succeeded.
    pub async fn finish_run(&self, report: Option<StoredReport>) {
        let mut slot = self.runs.lock().await;
        slot.running = false;
        if report.is_some() {
            slot.last = report;
        }
    }

    pub async fn is_running(&self) -> bool {
        self.runs.lock().await.running
    }

    pub async fn last_report(&self) -> Option<StoredReport> {
        self.runs.lock().await.last.clone()
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

async fn health(Extension(req_id): Extension<RequestId>) -> Json<ApiResponse<HealthData>> {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

/// Builds the full application router: the interactive page at `/` and the
/// JSON API under `/api/v1`.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index))
        .route("/healthz", get(health))
        .route("/api/v1/runs", post(runs::trigger_run))
        .route("/api/v1/runs/status", get(runs::run_status))
        .route("/api/v1/wipe", post(runs::wipe))
        .route("/api/v1/report", get(report::get_report))
        .layer(from_fn(request_id))
        .layer(build_cors())
        .with_state(state)
}
