//! Run trigger, status, and wipe endpoints.

use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta, StoredReport};

#[derive(Debug, Deserialize)]
pub(in crate::api) struct RunRequest {
    pub query: String,
    pub pages: u32,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct RunStatus {
    pub running: bool,
    pub last_finished_at: Option<DateTime<Utc>>,
    pub last_row_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct WipeResult {
    pub wiped: bool,
}

/// `POST /api/v1/runs` — executes one full pipeline run.
///
/// The response blocks until the run finishes; a second trigger while a run
/// is active is rejected with `409 conflict` rather than queued.
///
/// The run itself executes on a spawned task that owns the slot release, so
/// a client disconnect (which drops this handler future mid-await) cannot
/// leave the slot claimed: the detached run finishes and releases it.
pub(in crate::api) async fn trigger_run(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<RunRequest>,
) -> Result<Json<ApiResponse<StoredReport>>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "query must not be empty",
        ));
    }
    if request.pages == 0 {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "pages must be at least 1",
        ));
    }

    if !state.try_begin_run().await {
        return Err(ApiError::new(
            req_id.0,
            "conflict",
            "a run is already in progress",
        ));
    }

    let run_state = state.clone();
    let query = request.query.trim().to_string();
    let pages = request.pages;
    let run = tokio::spawn(async move {
        let outcome = leadlens_pipeline::run_pipeline(&run_state.config, &query, pages).await;
        match outcome {
            Ok(report) => {
                let stored = StoredReport {
                    query: report.query,
                    pages: report.pages,
                    finished_at: Utc::now(),
                    rows: report.rows,
                };
                run_state.finish_run(Some(stored.clone())).await;
                Ok(stored)
            }
            Err(e) => {
                run_state.finish_run(None).await;
                tracing::error!(error = %e, "pipeline run failed");
                Err(e.to_string())
            }
        }
    });

    match run.await {
        Ok(Ok(stored)) => Ok(Json(ApiResponse {
            data: stored,
            meta: ResponseMeta::new(req_id.0),
        })),
        Ok(Err(message)) => Err(ApiError::new(req_id.0, "pipeline_failed", message)),
        Err(e) => {
            // Join failure means the run task itself died; free the slot.
            state.finish_run(None).await;
            tracing::error!(error = %e, "pipeline run task failed");
            Err(ApiError::new(req_id.0, "pipeline_failed", e.to_string()))
        }
    }
}

/// `GET /api/v1/runs/status`
pub(in crate::api) async fn run_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<RunStatus>> {
    let running = state.is_running().await;
    let last = state.last_report().await;
    Json(ApiResponse {
        data: RunStatus {
            running,
            last_finished_at: last.as_ref().map(|r| r.finished_at),
            last_row_count: last.as_ref().map(|r| r.rows.len()),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

/// `POST /api/v1/wipe` — clears the image directory and sheet from any
/// prior run. Claims the run slot for the duration of the wipe, so a run
/// can neither be active during it nor start mid-removal.
pub(in crate::api) async fn wipe(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<WipeResult>>, ApiError> {
    if !state.try_begin_run().await {
        return Err(ApiError::new(
            req_id.0,
            "conflict",
            "cannot wipe while a run is in progress",
        ));
    }

    let result = leadlens_pipeline::wipe_run_state(&state.config);
    state.finish_run(None).await;

    if let Err(e) = result {
        tracing::error!(error = %e, "wipe failed");
        return Err(ApiError::new(req_id.0, "wipe_failed", e.to_string()));
    }

    Ok(Json(ApiResponse {
        data: WipeResult { wiped: true },
        meta: ResponseMeta::new(req_id.0),
    }))
}
