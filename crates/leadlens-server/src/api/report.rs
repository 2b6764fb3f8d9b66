//! Last completed report retrieval.

use axum::{extract::State, Extension, Json};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta, StoredReport};

/// `GET /api/v1/report` — the most recent completed run's report rows.
pub(in crate::api) async fn get_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<StoredReport>>, ApiError> {
    match state.last_report().await {
        Some(report) => Ok(Json(ApiResponse {
            data: report,
            meta: ResponseMeta::new(req_id.0),
        })),
        None => Err(ApiError::new(
            req_id.0,
            "not_found",
            "no completed run yet",
        )),
    }
}
