use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::{map_news_error, ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct SummaryParams {
    /// Only consider news published on or after this date (`YYYY-MM-DD`).
    since: Option<String>,
}

/// `GET /api/v1/news/{symbol}/summary`
pub(super) async fn get_news_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(symbol): Path<String>,
    Query(params): Query<SummaryParams>,
) -> Result<impl IntoResponse, ApiError> {
    let since = match params.since {
        Some(raw) => Some(parse_since(&req_id.0, &raw)?),
        None => None,
    };

    tracing::info!(symbol = %symbol, since = ?since, "summary requested");

    let result = state
        .pipeline
        .summarize_symbol(&symbol, since)
        .await
        .map_err(|e| map_news_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn parse_since(request_id: &str, raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError::new(
            request_id,
            "validation_error",
            format!("invalid since date '{raw}', expected YYYY-MM-DD"),
        )
    })
}
