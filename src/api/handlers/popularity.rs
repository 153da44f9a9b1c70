//! Handler for the ranked repository search.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::popularity::{PopularityParams, PopularityResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Searches GitHub and returns one page ranked by popularity score.
///
/// # Endpoint
///
/// `GET /repos/popularity`
///
/// # Query Parameters
///
/// - `query` (optional): free-text search term
/// - `language` (optional): repository language, e.g. `Rust`
/// - `created_after` (optional): `YYYY-MM-DD`
/// - `per_page` (optional): 1..=100, default 20
/// - `page` (optional): ≥ 1, default 1
///
/// # Response
///
/// ```json
/// {
///   "totalCount": 1234,
///   "count": 1,
///   "items": [{
///     "id": 1, "name": "owner/repo", "htmlUrl": "https://github.com/owner/repo",
///     "language": "Rust", "stars": 10, "forks": 5,
///     "updatedAt": "2024-06-01T00:00:00Z", "score": 17.5
///   }]
/// }
/// ```
///
/// # Errors
///
/// - 400 on invalid parameters, before any upstream call
/// - 429, 400, 502 or 503 for classified upstream failures
pub async fn popularity_handler(
    State(state): State<AppState>,
    query: Result<Query<PopularityParams>, QueryRejection>,
) -> Result<Json<PopularityResponse>, AppError> {
    let Query(params) = query?;
    params.validate()?;

    let now = Utc::now();
    let result = state
        .popularity_service
        .handle(&params.filter(), params.per_page(), params.page(), now)
        .await?;

    Ok(Json(result.into()))
}
