// src/handlers/ranking.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::ranking::{LeaderboardEntry, LeaderboardQuery, LeaderboardResponse},
    services::ScoreService,
};

/// Unparsable values become 0, which the clamp then maps to the default.
fn lenient_number(raw: Option<&str>, missing: i64) -> i64 {
    match raw {
        None => missing,
        Some(value) => value.trim().parse().unwrap_or(0),
    }
}

/// Retrieves one page of the global leaderboard.
///
/// Ranks are computed over the whole population, so they continue across
/// page boundaries.
pub async fn get_leaderboard(
    State(service): State<ScoreService>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = lenient_number(params.page.as_deref(), 1);
    let limit = lenient_number(params.limit.as_deref(), 20);

    let (slice, request) = service.leaderboard(page, limit).await?;

    Ok(Json(LeaderboardResponse {
        code: 200,
        message: "success".to_string(),
        data: slice
            .entries
            .into_iter()
            .map(LeaderboardEntry::from)
            .collect(),
        total: slice.total,
        page: request.page(),
        limit: request.limit(),
    }))
}
