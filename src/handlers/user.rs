// src/handlers/user.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    models::{
        account::{ProfileResponse, StatsResponse},
        envelope::ApiResponse,
    },
    services::ScoreService,
    utils::jwt::Claims,
};

/// Get current account's cumulative statistics and live rank.
pub async fn get_stats(
    State(service): State<ScoreService>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let account_id = claims.account_id()?;
    let standing = service.stats(account_id).await?;

    Ok(Json(ApiResponse::success(StatsResponse {
        total_quizzes: standing.account.total_questions,
        total_score: standing.account.total_score,
        accuracy: standing.account.accuracy(),
        ranking: standing.rank,
    })))
}

/// Get current account's display name and avatar.
pub async fn get_profile(
    State(service): State<ScoreService>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let account_id = claims.account_id()?;
    let account = service.profile(account_id).await?;

    Ok(Json(ApiResponse::success(ProfileResponse {
        nick_name: account.display_name,
        avatar_url: account.avatar_ref,
    })))
}
