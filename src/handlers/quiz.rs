// src/handlers/quiz.rs

use axum::{
    Extension, Json,
    extract::{Query, State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{
    error::{AppError, ScoreError},
    models::{
        envelope::ApiResponse,
        submission::{HistoryEntry, HistoryQuery, SubmitQuizRequest, SubmitQuizResponse},
    },
    services::ScoreService,
    utils::jwt::Claims,
};

/// Submits the result of a finished quiz.
///
/// * Rejects a body with missing or non-integer fields as an invalid
///   submission.
/// * Rejects counts that are negative or claim more correct answers than
///   questions, before anything is written.
/// * Appends the submission to the history and adds it to the account's
///   totals in one transaction.
pub async fn submit_quiz(
    State(service): State<ScoreService>,
    Extension(claims): Extension<Claims>,
    req: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let account_id = claims.account_id()?;
    let Json(req) = req.map_err(|rejection| ScoreError::InvalidSubmission(rejection.body_text()))?;

    let submission = service
        .submit(
            account_id,
            req.total_questions,
            req.correct_answers,
            req.score,
            req.total_time,
        )
        .await?;

    Ok(Json(ApiResponse::with_message(
        "submitted",
        SubmitQuizResponse::from(&submission),
    )))
}

/// Lists the current account's most recent submissions, newest first.
pub async fn get_history(
    State(service): State<ScoreService>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let account_id = claims.account_id()?;
    let limit = params
        .limit
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(0);

    let history: Vec<HistoryEntry> = service
        .history(account_id, limit)
        .await?
        .into_iter()
        .map(HistoryEntry::from)
        .collect();

    Ok(Json(ApiResponse::success(history)))
}
