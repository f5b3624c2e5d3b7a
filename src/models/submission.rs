// src/models/submission.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'quiz_result' table.
/// Immutable: one row per accepted submission, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct QuizSubmission {
    pub id: i64,
    pub user_id: i64,
    pub questions: i64,
    pub correct: i64,
    pub score: i64,
    pub elapsed_time_ms: i64,
    pub submitted_at: DateTime<Utc>,
}

impl QuizSubmission {
    /// Public identifier handed back to clients, e.g. `quiz_42`.
    pub fn public_id(&self) -> String {
        format!("quiz_{}", self.id)
    }
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SSZ` in UTC.
pub fn iso8601(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// DTO for submitting a finished quiz.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub total_questions: i64,
    pub correct_answers: i64,
    pub score: i64,
    /// Time spent on the quiz in milliseconds.
    pub total_time: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResponse {
    pub quiz_id: String,
    pub submitted_at: String,
}

impl From<&QuizSubmission> for SubmitQuizResponse {
    fn from(submission: &QuizSubmission) -> Self {
        Self {
            quiz_id: submission.public_id(),
            submitted_at: iso8601(&submission.submitted_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<String>,
}

/// One row of the current account's submission history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub quiz_id: String,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub score: i64,
    pub total_time: i64,
    pub submitted_at: String,
}

impl From<QuizSubmission> for HistoryEntry {
    fn from(submission: QuizSubmission) -> Self {
        Self {
            quiz_id: submission.public_id(),
            total_questions: submission.questions,
            correct_answers: submission.correct,
            score: submission.score,
            total_time: submission.elapsed_time_ms,
            submitted_at: iso8601(&submission.submitted_at),
        }
    }
}
