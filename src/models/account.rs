// src/models/account.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::scoring::accuracy;

/// Represents the 'user_score' table: one pseudonymous account and its
/// cumulative quiz totals.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct UserAccount {
    pub id: i64,

    /// Unique display name, used as the lookup key on login.
    pub display_name: String,

    /// Opaque avatar reference supplied by the client.
    pub avatar_ref: String,

    pub total_questions: i64,
    pub correct_answers: i64,
    pub total_score: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn accuracy(&self) -> f64 {
        accuracy(self.total_questions, self.correct_answers)
    }
}

/// DTO for the pseudonymous login / bootstrap call.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "nickName length must be between 1 and 100 characters."
    ))]
    pub nick_name: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "avatarUrl must be at most 255 characters."))]
    pub avatar_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub nick_name: String,
    pub avatar_url: String,
}

impl From<&UserAccount> for UserInfo {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id,
            nick_name: account.display_name.clone(),
            avatar_url: account.avatar_ref.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_info: UserInfo,
}

/// Cumulative statistics of the current account.
/// `totalQuizzes` carries the number of questions answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_quizzes: i64,
    pub total_score: i64,
    pub accuracy: f64,
    pub ranking: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub nick_name: String,
    pub avatar_url: String,
}
