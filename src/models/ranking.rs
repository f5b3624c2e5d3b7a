// src/models/ranking.rs

use serde::{Deserialize, Serialize};

use crate::models::account::UserAccount;

/// An account together with its competition rank over the whole population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedAccount {
    pub rank: i64,
    pub account: UserAccount,
}

/// One slice of the leaderboard plus the population size it was cut from.
/// Both come from the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardPage {
    pub entries: Vec<RankedAccount>,
    pub total: i64,
}

/// Raw query string values. Kept as strings so that garbage is clamped to the
/// defaults instead of being rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Aggregated struct for displaying the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub id: i64,
    pub nick_name: String,
    pub avatar_url: String,
    pub total_quizzes: i64,
    #[serde(rename = "correct_answers")]
    pub correct_answers: i64,
    pub total_score: i64,
    pub accuracy: f64,
}

impl From<RankedAccount> for LeaderboardEntry {
    fn from(ranked: RankedAccount) -> Self {
        let accuracy = ranked.account.accuracy();
        let account = ranked.account;
        Self {
            rank: ranked.rank,
            id: account.id,
            nick_name: account.display_name,
            avatar_url: account.avatar_ref,
            total_quizzes: account.total_questions,
            correct_answers: account.correct_answers,
            total_score: account.total_score,
            accuracy,
        }
    }
}

/// Leaderboard body: the page of entries with paging info beside it.
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub code: u16,
    pub message: String,
    pub data: Vec<LeaderboardEntry>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}
