// src/scoring/rank.rs

use std::cmp::Ordering;

use crate::models::{account::UserAccount, ranking::RankedAccount};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A leaderboard slice request with out-of-range values already clamped.
///
/// `page < 1` becomes page 1; a `limit` outside `1..=100` falls back to the
/// default of 20. Bad input is never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        let page = page.max(1);
        let limit = if (1..=MAX_PAGE_SIZE).contains(&limit) {
            limit
        } else {
            DEFAULT_PAGE_SIZE
        };
        Self { page, limit }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of ranked accounts that precede this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Leaderboard ordering: score descending, then id ascending.
///
/// The id tie-break only fixes page boundaries; it never changes a rank.
pub fn leaderboard_order(a: &UserAccount, b: &UserAccount) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then_with(|| a.id.cmp(&b.id))
}

/// Standard competition rank of `score` within `scores`.
pub fn rank_of_score<I>(scores: I, score: i64) -> i64
where
    I: IntoIterator<Item = i64>,
{
    let higher = scores.into_iter().filter(|other| *other > score).count();
    higher as i64 + 1
}

/// Assigns competition ranks ("1224" style) to scores sorted descending.
pub fn competition_ranks(sorted_scores: &[i64]) -> Vec<i64> {
    let mut ranks = Vec::with_capacity(sorted_scores.len());
    let mut current_rank = 0;
    let mut previous: Option<i64> = None;

    for (position, score) in sorted_scores.iter().enumerate() {
        if previous != Some(*score) {
            current_rank = position as i64 + 1;
            previous = Some(*score);
        }
        ranks.push(current_rank);
    }

    ranks
}

/// Sorts a whole population into leaderboard order and attaches ranks.
pub fn rank_population(mut accounts: Vec<UserAccount>) -> Vec<RankedAccount> {
    accounts.sort_by(leaderboard_order);

    let scores: Vec<i64> = accounts.iter().map(|a| a.total_score).collect();
    let ranks = competition_ranks(&scores);

    accounts
        .into_iter()
        .zip(ranks)
        .map(|(account, rank)| RankedAccount { rank, account })
        .collect()
}
