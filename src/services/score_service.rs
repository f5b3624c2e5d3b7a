// src/services/score_service.rs

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::ScoreError,
    ledger::{LedgerError, ScoreLedger},
    models::{
        account::UserAccount,
        ranking::{LeaderboardPage, RankedAccount},
        submission::QuizSubmission,
    },
    scoring::{PageRequest, SubmissionDelta},
};

pub const DEFAULT_HISTORY_LIMIT: i64 = 20;
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Entry point of the scoring core.
///
/// Holds no mutable state of its own: every guarantee (atomic accrual,
/// snapshot ranking) is delegated to the ledger, and every ledger call is
/// bounded by `store_timeout`.
#[derive(Clone)]
pub struct ScoreService {
    ledger: Arc<dyn ScoreLedger>,
    store_timeout: Duration,
}

impl ScoreService {
    pub fn new(ledger: Arc<dyn ScoreLedger>, store_timeout: Duration) -> Self {
        Self {
            ledger,
            store_timeout,
        }
    }

    /// Runs one ledger call under the timeout budget.
    /// A timed-out write is reported as outcome-uncertain.
    async fn bounded<T>(
        &self,
        operation: &'static str,
        is_write: bool,
        call: impl Future<Output = Result<T, LedgerError>>,
    ) -> Result<T, ScoreError> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result.map_err(ScoreError::from),
            Err(_) => {
                tracing::warn!(operation, "Ledger call timed out after {:?}", self.store_timeout);
                Err(ScoreError::Storage {
                    message: format!("{} timed out after {:?}", operation, self.store_timeout),
                    uncertain: is_write,
                })
            }
        }
    }

    /// Idempotent-by-name bootstrap: returns the existing account or creates
    /// one with zeroed counters.
    pub async fn login(&self, display_name: &str, avatar_ref: &str) -> Result<UserAccount, ScoreError> {
        let existing = self
            .bounded(
                "find_account_by_name",
                false,
                self.ledger.find_account_by_name(display_name),
            )
            .await?;
        if let Some(account) = existing {
            return Ok(account);
        }

        let created = self
            .bounded(
                "create_account",
                true,
                self.ledger.create_account(display_name, avatar_ref),
            )
            .await;

        match created {
            Ok(account) => {
                tracing::info!(account_id = account.id, "Created account '{}'", display_name);
                Ok(account)
            }
            Err(ScoreError::Conflict(_)) => {
                tracing::warn!("Concurrent creation of '{}', re-fetching", display_name);
                self.bounded(
                    "find_account_by_name",
                    false,
                    self.ledger.find_account_by_name(display_name),
                )
                .await?
                .ok_or_else(|| ScoreError::Conflict(display_name.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Validates and applies one quiz submission.
    ///
    /// Validation happens before the ledger is touched, so a rejected
    /// submission never leaves partial state behind.
    pub async fn submit(
        &self,
        user_id: i64,
        questions: i64,
        correct: i64,
        score: i64,
        elapsed_time_ms: i64,
    ) -> Result<QuizSubmission, ScoreError> {
        let delta = SubmissionDelta::new(questions, correct, score, elapsed_time_ms)?;

        let submission = self
            .bounded(
                "append_submission",
                true,
                self.ledger.append_submission(user_id, &delta),
            )
            .await?;

        tracing::info!(
            account_id = user_id,
            submission_id = submission.id,
            questions,
            correct,
            score,
            "Quiz submission recorded"
        );

        Ok(submission)
    }

    /// The account's counters and competition rank from one snapshot.
    pub async fn stats(&self, user_id: i64) -> Result<RankedAccount, ScoreError> {
        self.bounded("standing", false, self.ledger.standing(user_id))
            .await?
            .ok_or(ScoreError::AccountNotFound(user_id))
    }

    pub async fn profile(&self, user_id: i64) -> Result<UserAccount, ScoreError> {
        self.bounded("find_account_by_id", false, self.ledger.find_account_by_id(user_id))
            .await?
            .ok_or(ScoreError::AccountNotFound(user_id))
    }

    pub async fn rank_of(&self, user_id: i64) -> Result<i64, ScoreError> {
        self.bounded("rank_of", false, self.ledger.rank_of(user_id))
            .await?
            .ok_or(ScoreError::AccountNotFound(user_id))
    }

    /// One leaderboard page. Out-of-range paging values are clamped, never
    /// rejected; the returned request carries the values actually used.
    pub async fn leaderboard(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<(LeaderboardPage, PageRequest), ScoreError> {
        let request = PageRequest::new(page, limit);
        let slice = self
            .bounded("leaderboard_page", false, self.ledger.leaderboard_page(request))
            .await?;
        Ok((slice, request))
    }

    /// Newest-first submissions of one account.
    pub async fn history(&self, user_id: i64, limit: i64) -> Result<Vec<QuizSubmission>, ScoreError> {
        let limit = if (1..=MAX_HISTORY_LIMIT).contains(&limit) {
            limit
        } else {
            DEFAULT_HISTORY_LIMIT
        };

        self.profile(user_id).await?;

        self.bounded(
            "recent_submissions",
            false,
            self.ledger.recent_submissions(user_id, limit),
        )
        .await
    }
}
