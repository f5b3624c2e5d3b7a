// src/ledger/mod.rs

//! Score ledger port and its adapters.
//!
//! The ledger owns every durability and isolation guarantee of the scoring
//! core: accruals are applied as relative increments inside one atomic unit,
//! and rank queries read a single consistent snapshot of the population.

use async_trait::async_trait;

use crate::{
    models::{
        account::UserAccount,
        ranking::{LeaderboardPage, RankedAccount},
        submission::QuizSubmission,
    },
    scoring::{PageRequest, SubmissionDelta},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryLedger;
pub use postgres::PgLedger;

/// Errors raised by ledger adapters.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("account {0} not found")]
    AccountNotFound(i64),

    /// Unique display-name constraint rejected an insert.
    #[error("display name '{0}' already exists")]
    DuplicateName(String),

    /// Applying the delta would push a counter past its range.
    /// Retrying cannot succeed; nothing was written.
    #[error("counters of account {0} would overflow")]
    Overflow(i64),

    /// The operation failed and nothing was written.
    #[error("ledger query failed: {0}")]
    Storage(String),

    /// A write was sent but its outcome is unknown (e.g. commit failed).
    #[error("ledger write outcome unknown: {0}")]
    Uncertain(String),
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

#[async_trait]
pub trait ScoreLedger: Send + Sync {
    async fn find_account_by_name(&self, name: &str) -> Result<Option<UserAccount>, LedgerError>;

    async fn find_account_by_id(&self, id: i64) -> Result<Option<UserAccount>, LedgerError>;

    /// Creates an account with all counters at zero.
    /// Fails with [`LedgerError::DuplicateName`] if the name is taken.
    async fn create_account(&self, name: &str, avatar_ref: &str)
    -> Result<UserAccount, LedgerError>;

    /// Records one submission and adds its deltas to the owner's counters,
    /// both or neither.
    async fn append_submission(
        &self,
        user_id: i64,
        delta: &SubmissionDelta,
    ) -> Result<QuizSubmission, LedgerError>;

    /// Competition rank of one account, `None` if it does not exist.
    async fn rank_of(&self, user_id: i64) -> Result<Option<i64>, LedgerError>;

    /// The account and its rank, read from the same snapshot.
    async fn standing(&self, user_id: i64) -> Result<Option<RankedAccount>, LedgerError>;

    /// One leaderboard slice plus the population size, from the same snapshot.
    async fn leaderboard_page(&self, request: PageRequest) -> Result<LeaderboardPage, LedgerError>;

    /// Newest-first submission history of one account.
    async fn recent_submissions(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<QuizSubmission>, LedgerError>;
}
