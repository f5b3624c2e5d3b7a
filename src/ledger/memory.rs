// src/ledger/memory.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{LedgerError, ScoreLedger};
use crate::{
    models::{
        account::UserAccount,
        ranking::{LeaderboardPage, RankedAccount},
        submission::QuizSubmission,
    },
    scoring::{
        PageRequest, SubmissionDelta,
        rank::{rank_of_score, rank_population},
    },
};

#[derive(Default)]
struct MemoryState {
    accounts: BTreeMap<i64, UserAccount>,
    ids_by_name: HashMap<String, i64>,
    submissions: Vec<QuizSubmission>,
    last_account_id: i64,
    last_submission_id: i64,
}

/// In-process ledger for tests and single-node setups with a small population.
///
/// Writers take the lock exclusively, so an accrual is never half visible;
/// readers rank a full-population sort taken under one read guard.
#[derive(Clone, Default)]
pub struct MemoryLedger {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_index(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl ScoreLedger for MemoryLedger {
    async fn find_account_by_name(&self, name: &str) -> Result<Option<UserAccount>, LedgerError> {
        let state = self.state.read().await;
        Ok(state
            .ids_by_name
            .get(name)
            .and_then(|id| state.accounts.get(id))
            .cloned())
    }

    async fn find_account_by_id(&self, id: i64) -> Result<Option<UserAccount>, LedgerError> {
        let state = self.state.read().await;
        Ok(state.accounts.get(&id).cloned())
    }

    async fn create_account(
        &self,
        name: &str,
        avatar_ref: &str,
    ) -> Result<UserAccount, LedgerError> {
        let mut state = self.state.write().await;

        if state.ids_by_name.contains_key(name) {
            return Err(LedgerError::DuplicateName(name.to_string()));
        }

        state.last_account_id += 1;
        let now = Utc::now();
        let account = UserAccount {
            id: state.last_account_id,
            display_name: name.to_string(),
            avatar_ref: avatar_ref.to_string(),
            total_questions: 0,
            correct_answers: 0,
            total_score: 0,
            created_at: now,
            updated_at: now,
        };

        state.ids_by_name.insert(account.display_name.clone(), account.id);
        state.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn append_submission(
        &self,
        user_id: i64,
        delta: &SubmissionDelta,
    ) -> Result<QuizSubmission, LedgerError> {
        let mut state = self.state.write().await;

        let account = state
            .accounts
            .get(&user_id)
            .ok_or(LedgerError::AccountNotFound(user_id))?;

        // Compute everything before mutating so a failure leaves no trace.
        let overflow = || LedgerError::Overflow(user_id);
        let total_questions = account
            .total_questions
            .checked_add(delta.questions())
            .ok_or_else(overflow)?;
        let correct_answers = account
            .correct_answers
            .checked_add(delta.correct())
            .ok_or_else(overflow)?;
        let total_score = account
            .total_score
            .checked_add(delta.score())
            .ok_or_else(overflow)?;

        let now = Utc::now();
        state.last_submission_id += 1;
        let submission = QuizSubmission {
            id: state.last_submission_id,
            user_id,
            questions: delta.questions(),
            correct: delta.correct(),
            score: delta.score(),
            elapsed_time_ms: delta.elapsed_time_ms(),
            submitted_at: now,
        };
        state.submissions.push(submission.clone());

        if let Some(account) = state.accounts.get_mut(&user_id) {
            account.total_questions = total_questions;
            account.correct_answers = correct_answers;
            account.total_score = total_score;
            account.updated_at = now;
        }

        Ok(submission)
    }

    async fn rank_of(&self, user_id: i64) -> Result<Option<i64>, LedgerError> {
        let state = self.state.read().await;
        Ok(state.accounts.get(&user_id).map(|account| {
            rank_of_score(
                state.accounts.values().map(|a| a.total_score),
                account.total_score,
            )
        }))
    }

    async fn standing(&self, user_id: i64) -> Result<Option<RankedAccount>, LedgerError> {
        let state = self.state.read().await;
        Ok(state.accounts.get(&user_id).map(|account| RankedAccount {
            rank: rank_of_score(
                state.accounts.values().map(|a| a.total_score),
                account.total_score,
            ),
            account: account.clone(),
        }))
    }

    async fn leaderboard_page(&self, request: PageRequest) -> Result<LeaderboardPage, LedgerError> {
        let population: Vec<UserAccount> = {
            let state = self.state.read().await;
            state.accounts.values().cloned().collect()
        };

        let total = population.len() as i64;
        let entries = rank_population(population)
            .into_iter()
            .skip(to_index(request.offset()))
            .take(to_index(request.limit()))
            .collect();

        Ok(LeaderboardPage { entries, total })
    }

    async fn recent_submissions(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<QuizSubmission>, LedgerError> {
        let state = self.state.read().await;
        Ok(state
            .submissions
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .take(to_index(limit))
            .cloned()
            .collect())
    }
}
