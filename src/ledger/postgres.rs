// src/ledger/postgres.rs

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::{LedgerError, ScoreLedger};
use crate::{
    models::{
        account::UserAccount,
        ranking::{LeaderboardPage, RankedAccount},
        submission::QuizSubmission,
    },
    scoring::{PageRequest, SubmissionDelta},
};

/// Account row joined with its window-computed rank.
#[derive(FromRow)]
struct RankedRow {
    #[sqlx(flatten)]
    account: UserAccount,
    ranking: i64,
}

impl From<RankedRow> for RankedAccount {
    fn from(row: RankedRow) -> Self {
        RankedAccount {
            rank: row.ranking,
            account: row.account,
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation())
}

/// SQLSTATE 22003, e.g. `bigint out of range`.
fn is_numeric_overflow(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "22003")
}

/// PostgreSQL-backed ledger over the `user_score` and `quiz_result` tables.
#[derive(Clone)]
pub struct PgLedger {
    pool: PgPool,
}

impl PgLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ScoreLedger for PgLedger {
    async fn find_account_by_name(&self, name: &str) -> Result<Option<UserAccount>, LedgerError> {
        let account = sqlx::query_as::<_, UserAccount>(
            r#"
            SELECT
                id,
                username AS display_name,
                avatar_url AS avatar_ref,
                total_questions,
                correct_answers,
                score AS total_score,
                created_at,
                updated_at
            FROM user_score
            WHERE username = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_account_by_id(&self, id: i64) -> Result<Option<UserAccount>, LedgerError> {
        let account = sqlx::query_as::<_, UserAccount>(
            r#"
            SELECT
                id,
                username AS display_name,
                avatar_url AS avatar_ref,
                total_questions,
                correct_answers,
                score AS total_score,
                created_at,
                updated_at
            FROM user_score
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create_account(
        &self,
        name: &str,
        avatar_ref: &str,
    ) -> Result<UserAccount, LedgerError> {
        sqlx::query_as::<_, UserAccount>(
            r#"
            INSERT INTO user_score (username, avatar_url)
            VALUES ($1, $2)
            RETURNING
                id,
                username AS display_name,
                avatar_url AS avatar_ref,
                total_questions,
                correct_answers,
                score AS total_score,
                created_at,
                updated_at
            "#,
        )
        .bind(name)
        .bind(avatar_ref)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                LedgerError::DuplicateName(name.to_string())
            } else {
                LedgerError::from(e)
            }
        })
    }

    async fn append_submission(
        &self,
        user_id: i64,
        delta: &SubmissionDelta,
    ) -> Result<QuizSubmission, LedgerError> {
        let mut tx = self.pool.begin().await?;

        let submission = sqlx::query_as::<_, QuizSubmission>(
            r#"
            INSERT INTO quiz_result (user_id, total_questions, correct_answers, score, total_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id,
                user_id,
                total_questions AS questions,
                correct_answers AS correct,
                score,
                total_time AS elapsed_time_ms,
                created_at AS submitted_at
            "#,
        )
        .bind(user_id)
        .bind(delta.questions())
        .bind(delta.correct())
        .bind(delta.score())
        .bind(delta.elapsed_time_ms())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                LedgerError::AccountNotFound(user_id)
            } else {
                LedgerError::from(e)
            }
        })?;

        // Relative increment: concurrent submissions for the same account
        // serialize on the row lock and are summed, never overwritten.
        let updated = sqlx::query(
            r#"
            UPDATE user_score SET
                total_questions = total_questions + $2,
                correct_answers = correct_answers + $3,
                score = score + $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(delta.questions())
        .bind(delta.correct())
        .bind(delta.score())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_numeric_overflow(&e) {
                LedgerError::Overflow(user_id)
            } else {
                LedgerError::from(e)
            }
        })?;

        if updated.rows_affected() == 0 {
            // Dropping `tx` rolls the history insert back.
            return Err(LedgerError::AccountNotFound(user_id));
        }

        tx.commit()
            .await
            .map_err(|e| LedgerError::Uncertain(e.to_string()))?;

        Ok(submission)
    }

    async fn rank_of(&self, user_id: i64) -> Result<Option<i64>, LedgerError> {
        let rank = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT (SELECT COUNT(*) FROM user_score o WHERE o.score > u.score) + 1
            FROM user_score u
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rank)
    }

    async fn standing(&self, user_id: i64) -> Result<Option<RankedAccount>, LedgerError> {
        let row = sqlx::query_as::<_, RankedRow>(
            r#"
            SELECT
                u.id,
                u.username AS display_name,
                u.avatar_url AS avatar_ref,
                u.total_questions,
                u.correct_answers,
                u.score AS total_score,
                u.created_at,
                u.updated_at,
                (SELECT COUNT(*) FROM user_score o WHERE o.score > u.score) + 1 AS ranking
            FROM user_score u
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RankedAccount::from))
    }

    async fn leaderboard_page(&self, request: PageRequest) -> Result<LeaderboardPage, LedgerError> {
        // Count and slice must agree, so both run in one read-only snapshot.
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_score")
            .fetch_one(&mut *tx)
            .await?;

        let rows = sqlx::query_as::<_, RankedRow>(
            r#"
            SELECT
                id,
                username AS display_name,
                avatar_url AS avatar_ref,
                total_questions,
                correct_answers,
                score AS total_score,
                created_at,
                updated_at,
                RANK() OVER (ORDER BY score DESC) AS ranking
            FROM user_score
            ORDER BY score DESC, id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(request.limit())
        .bind(request.offset())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(LeaderboardPage {
            entries: rows.into_iter().map(RankedAccount::from).collect(),
            total,
        })
    }

    async fn recent_submissions(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<QuizSubmission>, LedgerError> {
        let submissions = sqlx::query_as::<_, QuizSubmission>(
            r#"
            SELECT
                id,
                user_id,
                total_questions AS questions,
                correct_answers AS correct,
                score,
                total_time AS elapsed_time_ms,
                created_at AS submitted_at
            FROM quiz_result
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(submissions)
    }
}
