// src/scoring/accrual.rs

use crate::error::ScoreError;

/// The amounts a single accepted quiz submission adds to an account.
///
/// Can only be built through [`SubmissionDelta::new`], so every delta that
/// reaches a ledger has already passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionDelta {
    questions: i64,
    correct: i64,
    score: i64,
    elapsed_time_ms: i64,
}

impl SubmissionDelta {
    /// Validates the raw counts of one quiz attempt.
    ///
    /// Rejects anything that would break `correct_answers <= total_questions`
    /// or make a counter go down.
    pub fn new(
        questions: i64,
        correct: i64,
        score: i64,
        elapsed_time_ms: i64,
    ) -> Result<Self, ScoreError> {
        if questions < 1 {
            return Err(ScoreError::InvalidSubmission(
                "totalQuestions must be at least 1".to_string(),
            ));
        }
        if correct < 0 {
            return Err(ScoreError::InvalidSubmission(
                "correctAnswers must not be negative".to_string(),
            ));
        }
        if score < 0 {
            return Err(ScoreError::InvalidSubmission(
                "score must not be negative".to_string(),
            ));
        }
        if elapsed_time_ms < 0 {
            return Err(ScoreError::InvalidSubmission(
                "totalTime must not be negative".to_string(),
            ));
        }
        if correct > questions {
            return Err(ScoreError::InvalidSubmission(format!(
                "correctAnswers ({correct}) cannot exceed totalQuestions ({questions})"
            )));
        }

        Ok(Self {
            questions,
            correct,
            score,
            elapsed_time_ms,
        })
    }

    pub fn questions(&self) -> i64 {
        self.questions
    }

    pub fn correct(&self) -> i64 {
        self.correct
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn elapsed_time_ms(&self) -> i64 {
        self.elapsed_time_ms
    }
}
