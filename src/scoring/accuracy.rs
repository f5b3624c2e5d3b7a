// src/scoring/accuracy.rs

/// Percentage of correct answers, rounded half-up to one decimal place.
///
/// Returns `0.0` for an account that has not answered anything yet.
/// The rounding is done on integers (tenths of a percent) so that values such
/// as 66.65 round up to 66.7 regardless of how they are represented in binary.
pub fn accuracy(total_questions: i64, correct_answers: i64) -> f64 {
    if total_questions <= 0 {
        return 0.0;
    }

    let total = i128::from(total_questions);
    let correct = i128::from(correct_answers.max(0));

    // round(correct * 1000 / total) with halves going up
    let tenths = (correct * 2000 + total) / (2 * total);

    tenths as f64 / 10.0
}
