//! Rating Aggregator
//!
//! Folds a single vote into a joke's running average without keeping vote history.

use crate::error::{ApiError, Result};

/// Lowest accepted vote.
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted vote.
pub const MAX_RATING: f64 = 5.0;

// == Apply Rating ==
/// Returns the new average after one more vote.
///
/// `(current_rating * current_votes + new_value) / (current_votes + 1)`.
/// The caller increments the vote count. Input is assumed valid, see
/// [`validate_vote`].
pub fn apply_rating(current_rating: f64, current_votes: u64, new_value: f64) -> f64 {
    let votes = current_votes as f64;
    (current_rating * votes + new_value) / (votes + 1.0)
}

// == Validate Vote ==
/// Accepts finite votes in `[0, 5]`. A vote of exactly `0` is valid.
pub fn validate_vote(value: f64) -> Result<f64> {
    if value.is_finite() && (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(value)
    } else {
        Err(invalid_vote())
    }
}

/// The error reported for any vote that is missing, non-numeric or out of range.
pub fn invalid_vote() -> ApiError {
    ApiError::Validation("Invalid rating value. Must be a number between 0 and 5.".to_string())
}
