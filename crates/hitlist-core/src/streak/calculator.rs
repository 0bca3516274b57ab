//! Consecutive-day streak calculation over a single month of completions.

use serde::{Deserialize, Serialize};

/// Streak metrics derived from a habit's completed days.
///
/// Recomputed on demand and never persisted. `longest_streak >= current_streak`
/// always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_completed_day: Option<u32>,
}

/// Compute streak metrics for one month of completed days.
///
/// # Arguments
/// * `completed_days` - Day-of-month numbers (1-based), in any order
/// * `current_day` - Today's day number, or 0 when viewing another month
/// * `days_in_month` - Length of the displayed month
///
/// The current streak is the run ending at the last completed day, and only
/// counts while that day is today or yesterday relative to `current_day`.
/// Days of 0, days past `days_in_month` and duplicates are ignored.
pub fn compute_streak(completed_days: &[u32], current_day: u32, days_in_month: u32) -> StreakResult {
    let mut days: Vec<u32> = completed_days
        .iter()
        .copied()
        .filter(|&d| d >= 1 && d <= days_in_month)
        .collect();

    if days.len() != completed_days.len() {
        tracing::warn!(
            ignored = completed_days.len() - days.len(),
            days_in_month,
            "ignoring out-of-range completed days"
        );
    }

    days.sort_unstable();
    days.dedup();

    let Some(&last_day) = days.last() else {
        return StreakResult::default();
    };

    let mut longest_streak = 1;
    let mut run = 1;
    for pair in days.windows(2) {
        if pair[1] == pair[0] + 1 {
            run += 1;
            longest_streak = longest_streak.max(run);
        } else {
            run = 1;
        }
    }

    // A streak survives one missed day (yesterday) before it counts as broken.
    let mut current_streak = 0;
    if last_day >= current_day.saturating_sub(1) {
        current_streak = 1;
        for pair in days.windows(2).rev() {
            if pair[0] + 1 == pair[1] {
                current_streak += 1;
            } else {
                break;
            }
        }
    }

    let result = StreakResult {
        current_streak,
        longest_streak: longest_streak.max(current_streak),
        last_completed_day: Some(last_day),
    };
    tracing::debug!(?result, current_day, days_in_month, "computed streak");
    result
}
