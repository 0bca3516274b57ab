//! Milestone thresholds and detection.

use serde::Serialize;

/// Streak lengths that trigger a celebration the first time they are reached.
pub const MILESTONES: [u32; 9] = [3, 7, 14, 21, 30, 60, 90, 100, 365];

/// Display copy attached to a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MilestoneMessage {
    pub title: &'static str,
    pub message: &'static str,
}

/// Return the first milestone crossed when a streak moves from
/// `previous_streak` to `new_streak`.
///
/// When a single jump crosses several thresholds only the smallest is
/// reported. Returns `None` when nothing new was reached, which includes any
/// transition where the streak did not grow.
pub fn check_milestone(previous_streak: u32, new_streak: u32) -> Option<u32> {
    MILESTONES
        .iter()
        .copied()
        .find(|&m| previous_streak < m && new_streak >= m)
}

/// Smallest milestone strictly above `streak`, if any remain.
pub fn next_milestone(streak: u32) -> Option<u32> {
    MILESTONES.iter().copied().find(|&m| m > streak)
}

/// Celebration copy for a milestone value.
pub fn milestone_message(milestone: u32) -> Option<MilestoneMessage> {
    let (title, message) = match milestone {
        3 => ("3 Days Strong!", "You're building momentum. The hardest part is over."),
        7 => ("One Week!", "A full week of consistency. You're making this a real habit."),
        14 => ("Two Weeks!", "Half a month! Your dedication is inspiring."),
        21 => ("21 Days!", "They say it takes 21 days to form a habit. You did it!"),
        30 => ("One Month!", "A full month of showing up. That's remarkable."),
        60 => ("60 Days!", "Two months of unstoppable consistency!"),
        90 => ("90 Days!", "Three months! This is now part of who you are."),
        100 => ("100 Days!", "Triple digits! You're absolutely incredible."),
        365 => ("ONE YEAR!", "365 days. You've mastered consistency itself."),
        _ => return None,
    };
    Some(MilestoneMessage { title, message })
}
