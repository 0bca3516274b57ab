//! Streak and milestone engine.
//!
//! Pure functions turning a sparse set of completed day numbers into streak
//! metrics and celebration triggers. Nothing in here holds state, so every
//! function is safe to call repeatedly and from any thread.
//!
//! - [`compute_streak`]: current streak, longest streak and last completed day
//! - [`check_milestone`]: first milestone crossed by a streak transition
//! - [`is_new_record`]: whether a new all-time longest streak was just set

mod calculator;
mod milestone;
mod record;

pub use calculator::{compute_streak, StreakResult};
pub use milestone::{check_milestone, milestone_message, next_milestone, MilestoneMessage, MILESTONES};
pub use record::is_new_record;
