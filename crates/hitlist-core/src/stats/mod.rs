//! Monthly statistics for habits.
//!
//! This module provides the aggregates shown next to the habit table:
//! overall goal progress, daily consistency and the category breakdown, plus
//! a per-month summary bundling them with each habit's streak.

mod breakdown;
mod summary;

pub use breakdown::{category_breakdown, daily_consistency, monthly_progress, CategoryShare, DailyConsistency};
pub use summary::{HabitSummary, MonthSummary};
