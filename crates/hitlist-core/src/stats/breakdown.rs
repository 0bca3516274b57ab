//! Aggregates across all habits of a month.

use serde::{Deserialize, Serialize};

use crate::calendar::DayContext;
use crate::habit::{Habit, HabitCategory};

/// Share of habits completed on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyConsistency {
    pub day: u32,
    pub completed: u32,
    /// Rounded percentage of habits completed (0-100)
    pub percentage: u32,
}

/// Number and share of habits in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: HabitCategory,
    pub count: u32,
    /// Rounded percentage of all habits (0-100)
    pub percentage: u32,
}

fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

/// Completed days over the sum of all monthly goals, as a rounded percentage.
///
/// Not capped: overshooting goals can push this above 100.
pub fn monthly_progress(habits: &[Habit]) -> u32 {
    let goal: u32 = habits.iter().map(|h| h.monthly_goal).sum();
    let done: u32 = habits.iter().map(|h| h.completed_count()).sum();
    percent(done, goal)
}

/// Per-day completion share for each day up to today.
///
/// Empty for months without a current day, since nothing has happened yet
/// from the cursor's point of view.
pub fn daily_consistency(habits: &[Habit], ctx: DayContext) -> Vec<DailyConsistency> {
    let last = ctx.days_in_month.min(ctx.current_day);
    let total = habits.len() as u32;
    (1..=last)
        .map(|day| {
            let completed = habits.iter().filter(|h| h.is_completed(day)).count() as u32;
            DailyConsistency {
                day,
                completed,
                percentage: percent(completed, total),
            }
        })
        .collect()
}

/// Habit count per category. Every category is present, even at zero.
pub fn category_breakdown(habits: &[Habit]) -> Vec<CategoryShare> {
    let total = (habits.len() as u32).max(1);
    HabitCategory::ALL
        .iter()
        .map(|&category| {
            let count = habits.iter().filter(|h| h.category == category).count() as u32;
            CategoryShare {
                category,
                count,
                percentage: percent(count, total),
            }
        })
        .collect()
}
