use serde::{Deserialize, Serialize};

use crate::calendar::{DayContext, MonthKey};
use crate::habit::{Habit, HabitCategory, HabitStatus, StreakTier};
use crate::streak::{next_milestone, StreakResult};

use super::{category_breakdown, daily_consistency, monthly_progress, CategoryShare, DailyConsistency};

/// One row of the habit table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSummary {
    pub id: String,
    pub name: String,
    pub category: HabitCategory,
    pub monthly_goal: u32,
    pub completed: u32,
    pub progress_percent: u32,
    pub status: HabitStatus,
    pub streak: StreakResult,
    /// Best streak persisted on the habit, at least the computed longest.
    pub best_streak: u32,
    pub tier: StreakTier,
    pub next_milestone: Option<u32>,
}

impl HabitSummary {
    pub fn new(habit: &Habit, ctx: DayContext) -> Self {
        let streak = habit.streak(ctx);
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
            category: habit.category,
            monthly_goal: habit.monthly_goal,
            completed: habit.completed_count(),
            progress_percent: habit.progress_percent(),
            status: habit.status(),
            best_streak: habit.longest_streak.max(streak.longest_streak),
            tier: StreakTier::for_streak(streak.current_streak),
            next_milestone: next_milestone(streak.current_streak),
            streak,
        }
    }
}

/// Everything the dashboard shows for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub context: DayContext,
    pub progress_percent: u32,
    pub habits: Vec<HabitSummary>,
    pub consistency: Vec<DailyConsistency>,
    pub categories: Vec<CategoryShare>,
}

impl MonthSummary {
    pub fn build(month: MonthKey, habits: &[Habit], ctx: DayContext) -> Self {
        Self {
            month,
            context: ctx,
            progress_percent: monthly_progress(habits),
            habits: habits.iter().map(|h| HabitSummary::new(h, ctx)).collect(),
            consistency: daily_consistency(habits, ctx),
            categories: category_breakdown(habits),
        }
    }
}
