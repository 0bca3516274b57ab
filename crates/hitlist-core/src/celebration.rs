//! Celebration selection when a habit day is toggled.
//!
//! Combines the streak before and after a toggle with the milestone and
//! record checks, and decides which longest streak to persist.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::calendar::{DayContext, MonthKey};
use crate::error::ValidationError;
use crate::habit::Habit;
use crate::streak::{check_milestone, is_new_record, milestone_message, StreakResult};

/// What a celebration is for. A milestone wins over a plain record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CelebrationKind {
    Milestone { milestone: u32 },
    NewRecord,
}

/// One-shot notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebration {
    pub streak: u32,
    pub habit_name: String,
    pub kind: CelebrationKind,
    /// Set whenever the streak beat the previous best, even if a milestone
    /// took precedence for display.
    pub is_new_record: bool,
}

impl Celebration {
    pub fn is_milestone(&self) -> bool {
        matches!(self.kind, CelebrationKind::Milestone { .. })
    }

    pub fn title(&self) -> String {
        match self.kind {
            CelebrationKind::Milestone { milestone } => milestone_message(milestone)
                .map(|m| m.title.to_string())
                .unwrap_or_else(|| format!("{milestone} Days!")),
            CelebrationKind::NewRecord => "New Record!".to_string(),
        }
    }

    pub fn message(&self) -> String {
        match self.kind {
            CelebrationKind::Milestone { milestone } => milestone_message(milestone)
                .map(|m| m.message.to_string())
                .unwrap_or_else(|| format!("{} day streak!", self.streak)),
            CelebrationKind::NewRecord => {
                format!("{} days - your longest streak ever!", self.streak)
            }
        }
    }
}

/// Result of [`select_celebration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelebrationOutcome {
    pub celebration: Option<Celebration>,
    /// Longest streak to persist on the habit, whether or not anything fired.
    pub longest_streak: u32,
}

/// Decide whether marking a day complete deserves a celebration.
///
/// # Arguments
/// * `habit_name` - Name carried on the event
/// * `previous_streak` - Current streak before the toggle
/// * `new_result` - Streak metrics after the toggle
/// * `previous_longest` - Longest streak persisted on the habit before the toggle
pub fn select_celebration(
    habit_name: &str,
    previous_streak: u32,
    new_result: &StreakResult,
    previous_longest: u32,
) -> CelebrationOutcome {
    let milestone = check_milestone(previous_streak, new_result.current_streak);
    let longest_streak = previous_longest.max(new_result.longest_streak);
    let record = is_new_record(new_result.current_streak, longest_streak, previous_longest);

    let kind = match (milestone, record) {
        (Some(milestone), _) => Some(CelebrationKind::Milestone { milestone }),
        (None, true) => Some(CelebrationKind::NewRecord),
        (None, false) => None,
    };

    let celebration = kind.map(|kind| Celebration {
        streak: new_result.current_streak,
        habit_name: habit_name.to_string(),
        kind,
        is_new_record: record,
    });

    if let Some(c) = &celebration {
        tracing::info!(
            habit = habit_name,
            streak = c.streak,
            kind = ?c.kind,
            "celebration triggered"
        );
    }

    CelebrationOutcome {
        celebration,
        longest_streak,
    }
}

/// Everything that changed when a day was toggled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    pub habit_id: String,
    pub day: u32,
    /// True when the day is now marked complete.
    pub marked: bool,
    pub before: StreakResult,
    pub after: StreakResult,
    pub longest_streak: u32,
    pub celebration: Option<Celebration>,
}

/// Toggle `day` on `habit`, recompute streaks and update its longest streak.
///
/// Un-marking a day never celebrates, and the persisted longest streak never
/// goes down.
///
/// # Errors
/// Returns an error if `day` is outside `1..=ctx.days_in_month`.
pub fn apply_toggle(
    habit: &mut Habit,
    day: u32,
    ctx: DayContext,
) -> Result<ToggleOutcome, ValidationError> {
    if day == 0 || day > ctx.days_in_month {
        return Err(ValidationError::DayOutOfRange {
            day,
            days_in_month: ctx.days_in_month,
        });
    }

    let before = habit.streak(ctx);
    let marked = habit.toggle_day(day);
    let after = habit.streak(ctx);

    let celebration = if marked {
        let outcome = select_celebration(&habit.name, before.current_streak, &after, habit.longest_streak);
        habit.longest_streak = outcome.longest_streak;
        outcome.celebration
    } else {
        habit.longest_streak = habit.longest_streak.max(after.longest_streak);
        None
    };

    tracing::debug!(
        habit_id = %habit.id,
        day,
        marked,
        before = before.current_streak,
        after = after.current_streak,
        "toggled habit day"
    );

    Ok(ToggleOutcome {
        habit_id: habit.id.clone(),
        day,
        marked,
        before,
        after,
        longest_streak: habit.longest_streak,
        celebration,
    })
}

/// Caller-owned "previous streak" per habit for one displayed month.
///
/// Long-lived front-ends that observe streaks as they change use this to
/// detect transitions. Baselines are month-scoped and cleared whenever the
/// displayed month changes.
#[derive(Debug, Clone)]
pub struct StreakBaselines {
    month: MonthKey,
    baselines: HashMap<String, u32>,
}

impl StreakBaselines {
    pub fn new(month: MonthKey) -> Self {
        Self {
            month,
            baselines: HashMap::new(),
        }
    }

    pub fn month(&self) -> MonthKey {
        self.month
    }

    /// Switch to `month`, dropping all baselines if it differs.
    /// Returns true when a reset happened.
    pub fn reset_for(&mut self, month: MonthKey) -> bool {
        if month == self.month {
            return false;
        }
        self.month = month;
        self.baselines.clear();
        true
    }

    /// Baseline for a habit, 0 if never observed.
    pub fn get(&self, habit_id: &str) -> u32 {
        self.baselines.get(habit_id).copied().unwrap_or(0)
    }

    /// Record `current_streak` as the new baseline and return the old one.
    pub fn observe(&mut self, habit_id: &str, current_streak: u32) -> u32 {
        self.baselines
            .insert(habit_id.to_string(), current_streak)
            .unwrap_or(0)
    }

    pub fn remove(&mut self, habit_id: &str) {
        self.baselines.remove(habit_id);
    }
}
