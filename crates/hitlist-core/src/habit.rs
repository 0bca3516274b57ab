//! Habit records tracked for one calendar month.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{DayContext, MonthKey};
use crate::error::ValidationError;
use crate::streak::{compute_streak, StreakResult};

/// Category used to group habits.
///
/// Deserializes case-insensitively through [`FromStr`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum HabitCategory {
    Career,
    #[default]
    Health,
    Mindset,
}

impl HabitCategory {
    pub const ALL: [HabitCategory; 3] = [
        HabitCategory::Career,
        HabitCategory::Health,
        HabitCategory::Mindset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HabitCategory::Career => "Career",
            HabitCategory::Health => "Health",
            HabitCategory::Mindset => "Mindset",
        }
    }
}

impl fmt::Display for HabitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "career" => Ok(HabitCategory::Career),
            "health" => Ok(HabitCategory::Health),
            "mindset" => Ok(HabitCategory::Mindset),
            _ => Err(ValidationError::InvalidValue {
                field: "category".into(),
                message: format!("'{s}' is not one of Career, Health, Mindset"),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for HabitCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Monthly goal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitStatus {
    InProgress,
    Completed,
}

/// Display tier for a current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTier {
    Starter,
    Bronze,
    Silver,
    Gold,
}

impl StreakTier {
    pub fn for_streak(current_streak: u32) -> Self {
        match current_streak {
            0..=6 => StreakTier::Starter,
            7..=13 => StreakTier::Bronze,
            14..=29 => StreakTier::Silver,
            _ => StreakTier::Gold,
        }
    }
}

/// A habit and its completions within one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub category: HabitCategory,
    pub monthly_goal: u32,
    pub month: MonthKey,
    pub completed_days: BTreeSet<u32>,
    /// Best streak seen for this habit. Never decreases.
    #[serde(default)]
    pub longest_streak: u32,
    pub created_at: DateTime<Utc>,
}

/// Check a name and goal against the month they are tracked in.
///
/// Returns the trimmed name.
pub fn validate_habit_fields(
    name: &str,
    monthly_goal: u32,
    month: MonthKey,
) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let days_in_month = month.days_in_month();
    if monthly_goal == 0 || monthly_goal > days_in_month {
        return Err(ValidationError::GoalOutOfRange {
            goal: monthly_goal,
            days_in_month,
        });
    }
    Ok(name.to_string())
}

impl Habit {
    /// Create a habit with no completions.
    ///
    /// # Errors
    /// Returns an error if the trimmed name is empty or the goal does not fit
    /// in the month.
    pub fn new(
        name: &str,
        category: HabitCategory,
        monthly_goal: u32,
        month: MonthKey,
    ) -> Result<Self, ValidationError> {
        let name = validate_habit_fields(name, monthly_goal, month)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            category,
            monthly_goal,
            month,
            completed_days: BTreeSet::new(),
            longest_streak: 0,
            created_at: Utc::now(),
        })
    }

    /// Flip completion of `day`. Returns true when the day is now marked.
    pub fn toggle_day(&mut self, day: u32) -> bool {
        if self.completed_days.remove(&day) {
            false
        } else {
            self.completed_days.insert(day)
        }
    }

    pub fn is_completed(&self, day: u32) -> bool {
        self.completed_days.contains(&day)
    }

    pub fn completed_count(&self) -> u32 {
        self.completed_days.len() as u32
    }

    pub fn streak(&self, ctx: DayContext) -> StreakResult {
        let days: Vec<u32> = self.completed_days.iter().copied().collect();
        compute_streak(&days, ctx.current_day, ctx.days_in_month)
    }

    /// Share of the monthly goal reached, capped at 100.
    pub fn progress_percent(&self) -> u32 {
        if self.monthly_goal == 0 {
            return 0;
        }
        let pct = (self.completed_count() as f64 / self.monthly_goal as f64 * 100.0).round();
        (pct as u32).min(100)
    }

    pub fn status(&self) -> HabitStatus {
        if self.completed_count() >= self.monthly_goal {
            HabitStatus::Completed
        } else {
            HabitStatus::InProgress
        }
    }

    /// Copy this habit into `month` with a fresh id and no completions.
    ///
    /// Streaks are month-scoped, so unlike a plain copy the longest streak
    /// starts over at 0 as well.
    /// The goal is clamped to the new month's length.
    pub fn reuse_for(&self, month: MonthKey) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: self.name.clone(),
            category: self.category,
            monthly_goal: self.monthly_goal.min(month.days_in_month()).max(1),
            month,
            completed_days: BTreeSet::new(),
            longest_streak: 0,
            created_at: Utc::now(),
        }
    }
}
