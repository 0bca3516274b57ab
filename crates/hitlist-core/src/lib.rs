//! # Hitlist Core Library
//!
//! This library provides the core logic for Hitlist, a monthly habit tracker.
//! All operations are available through the `hitlist` CLI, which stays a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Streak engine**: pure functions computing current and longest streaks,
//!   milestone crossings and new records from a month of completed days
//! - **Celebrations**: glue that decides, per day toggle, whether to celebrate
//!   and which longest streak to persist
//! - **Storage**: SQLite habit store and TOML-based configuration
//! - **Stats**: monthly progress, daily consistency and category breakdown
//!
//! Streaks are scoped to one calendar month. A run ending on the last day of
//! one month does not continue into the next.
//!
//! ## Key Components
//!
//! - [`compute_streak`]: Streak metrics for a set of completed days
//! - [`select_celebration`]: Milestone/record selection for a toggle
//! - [`HabitStore`]: Habit persistence
//! - [`Config`]: Application configuration management

pub mod calendar;
pub mod celebration;
pub mod error;
pub mod habit;
pub mod stats;
pub mod storage;
pub mod streak;

pub use calendar::{DayContext, MonthKey};
pub use celebration::{
    apply_toggle, select_celebration, Celebration, CelebrationKind, CelebrationOutcome,
    StreakBaselines, ToggleOutcome,
};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use habit::{Habit, HabitCategory, HabitStatus, StreakTier};
pub use stats::{HabitSummary, MonthSummary};
pub use storage::{Config, HabitStore};
pub use streak::{check_milestone, compute_streak, is_new_record, StreakResult, MILESTONES};
