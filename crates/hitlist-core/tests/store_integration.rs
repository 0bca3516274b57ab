//! Integration tests for the on-disk habit store.

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use hitlist_core::stats::MonthSummary;
use hitlist_core::{
    select_celebration, CelebrationKind, DayContext, Habit, HabitCategory, HabitStore, MonthKey,
    StreakBaselines,
};
use tempfile::TempDir;

fn june() -> MonthKey {
    MonthKey::new(2024, 6).unwrap()
}

fn june_day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

#[test]
fn week_of_toggles_celebrates_milestones_once() {
    let dir = TempDir::new().unwrap();
    let store = HabitStore::open_at(&dir.path().join("hitlist.db")).unwrap();
    let habit = Habit::new("Journal", HabitCategory::Mindset, 20, june()).unwrap();
    store.create_habit(&habit).unwrap();

    let mut milestones = Vec::new();
    for d in 1..=7 {
        let outcome = store.toggle_day(&habit.id, d, june_day(d)).unwrap();
        assert_eq!(outcome.after.current_streak, d);
        if let Some(c) = outcome.celebration {
            if let CelebrationKind::Milestone { milestone } = c.kind {
                milestones.push(milestone);
            }
        }
    }
    assert_eq!(milestones, vec![3, 7]);

    // Un-marking and re-marking day 7 crosses the milestone again, but ties
    // the stored best instead of beating it.
    store.toggle_day(&habit.id, 7, june_day(7)).unwrap();
    let again = store.toggle_day(&habit.id, 7, june_day(7)).unwrap();
    let c = again.celebration.unwrap();
    assert_eq!(c.kind, CelebrationKind::Milestone { milestone: 7 });
    assert!(!c.is_new_record);
}

#[test]
fn reopening_keeps_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hitlist.db");
    let habit = Habit::new("Walk", HabitCategory::Health, 10, june()).unwrap();
    {
        let store = HabitStore::open_at(&path).unwrap();
        store.create_habit(&habit).unwrap();
        store.toggle_day(&habit.id, 4, june_day(4)).unwrap();
        store.toggle_day(&habit.id, 5, june_day(5)).unwrap();
    }
    let store = HabitStore::open_at(&path).unwrap();
    let loaded = store.get_habit(&habit.id).unwrap().unwrap();
    assert_eq!(loaded.completed_count(), 2);
    assert_eq!(loaded.longest_streak, 2);

    // Viewed from the following month the cursor is 0 and the run still shows.
    let ctx = DayContext::for_month(june(), NaiveDate::from_ymd_opt(2024, 7, 2).unwrap());
    let summary = MonthSummary::build(june(), &[loaded], ctx);
    assert_eq!(summary.habits[0].streak.current_streak, 2);
    assert!(summary.consistency.is_empty());
}

#[test]
fn concurrent_toggles_are_serialized() {
    let dir = TempDir::new().unwrap();
    let path = Arc::new(dir.path().join("hitlist.db"));
    let habit = Habit::new("Water", HabitCategory::Health, 20, june()).unwrap();
    HabitStore::open_at(&path).unwrap().create_habit(&habit).unwrap();

    let handles: Vec<_> = (1..=20)
        .map(|d| {
            let path = Arc::clone(&path);
            let id = habit.id.clone();
            thread::spawn(move || {
                let store = HabitStore::open_at(&path).unwrap();
                store.toggle_day(&id, d, june_day(20)).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let store = HabitStore::open_at(&path).unwrap();
    let loaded = store.get_habit(&habit.id).unwrap().unwrap();
    assert_eq!(loaded.completed_count(), 20);
    assert_eq!(loaded.longest_streak, 20);
}

#[test]
fn caller_owned_baselines_drive_celebrations() {
    let month = june();
    let mut baselines = StreakBaselines::new(month);
    let mut habit = Habit::new("Read", HabitCategory::Mindset, 20, month).unwrap();

    let mut fired = Vec::new();
    for d in 1..=3 {
        habit.toggle_day(d);
        let ctx = DayContext::for_month(month, june_day(d));
        let result = habit.streak(ctx);
        let previous = baselines.observe(&habit.id, result.current_streak);
        let outcome = select_celebration(&habit.name, previous, &result, habit.longest_streak);
        habit.longest_streak = outcome.longest_streak;
        fired.push(outcome.celebration.map(|c| c.kind));
    }
    assert_eq!(
        fired,
        vec![
            Some(CelebrationKind::NewRecord),
            Some(CelebrationKind::NewRecord),
            Some(CelebrationKind::Milestone { milestone: 3 }),
        ]
    );

    // Moving to another month forgets the baseline.
    baselines.reset_for(month.next());
    assert_eq!(baselines.get(&habit.id), 0);
}
