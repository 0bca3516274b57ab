//! Property tests for the streak engine.

use std::collections::BTreeSet;

use hitlist_core::{
    apply_toggle, check_milestone, compute_streak, DayContext, Habit, HabitCategory, MonthKey,
    MILESTONES,
};
use proptest::prelude::*;

fn month_days() -> impl Strategy<Value = (u32, Vec<u32>)> {
    (28u32..=31).prop_flat_map(|len| (Just(len), prop::collection::vec(1..=len, 0..40)))
}

proptest! {
    #[test]
    fn longest_never_below_current((len, days) in month_days(), current_day in 0u32..=31) {
        let result = compute_streak(&days, current_day, len);
        prop_assert!(result.longest_streak >= result.current_streak);
        prop_assert_eq!(result.last_completed_day, days.iter().copied().max());
        if days.is_empty() {
            prop_assert_eq!(result.longest_streak, 0);
        } else {
            prop_assert!(result.longest_streak >= 1);
        }
    }

    #[test]
    fn recomputation_is_stable((len, days) in month_days(), current_day in 0u32..=31) {
        prop_assert_eq!(
            compute_streak(&days, current_day, len),
            compute_streak(&days, current_day, len)
        );
    }

    #[test]
    fn input_order_does_not_matter((len, days) in month_days(), current_day in 0u32..=31) {
        let mut reversed = days.clone();
        reversed.reverse();
        prop_assert_eq!(
            compute_streak(&days, current_day, len),
            compute_streak(&reversed, current_day, len)
        );
    }

    #[test]
    fn arbitrary_input_never_panics(days in prop::collection::vec(any::<u32>(), 0..40), current_day in any::<u32>(), len in any::<u32>()) {
        let result = compute_streak(&days, current_day, len);
        prop_assert!(result.longest_streak >= result.current_streak);
    }

    #[test]
    fn milestone_is_smallest_crossed(prev in 0u32..400, new in 0u32..400) {
        match check_milestone(prev, new) {
            Some(m) => {
                prop_assert!(prev < m && m <= new);
                prop_assert!(MILESTONES.iter().all(|&x| !(prev < x && x < m)));
            }
            None => prop_assert!(MILESTONES.iter().all(|&x| !(prev < x && x <= new))),
        }
    }

    #[test]
    fn toggle_twice_restores_state(
        initial in prop::collection::btree_set(1u32..=30, 0..30),
        day in 1u32..=30,
        current_day in 0u32..=30,
    ) {
        let mut habit = Habit::new("Walk", HabitCategory::Health, 30, MonthKey { year: 2024, month: 6 }).unwrap();
        habit.completed_days = initial.clone();
        let ctx = DayContext { current_day, days_in_month: 30 };
        let before = habit.streak(ctx);
        habit.longest_streak = before.longest_streak;

        apply_toggle(&mut habit, day, ctx).unwrap();
        let longest_mid = habit.longest_streak;
        apply_toggle(&mut habit, day, ctx).unwrap();

        prop_assert_eq!(&habit.completed_days, &initial);
        prop_assert_eq!(habit.streak(ctx), before);
        prop_assert_eq!(habit.longest_streak, longest_mid);
        prop_assert!(habit.longest_streak >= before.longest_streak);
    }
}

#[test]
fn documented_examples() {
    let r = compute_streak(&[5, 6, 7], 7, 31);
    assert_eq!((r.current_streak, r.longest_streak, r.last_completed_day), (3, 3, Some(7)));

    let r = compute_streak(&[5, 6, 7], 9, 31);
    assert_eq!((r.current_streak, r.longest_streak), (0, 3));

    let r = compute_streak(&[1, 2, 3, 10, 11], 11, 31);
    assert_eq!((r.current_streak, r.longest_streak), (2, 3));

    let empty: BTreeSet<u32> = BTreeSet::new();
    let days: Vec<u32> = empty.into_iter().collect();
    let r = compute_streak(&days, 15, 31);
    assert_eq!((r.current_streak, r.longest_streak, r.last_completed_day), (0, 0, None));
}
