/// Whether `current_streak` just set a new all-time record.
///
/// A tie with the previous best is not a record, and a zero streak never is.
pub fn is_new_record(current_streak: u32, longest_after_update: u32, previous_longest: u32) -> bool {
    current_streak > 0 && longest_after_update > previous_longest
}
