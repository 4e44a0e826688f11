use chrono::NaiveDateTime;

use super::pattern::RecurrencePattern;

/// Where a series stands while its next instance is being produced.
///
/// Nothing here is persisted. A fresh state is seeded from the completed task
/// each time, so the instance number restarts at 1 unless a caller that
/// pre-generates several instances carries the returned state forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceState {
    pub pattern: RecurrencePattern,
    /// Due date that first established the schedule
    pub original_due: NaiveDateTime,
    /// Due date of the most recent instance; the next computation starts here
    pub last_created: NaiveDateTime,
    /// Instances materialized so far, the original task included
    pub instance_num: u32,
}

impl RecurrenceState {
    pub fn new(pattern: RecurrencePattern, due: NaiveDateTime) -> Self {
        Self {
            pattern,
            original_due: due,
            last_created: due,
            instance_num: 1,
        }
    }

    #[inline]
    pub fn has_reached_limit(&self) -> bool {
        self.pattern.count > 0 && self.instance_num >= self.pattern.count
    }

    pub fn advance(&mut self, next_due: NaiveDateTime) {
        self.last_created = next_due;
        self.instance_num = self.instance_num.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn due() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn test_new_state_starts_at_first_instance() {
        let state = RecurrenceState::new(RecurrencePattern::daily(), due());
        assert_eq!(state.instance_num, 1);
        assert_eq!(state.original_due, due());
        assert_eq!(state.last_created, due());
    }

    #[test]
    fn test_unlimited_never_reaches_limit() {
        let mut state = RecurrenceState::new(RecurrencePattern::daily(), due());
        for _ in 0..100 {
            state.advance(state.last_created);
        }
        assert!(!state.has_reached_limit());
    }

    #[test]
    fn test_limit_reached_at_count() {
        let mut state = RecurrenceState::new(RecurrencePattern::daily().with_count(2), due());
        assert!(!state.has_reached_limit());
        state.advance(due());
        assert!(state.has_reached_limit());
    }

    #[test]
    fn test_count_of_one_is_exhausted_by_the_original() {
        let state = RecurrenceState::new(RecurrencePattern::daily().with_count(1), due());
        assert!(state.has_reached_limit());
    }

    #[test]
    fn test_advance_keeps_original_due() {
        let mut state = RecurrenceState::new(RecurrencePattern::daily(), due());
        let later = due() + chrono::Duration::days(1);
        state.advance(later);
        assert_eq!(state.last_created, later);
        assert_eq!(state.original_due, due());
        assert_eq!(state.instance_num, 2);
    }
}
