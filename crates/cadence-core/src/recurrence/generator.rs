use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use super::calendar::out_of_range;
use super::codec;
use super::occurrence::next_occurrence;
use super::state::RecurrenceState;
use crate::error::{CoreError, EndReason};
use crate::models::{CompletionResult, NewTaskData, Task, TaskStatus};

/// The successor of a completed recurring task.
#[derive(Debug, Clone, PartialEq)]
pub struct NextInstance {
    /// Payload for the task store to insert
    pub task: NewTaskData,
    /// State advanced past `task`, for callers that pre-generate further
    /// instances
    pub state: RecurrenceState,
}

/// Produces the next instance of a recurring task.
///
/// # Arguments
/// * `task` - The task that was just completed
/// * `prior` - State carried over from a previous call, `None` on a normal
///   completion
/// * `now` - Fallback reference when the task has neither a due nor a start
///   date
///
/// # Behavior
/// - Decode the task's recurrence string
/// - Seed a state from the due date, else the start date, else `now`
/// - Stop with `RecurrenceEnded` when the count limit is reached, without
///   computing a date
/// - Copy the task's attributes onto a pending payload due at the next
///   occurrence, keeping the start date's lead time
pub fn generate_next(
    task: &Task,
    prior: Option<RecurrenceState>,
    now: NaiveDateTime,
) -> Result<NextInstance, CoreError> {
    let rule = task
        .recurrence
        .as_deref()
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .ok_or(CoreError::NotRecurring)?;

    let pattern = codec::decode(rule)?;

    let mut state = match prior {
        Some(state) => state,
        None => {
            let reference = task.due_date.or(task.start_date).unwrap_or(now);
            debug!(task_id = %task.id, %reference, "seeding recurrence state");
            RecurrenceState::new(pattern, reference)
        }
    };

    if state.has_reached_limit() {
        return Err(CoreError::RecurrenceEnded(EndReason::Count(state.pattern.count)));
    }

    let next_due = next_occurrence(&state.pattern, state.last_created)?;
    let start_date = shifted_start_date(task, next_due)?;

    let next = NewTaskData {
        description: task.description.clone(),
        status: TaskStatus::Pending,
        priority: task.priority,
        due_date: Some(next_due),
        start_date,
        project_id: task.project_id,
        recurrence: task.recurrence.clone(),
        tags: task.tags.clone(),
        notes: task.notes.clone(),
        dependent_id: task.dependent_id,
    };

    state.advance(next_due);
    debug!(
        task_id = %task.id,
        %next_due,
        instance = state.instance_num,
        "generated next recurring instance"
    );

    Ok(NextInstance { task: next, state })
}

/// Keeps the gap between start and due date, counted in whole days.
fn shifted_start_date(task: &Task, next_due: NaiveDateTime) -> Result<Option<NaiveDateTime>, CoreError> {
    let (Some(due), Some(start)) = (task.due_date, task.start_date) else {
        return Ok(None);
    };

    let lead_days = (due - start).num_days();
    if lead_days <= 0 {
        return Ok(None);
    }

    next_due
        .checked_sub_signed(Duration::days(lead_days))
        .map(Some)
        .ok_or_else(out_of_range)
}

/// Marks a task completed and, if it recurs, produces its successor.
///
/// A series that has run out is not an error here: the completion stands and
/// the result says why no successor exists.
pub fn complete_task(task: &Task, now: NaiveDateTime) -> Result<CompletionResult, CoreError> {
    let mut completed = task.clone();
    completed.status = TaskStatus::Completed;
    completed.completed_at = Some(now);

    if !task.is_recurring() {
        return Ok(CompletionResult::Single { completed });
    }

    match generate_next(task, None, now) {
        Ok(NextInstance { task: next, .. }) => Ok(CompletionResult::Recurring { completed, next }),
        Err(CoreError::RecurrenceEnded(reason)) => {
            debug!(task_id = %task.id, %reason, "recurring series ended");
            Ok(CompletionResult::SeriesEnded { completed, reason })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn recurring_task(rule: &str) -> Task {
        Task {
            description: "Review budget".to_string(),
            status: TaskStatus::Active,
            priority: Some(TaskPriority::High),
            due_date: Some(at(2024, 3, 10)),
            start_date: Some(at(2024, 3, 3)),
            project_id: Some(Uuid::now_v7()),
            recurrence: Some(rule.to_string()),
            tags: vec!["finance".to_string(), "home".to_string()],
            notes: Some("Check the receipts folder".to_string()),
            dependent_id: Some(Uuid::now_v7()),
            ..Default::default()
        }
    }

    mod generate_next_tests {
        use super::*;

        #[test]
        fn test_weekly_keeps_lead_time() {
            let task = recurring_task("weekly:1:");
            let next = generate_next(&task, None, at(2030, 1, 1)).unwrap();

            assert_eq!(next.task.due_date, Some(at(2024, 3, 17)));
            assert_eq!(next.task.start_date, Some(at(2024, 3, 10)));
        }

        #[test]
        fn test_copies_attributes_and_resets_status() {
            let task = recurring_task("daily:1:");
            let next = generate_next(&task, None, at(2030, 1, 1)).unwrap().task;

            assert_eq!(next.status, TaskStatus::Pending);
            assert_eq!(next.description, task.description);
            assert_eq!(next.priority, task.priority);
            assert_eq!(next.project_id, task.project_id);
            assert_eq!(next.recurrence, task.recurrence);
            assert_eq!(next.tags, task.tags);
            assert_eq!(next.notes, task.notes);
            assert_eq!(next.dependent_id, task.dependent_id);
        }

        #[test]
        fn test_returns_advanced_state() {
            let task = recurring_task("daily:2:");
            let next = generate_next(&task, None, at(2030, 1, 1)).unwrap();

            assert_eq!(next.state.instance_num, 2);
            assert_eq!(next.state.original_due, at(2024, 3, 10));
            assert_eq!(next.state.last_created, at(2024, 3, 12));
        }

        #[test]
        fn test_carried_state_continues_the_series() {
            let task = recurring_task("daily:2:");
            let first = generate_next(&task, None, at(2030, 1, 1)).unwrap();
            let second = generate_next(&task, Some(first.state), at(2030, 1, 1)).unwrap();

            assert_eq!(second.task.due_date, Some(at(2024, 3, 14)));
            assert_eq!(second.state.instance_num, 3);
        }

        #[test]
        fn test_no_start_date_means_none() {
            let mut task = recurring_task("daily:1:");
            task.start_date = None;
            let next = generate_next(&task, None, at(2030, 1, 1)).unwrap().task;
            assert_eq!(next.start_date, None);
        }

        #[test]
        fn test_start_after_due_is_dropped() {
            let mut task = recurring_task("daily:1:");
            task.start_date = Some(at(2024, 3, 12));
            let next = generate_next(&task, None, at(2030, 1, 1)).unwrap().task;
            assert_eq!(next.start_date, None);
        }

        #[test]
        fn test_lead_time_counts_whole_days() {
            let mut task = recurring_task("daily:1:");
            task.start_date = Some(at(2024, 3, 8) + Duration::hours(12));
            let next = generate_next(&task, None, at(2030, 1, 1)).unwrap().task;
            // 1.5 days of lead time is one whole day
            assert_eq!(next.start_date, Some(at(2024, 3, 10)));
        }

        #[test]
        fn test_falls_back_to_start_date() {
            let mut task = recurring_task("daily:1:");
            task.due_date = None;
            let next = generate_next(&task, None, at(2030, 1, 1)).unwrap();
            assert_eq!(next.task.due_date, Some(at(2024, 3, 4)));
            assert_eq!(next.task.start_date, None);
        }

        #[test]
        fn test_falls_back_to_now() {
            let mut task = recurring_task("daily:1:");
            task.due_date = None;
            task.start_date = None;
            let next = generate_next(&task, None, at(2030, 1, 1)).unwrap();
            assert_eq!(next.task.due_date, Some(at(2030, 1, 2)));
        }

        #[test]
        fn test_not_recurring() {
            let mut task = recurring_task("daily:1:");
            task.recurrence = None;
            assert!(matches!(
                generate_next(&task, None, at(2030, 1, 1)),
                Err(CoreError::NotRecurring)
            ));

            task.recurrence = Some(String::new());
            assert!(matches!(
                generate_next(&task, None, at(2030, 1, 1)),
                Err(CoreError::NotRecurring)
            ));
        }

        #[test]
        fn test_invalid_rule_propagates() {
            let task = recurring_task("fortnightly:1:");
            assert!(matches!(
                generate_next(&task, None, at(2030, 1, 1)),
                Err(CoreError::InvalidFormat(_))
            ));
        }

        #[test]
        fn test_count_limit_stops_before_computing() {
            // The rule is ambiguous, so reaching the calculator would fail
            // with AmbiguousRule instead.
            let task = recurring_task("monthly:1::count:2");
            let mut state = RecurrenceState::new(codec::decode("monthly:1::count:2").unwrap(), at(2024, 3, 10));
            state.instance_num = 2;

            let err = generate_next(&task, Some(state), at(2030, 1, 1)).unwrap_err();
            assert!(matches!(err, CoreError::RecurrenceEnded(EndReason::Count(2))));
        }

        #[test]
        fn test_until_ends_series() {
            let task = recurring_task("weekly:1::until:2024-03-15");
            assert!(matches!(
                generate_next(&task, None, at(2030, 1, 1)),
                Err(CoreError::RecurrenceEnded(EndReason::Until(_)))
            ));
        }

        #[test]
        fn test_ambiguous_monthly_rule() {
            let task = recurring_task("monthly:1:");
            assert!(matches!(
                generate_next(&task, None, at(2030, 1, 1)),
                Err(CoreError::AmbiguousRule(_))
            ));
        }
    }

    mod complete_task_tests {
        use super::*;

        #[test]
        fn test_single_task() {
            let task = Task {
                description: "One-off".to_string(),
                ..Default::default()
            };
            let result = complete_task(&task, at(2024, 5, 1)).unwrap();

            assert!(matches!(result, CompletionResult::Single { .. }));
            assert_eq!(result.completed().status, TaskStatus::Completed);
            assert_eq!(result.completed().completed_at, Some(at(2024, 5, 1)));
            assert!(result.next().is_none());
        }

        #[test]
        fn test_recurring_task() {
            let task = recurring_task("monthly:1:last");
            let result = complete_task(&task, at(2024, 3, 10)).unwrap();

            let next = result.next().expect("successor");
            assert_eq!(next.due_date, Some(at(2024, 4, 30)));
            assert_eq!(result.completed().id, task.id);
            assert_eq!(result.completed().status, TaskStatus::Completed);
        }

        #[test]
        fn test_series_ended_keeps_completion() {
            let task = recurring_task("daily:1::count:1");
            let result = complete_task(&task, at(2024, 3, 10)).unwrap();

            match result {
                CompletionResult::SeriesEnded { completed, reason } => {
                    assert_eq!(completed.status, TaskStatus::Completed);
                    assert_eq!(reason, EndReason::Count(1));
                }
                other => panic!("expected SeriesEnded, got {:?}", other),
            }
        }

        #[test]
        fn test_other_errors_propagate() {
            let task = recurring_task("monthly:1:");
            assert!(matches!(
                complete_task(&task, at(2024, 3, 10)),
                Err(CoreError::AmbiguousRule(_))
            ));
        }
    }
}
