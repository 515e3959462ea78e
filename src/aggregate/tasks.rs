use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{count, floored_ratio};
use crate::model::{Case, Task};

/// Completed tasks over all tasks; zero for an empty list.
pub fn task_completion_ratio(tasks: &[Task]) -> Decimal {
    let completed = tasks.iter().filter(|task| task.is_completed()).count();
    floored_ratio(count(completed), count(tasks.len()))
}

pub fn case_completion_ratio(case: &Case) -> Decimal {
    task_completion_ratio(&case.tasks)
}

/// Open tasks past their due date, across every case.
pub fn overdue_task_count<'a, I>(cases: I, now: DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = &'a Case>,
{
    cases
        .into_iter()
        .flat_map(|case| case.tasks.iter())
        .filter(|task| task.is_overdue(now))
        .count()
}
