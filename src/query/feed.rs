//! Short lists shown on the dashboard and report pages.
//!
//! Every feed keeps the input order except [`top_expenses`], and stops after
//! `limit` items.

use serde::Serialize;

use crate::model::{Case, CaseUpdate, Expense, Task};

pub fn recent_cases<'a, I>(cases: I, limit: usize) -> Vec<&'a Case>
where
    I: IntoIterator<Item = &'a Case>,
{
    cases.into_iter().take(limit).collect()
}

/// An open task with the case it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingTask<'a> {
    pub case_id: &'a str,
    pub case_title: &'a str,
    #[serde(flatten)]
    pub task: &'a Task,
}

/// Tasks that are not completed, across all cases.
pub fn upcoming_tasks<'a, I>(cases: I, limit: usize) -> Vec<UpcomingTask<'a>>
where
    I: IntoIterator<Item = &'a Case>,
{
    cases
        .into_iter()
        .flat_map(|case| {
            case.tasks.iter().map(move |task| UpcomingTask {
                case_id: &case.id,
                case_title: &case.title,
                task,
            })
        })
        .filter(|entry| !entry.task.is_completed())
        .take(limit)
        .collect()
}

/// Journal entries across all cases, case by case.
pub fn activity_feed<'a, I>(cases: I, limit: usize) -> Vec<&'a CaseUpdate>
where
    I: IntoIterator<Item = &'a Case>,
{
    cases
        .into_iter()
        .flat_map(|case| case.updates.iter())
        .take(limit)
        .collect()
}

/// Largest expenses first. Ties keep their input order.
pub fn top_expenses<'a, I>(expenses: I, limit: usize) -> Vec<&'a Expense>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut sorted: Vec<&Expense> = expenses.into_iter().collect();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::model::{CaseStatus, Priority, TaskStatus};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            assignee: "Detective Smith".to_string(),
            due_date: at(15),
            status,
            priority: Priority::Medium,
            notes: String::new(),
        }
    }

    fn update(id: &str) -> CaseUpdate {
        CaseUpdate {
            id: id.to_string(),
            content: format!("Update {id}"),
            author: "Detective Smith".to_string(),
            timestamp: at(2),
            update_type: "note".to_string(),
        }
    }

    fn case(id: &str, tasks: Vec<Task>, updates: Vec<CaseUpdate>) -> Case {
        Case {
            id: id.to_string(),
            title: format!("Case {id}"),
            account_id: "1".to_string(),
            contact_id: "1".to_string(),
            status: CaseStatus::Active,
            priority: Priority::High,
            case_type: "Surveillance".to_string(),
            created_at: at(1),
            due_date: at(30),
            assigned_to: "Detective Smith".to_string(),
            description: String::new(),
            subjects: Vec::new(),
            vehicles: Vec::new(),
            locations: Vec::new(),
            tasks,
            events: Vec::new(),
            updates,
            expenses: Vec::new(),
        }
    }

    fn expense(id: &str, amount: Decimal) -> Expense {
        Expense {
            id: id.to_string(),
            case_id: None,
            category: "Travel".to_string(),
            amount,
            description: String::new(),
            date: at(5),
            receipt: None,
            billable: false,
        }
    }

    #[test]
    fn recent_cases_keeps_store_order() {
        let cases: Vec<Case> = (1..=7)
            .map(|n| case(&n.to_string(), Vec::new(), Vec::new()))
            .collect();
        let recent = recent_cases(&cases, 5);
        let ids: Vec<&str> = recent.iter().map(|case| case.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn upcoming_tasks_skip_completed_and_carry_case() {
        let cases = vec![
            case(
                "1",
                vec![
                    task("a", TaskStatus::Completed),
                    task("b", TaskStatus::Pending),
                ],
                Vec::new(),
            ),
            case("2", vec![task("c", TaskStatus::InProgress)], Vec::new()),
        ];

        let upcoming = upcoming_tasks(&cases, 5);
        let tagged: Vec<(&str, &str)> = upcoming
            .iter()
            .map(|entry| (entry.case_id, entry.task.id.as_str()))
            .collect();
        assert_eq!(tagged, vec![("1", "b"), ("2", "c")]);
        assert_eq!(upcoming[1].case_title, "Case 2");
    }

    #[test]
    fn upcoming_task_serializes_flat() {
        let cases = vec![case("9", vec![task("t", TaskStatus::Pending)], Vec::new())];
        let upcoming = upcoming_tasks(&cases, 1);
        let value = serde_json::to_value(&upcoming[0]).expect("serialize");
        assert_eq!(value["case_id"], "9");
        assert_eq!(value["title"], "Task t");
        assert_eq!(value["status"], "Pending");
    }

    #[test]
    fn activity_feed_concatenates_updates_up_to_limit() {
        let cases = vec![
            case("1", Vec::new(), vec![update("1"), update("2")]),
            case("2", Vec::new(), Vec::new()),
            case("3", Vec::new(), vec![update("3")]),
        ];
        let feed = activity_feed(&cases, 2);
        let ids: Vec<&str> = feed.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(activity_feed(&cases, 10).len(), 3);
    }

    #[test]
    fn top_expenses_sorts_by_amount_descending() {
        let expenses = vec![
            expense("1", dec!(40)),
            expense("2", dec!(150.00)),
            expense("3", dec!(89.99)),
            expense("4", dec!(150)),
        ];
        let top = top_expenses(&expenses, 3);
        let ids: Vec<&str> = top.iter().map(|expense| expense.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4", "3"]);
    }
}
