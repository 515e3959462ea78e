//! End-to-end behaviour of the store and the views built on it.

use std::io::Write;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use casedesk::aggregate::{
    DashboardSummary, FinancialOverview, FinancialTotals, RetainerHealth, ReportSummary,
    retainer_usage_ratio, task_completion_ratio,
};
use casedesk::clock::FixedClock;
use casedesk::config::StoreConfig;
use casedesk::model::{
    AccountStatus, AccountType, CaseStatus, CaseUpdate, CreateAccountParams, CreateCaseParams,
    CreateExpenseParams, Priority, Task, TaskStatus, UpdateAccountParams, UpdateCaseParams,
};
use casedesk::query::{AccountSearch, CaseFilter, ReportPeriod};
use casedesk::{DomainStore, Fixtures};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 20, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

fn seeded() -> DomainStore {
    DomainStore::from_fixtures(
        Fixtures::bundled().expect("bundled fixtures"),
        Arc::new(FixedClock(now())),
    )
}

fn task(id: &str, status: TaskStatus) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        assignee: "Detective Smith".to_string(),
        due_date: now(),
        status,
        priority: Priority::Medium,
        notes: String::new(),
    }
}

#[test]
fn renaming_an_account_touches_nothing_else() {
    let mut store = seeded();
    let before = store.account("1").cloned().expect("seed account");

    store.update_account(
        "1",
        UpdateAccountParams {
            name: Some("Meridian Mutual".to_string()),
            ..Default::default()
        },
    );

    let after = store.account("1").expect("seed account");
    assert_eq!(after.name, "Meridian Mutual");
    assert_eq!(after.retainer, before.retainer);
    assert_eq!(after.remaining_retainer, before.remaining_retainer);
    assert_eq!(after.contacts, before.contacts);
    assert_eq!(after.service_history, before.service_history);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(store.account("2"), Fixtures::bundled().expect("fixtures").accounts.get(1));
}

#[test]
fn new_case_appears_in_dashboard_with_empty_file() {
    let mut store = seeded();
    let created = store.add_case(CreateCaseParams {
        title: "Workers comp surveillance".to_string(),
        account_id: "2".to_string(),
        contact_id: "2".to_string(),
        status: CaseStatus::Active,
        priority: Priority::Low,
        case_type: "Surveillance".to_string(),
        due_date: now(),
        assigned_to: "Detective Jones".to_string(),
        description: "Verify claimed injury".to_string(),
    });

    assert!(created.tasks.is_empty());
    assert!(created.updates.is_empty());
    assert_eq!(task_completion_ratio(&created.tasks), Decimal::ZERO);

    let summary = DashboardSummary::build(store.snapshot(), store.now());
    assert_eq!(summary.active_cases, 2);
    let titles: Vec<&str> = summary.recent_cases.iter().map(|row| row.title).collect();
    assert_eq!(
        titles,
        vec!["Insurance Fraud - Vehicle Claim", "Workers comp surveillance"]
    );
    assert_eq!(summary.recent_cases[1].account_name, "Thompson & Associates Law");
}

#[test]
fn case_updates_flow_into_activity_feed() {
    let mut store = seeded();
    let mut updates = store.case("1").expect("seed case").updates.clone();
    updates.push(CaseUpdate {
        id: "2".to_string(),
        content: "Claimant interviewed".to_string(),
        author: "Detective Smith".to_string(),
        timestamp: now(),
        update_type: "note".to_string(),
    });
    let revision = store.revision();

    store.update_case(
        "1",
        UpdateCaseParams {
            updates: Some(updates),
            tasks: Some(vec![
                task("1", TaskStatus::Completed),
                task("2", TaskStatus::Pending),
            ]),
            ..Default::default()
        },
    );

    assert!(store.revision() > revision);
    let case = store.case("1").expect("seed case");
    assert_eq!(task_completion_ratio(&case.tasks), dec!(0.5));

    let summary = DashboardSummary::build(store.snapshot(), store.now());
    assert_eq!(summary.activity.len(), 2);
    assert_eq!(summary.upcoming_tasks.len(), 1);
    assert_eq!(summary.upcoming_tasks[0].task.id, "2");
}

#[test]
fn seeded_retainer_is_healthy() {
    let store = seeded();
    let account = store.account("1").expect("seed account");
    assert_eq!(retainer_usage_ratio(account), dec!(0.74));
    assert_eq!(
        RetainerHealth::classify(account.remaining_retainer),
        RetainerHealth::Good
    );
}

#[test]
fn retainer_ratio_stays_in_unit_interval_for_new_accounts() {
    let mut store = DomainStore::new(Arc::new(FixedClock(now())));
    for (retainer, remaining) in [
        (dec!(0), dec!(0)),
        (dec!(0), dec!(400)),
        (dec!(1000), dec!(2500)),
        (dec!(1000), dec!(250)),
    ] {
        let account = store.add_account(CreateAccountParams {
            name: "Dana Whitfield".to_string(),
            account_type: AccountType::Individual,
            retainer,
            remaining_retainer: remaining,
            status: AccountStatus::Active,
        });
        let ratio = retainer_usage_ratio(&account);
        assert!(ratio >= Decimal::ZERO && ratio <= Decimal::ONE, "{ratio}");
        if retainer == Decimal::ZERO {
            assert_eq!(ratio, Decimal::ZERO);
        }
    }
    assert_eq!(store.accounts().len(), 4);
}

#[test]
fn ledger_totals_and_margin() {
    let store = seeded();
    let totals = FinancialTotals::compute(store.expenses(), store.invoices());
    assert_eq!(totals.net_profit, dec!(2350.00));
    assert_eq!(totals.margin_percent, 94);
}

#[test]
fn recorded_expense_reaches_financials_but_not_case_file() {
    let mut store = seeded();
    store.add_expense(CreateExpenseParams {
        case_id: Some("1".to_string()),
        category: "Equipment".to_string(),
        amount: dec!(350.00),
        description: "Camera rental".to_string(),
        date: now(),
        receipt: Some("receipt-0042.pdf".to_string()),
        billable: false,
    });

    let overview = FinancialOverview::build(store.snapshot());
    assert_eq!(overview.total_expenses, dec!(500.00));
    assert_eq!(store.case("1").map(|case| case.expenses.len()), Some(1));

    let report = ReportSummary::build(store.snapshot(), ReportPeriod::CurrentMonth, store.now());
    assert_eq!(report.financial.billable_expenses, dec!(150.00));
    assert_eq!(report.top_expenses[0].amount, dec!(350.00));
}

#[test]
fn active_filter_with_unmatched_search_is_empty() {
    let store = seeded();
    let matched = CaseFilter::new()
        .search("arson")
        .status(Some(CaseStatus::Active))
        .apply(store.cases());
    assert!(matched.is_empty());
}

#[test]
fn filters_are_idempotent() {
    let store = seeded();
    let filter = CaseFilter::new().search("fraud");
    let once = filter.apply(store.cases());
    assert_eq!(filter.apply(once.iter().copied()), once);

    let search = AccountSearch::new("law");
    let once = search.apply(store.accounts());
    assert_eq!(search.apply(once.iter().copied()), once);
    assert_eq!(once.len(), 1);
}

#[test]
fn unknown_period_label_falls_back_to_current_month() {
    let store = seeded();
    let fallback = ReportSummary::build(
        store.snapshot(),
        ReportPeriod::from_label_or_default("fiscal-year"),
        store.now(),
    );
    let current = ReportSummary::build(store.snapshot(), ReportPeriod::CurrentMonth, store.now());
    assert_eq!(fallback, current);
}

#[test]
fn bootstrap_reads_fixture_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    write!(
        file,
        r#"
[[accounts]]
id = "7"
name = "Harbor Logistics"
type = "Corporate"
retainer = "8000"
remaining_retainer = "900"
created_at = "2024-03-01T00:00:00Z"
status = "Inactive"
"#
    )
    .expect("write fixtures");

    let store = DomainStore::bootstrap(
        &StoreConfig {
            seed: true,
            fixtures_path: Some(file.path().to_path_buf()),
        },
        Arc::new(FixedClock(now())),
    )
    .expect("fixture file loads");

    assert_eq!(store.accounts().len(), 1);
    assert!(store.cases().is_empty());
    let account = store.account("7").expect("fixture account");
    assert_eq!(
        RetainerHealth::classify(account.remaining_retainer),
        RetainerHealth::Critical
    );
}
