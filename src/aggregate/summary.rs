//! Composed, serializable views for each page of the dashboard.
//!
//! Summaries borrow from a [`Snapshot`]; build one, render it, drop it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::finance::{
    FinancialTotals, case_expense_total, expense_total, invoice_total, pending_invoice_count,
};
use super::retainer::{RetainerStatus, remaining_retainer_total, total_retainer};
use super::tasks::{case_completion_ratio, overdue_task_count};
use super::{count, floored_ratio, percent};
use crate::model::{
    Account, AccountStatus, AccountType, Case, CaseStatus, CaseUpdate, Expense, Invoice,
    InvoiceStatus, Priority,
};
use crate::query::{
    DateRange, ReportPeriod, ReportWindow, UpcomingTask, account_name, activity_feed,
    recent_cases, top_expenses, upcoming_tasks,
};
use crate::store::Snapshot;

const RECENT_CASES: usize = 5;
const UPCOMING_TASKS: usize = 5;
const ACTIVITY_ITEMS: usize = 10;
const RECENT_LEDGER_ITEMS: usize = 5;
const TOP_EXPENSES: usize = 5;
const CASE_DETAIL_UPDATES: usize = 5;

/// One line of the case list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRow<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub account_name: &'a str,
    pub status: CaseStatus,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub case_type: &'a str,
    pub due_date: DateTime<Utc>,
    pub assigned_to: &'a str,
    pub tasks_completed: usize,
    pub tasks_total: usize,
    pub completion_percent: i64,
}

impl<'a> CaseRow<'a> {
    pub fn new(case: &'a Case, accounts: &'a [Account]) -> Self {
        Self {
            id: &case.id,
            title: &case.title,
            account_name: account_name(accounts, &case.account_id),
            status: case.status,
            priority: case.priority,
            case_type: &case.case_type,
            due_date: case.due_date,
            assigned_to: &case.assigned_to,
            tasks_completed: case.tasks.iter().filter(|task| task.is_completed()).count(),
            tasks_total: case.tasks.len(),
            completion_percent: percent(case_completion_ratio(case)),
        }
    }

    pub fn list<I>(cases: I, accounts: &'a [Account]) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a Case>,
    {
        cases
            .into_iter()
            .map(|case| Self::new(case, accounts))
            .collect()
    }
}

/// One card of the account list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub status: AccountStatus,
    pub primary_contact: Option<&'a str>,
    pub contacts: usize,
    pub service_history: &'a [String],
    pub retainer: RetainerStatus,
}

impl<'a> AccountRow<'a> {
    pub fn new(account: &'a Account) -> Self {
        Self {
            id: &account.id,
            name: &account.name,
            account_type: account.account_type,
            status: account.status,
            primary_contact: account
                .primary_contact()
                .map(|contact| contact.name.as_str()),
            contacts: account.contacts.len(),
            service_history: &account.service_history,
            retainer: RetainerStatus::of(account),
        }
    }

    pub fn list<I>(accounts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a Account>,
    {
        accounts.into_iter().map(Self::new).collect()
    }
}

/// Number of entries in each section of a case file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionCounts {
    pub subjects: usize,
    pub vehicles: usize,
    pub locations: usize,
    pub tasks: usize,
    pub events: usize,
    pub updates: usize,
    pub expenses: usize,
}

impl SectionCounts {
    pub fn of(case: &Case) -> Self {
        Self {
            subjects: case.subjects.len(),
            vehicles: case.vehicles.len(),
            locations: case.locations.len(),
            tasks: case.tasks.len(),
            events: case.events.len(),
            updates: case.updates.len(),
            expenses: case.expenses.len(),
        }
    }
}

/// The case page: the full record plus the figures shown beside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseDetail<'a> {
    pub case: &'a Case,
    pub account_name: &'a str,
    pub sections: SectionCounts,
    pub completion_percent: i64,
    pub overdue_tasks: usize,
    /// Total of the case's own expense collection.
    pub expense_total: Decimal,
    pub recent_updates: &'a [CaseUpdate],
}

impl<'a> CaseDetail<'a> {
    /// `None` when no case has `id`.
    pub fn build(snapshot: Snapshot<'a>, id: &str, now: DateTime<Utc>) -> Option<Self> {
        let case = snapshot.cases.iter().find(|case| case.id == id)?;
        let shown = case.updates.len().min(CASE_DETAIL_UPDATES);
        Some(Self {
            case,
            account_name: account_name(snapshot.accounts, &case.account_id),
            sections: SectionCounts::of(case),
            completion_percent: percent(case_completion_ratio(case)),
            overdue_tasks: overdue_task_count([case], now),
            expense_total: case_expense_total(case),
            recent_updates: &case.updates[..shown],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary<'a> {
    pub active_cases: usize,
    pub total_accounts: usize,
    pub revenue: Decimal,
    pub overdue_tasks: usize,
    pub recent_cases: Vec<CaseRow<'a>>,
    pub upcoming_tasks: Vec<UpcomingTask<'a>>,
    pub activity: Vec<&'a CaseUpdate>,
}

impl<'a> DashboardSummary<'a> {
    pub fn build(snapshot: Snapshot<'a>, now: DateTime<Utc>) -> Self {
        Self {
            active_cases: snapshot
                .cases
                .iter()
                .filter(|case| case.status == CaseStatus::Active)
                .count(),
            total_accounts: snapshot.accounts.len(),
            revenue: invoice_total(snapshot.invoices),
            overdue_tasks: overdue_task_count(snapshot.cases, now),
            recent_cases: CaseRow::list(
                recent_cases(snapshot.cases, RECENT_CASES),
                snapshot.accounts,
            ),
            upcoming_tasks: upcoming_tasks(snapshot.cases, UPCOMING_TASKS),
            activity: activity_feed(snapshot.cases, ACTIVITY_ITEMS),
        }
    }
}

/// Retainer card on the financials page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetainerRow<'a> {
    pub account_id: &'a str,
    pub account_name: &'a str,
    pub used: Decimal,
    #[serde(flatten)]
    pub status: RetainerStatus,
}

impl<'a> RetainerRow<'a> {
    pub fn new(account: &'a Account) -> Self {
        Self {
            account_id: &account.id,
            account_name: &account.name,
            used: account.retainer.saturating_sub(account.remaining_retainer),
            status: RetainerStatus::of(account),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRow<'a> {
    pub id: &'a str,
    pub number: &'a str,
    pub account_name: &'a str,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub due_date: DateTime<Utc>,
}

impl<'a> InvoiceRow<'a> {
    pub fn new(invoice: &'a Invoice, accounts: &'a [Account]) -> Self {
        Self {
            id: &invoice.id,
            number: &invoice.number,
            account_name: account_name(accounts, &invoice.account_id),
            amount: invoice.amount,
            status: invoice.status,
            due_date: invoice.due_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialOverview<'a> {
    pub total_expenses: Decimal,
    pub total_invoiced: Decimal,
    /// Sum of every account's remaining retainer.
    pub retainer_balance: Decimal,
    pub pending_invoices: usize,
    pub recent_expenses: Vec<&'a Expense>,
    pub recent_invoices: Vec<InvoiceRow<'a>>,
    pub retainers: Vec<RetainerRow<'a>>,
}

impl<'a> FinancialOverview<'a> {
    pub fn build(snapshot: Snapshot<'a>) -> Self {
        Self {
            total_expenses: expense_total(snapshot.expenses),
            total_invoiced: invoice_total(snapshot.invoices),
            retainer_balance: remaining_retainer_total(snapshot.accounts),
            pending_invoices: pending_invoice_count(snapshot.invoices),
            recent_expenses: snapshot.expenses.iter().take(RECENT_LEDGER_ITEMS).collect(),
            recent_invoices: snapshot
                .invoices
                .iter()
                .take(RECENT_LEDGER_ITEMS)
                .map(|invoice| InvoiceRow::new(invoice, snapshot.accounts))
                .collect(),
            retainers: snapshot.accounts.iter().map(RetainerRow::new).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CasePerformance {
    pub total: usize,
    pub active: usize,
    pub closed: usize,
    /// Closed cases as a whole percentage of all cases in the window.
    pub success_rate: i64,
}

impl CasePerformance {
    pub fn of(cases: &[&Case]) -> Self {
        let active = cases
            .iter()
            .filter(|case| case.status == CaseStatus::Active)
            .count();
        let closed = cases
            .iter()
            .filter(|case| case.status == CaseStatus::Closed)
            .count();
        Self {
            total: cases.len(),
            active,
            closed,
            success_rate: percent(floored_ratio(count(closed), count(cases.len()))),
        }
    }
}

/// Account figures for reports. Not limited to the report window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountActivity {
    pub total: usize,
    pub active: usize,
    pub total_retainers: Decimal,
    pub remaining_retainers: Decimal,
}

impl AccountActivity {
    pub fn of(accounts: &[Account]) -> Self {
        Self {
            total: accounts.len(),
            active: accounts
                .iter()
                .filter(|account| account.status == AccountStatus::Active)
                .count(),
            total_retainers: total_retainer(accounts),
            remaining_retainers: remaining_retainer_total(accounts),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary<'a> {
    pub period: ReportPeriod,
    pub range: DateRange,
    pub case_performance: CasePerformance,
    pub financial: FinancialTotals,
    pub account_activity: AccountActivity,
    pub recent_cases: Vec<CaseRow<'a>>,
    pub top_expenses: Vec<&'a Expense>,
}

impl<'a> ReportSummary<'a> {
    pub fn build(snapshot: Snapshot<'a>, period: ReportPeriod, now: DateTime<Utc>) -> Self {
        let window = ReportWindow::collect(snapshot, period.range(now));
        tracing::debug!(
            period = period.as_str(),
            cases = window.cases.len(),
            expenses = window.expenses.len(),
            invoices = window.invoices.len(),
            "Building report"
        );

        Self {
            period,
            range: window.range,
            case_performance: CasePerformance::of(&window.cases),
            financial: FinancialTotals::compute(
                window.expenses.iter().copied(),
                window.invoices.iter().copied(),
            ),
            account_activity: AccountActivity::of(snapshot.accounts),
            recent_cases: CaseRow::list(
                recent_cases(window.cases.iter().copied(), RECENT_CASES),
                snapshot.accounts,
            ),
            top_expenses: top_expenses(window.expenses.iter().copied(), TOP_EXPENSES),
        }
    }
}
