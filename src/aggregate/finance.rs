use rust_decimal::Decimal;
use serde::Serialize;

use super::{floored_ratio, percent};
use crate::model::{Case, Expense, Invoice};

pub fn expense_total<'a, I>(expenses: I) -> Decimal
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses
        .into_iter()
        .fold(Decimal::ZERO, |acc, expense| acc.saturating_add(expense.amount))
}

/// Sum of expenses chargeable to the client.
pub fn billable_expense_total<'a, I>(expenses: I) -> Decimal
where
    I: IntoIterator<Item = &'a Expense>,
{
    expense_total(expenses.into_iter().filter(|expense| expense.billable))
}

/// Revenue: the face value of every invoice, whatever its status.
pub fn invoice_total<'a, I>(invoices: I) -> Decimal
where
    I: IntoIterator<Item = &'a Invoice>,
{
    invoices
        .into_iter()
        .fold(Decimal::ZERO, |acc, invoice| acc.saturating_add(invoice.amount))
}

pub fn pending_invoice_count<'a, I>(invoices: I) -> usize
where
    I: IntoIterator<Item = &'a Invoice>,
{
    invoices
        .into_iter()
        .filter(|invoice| invoice.is_pending())
        .count()
}

/// Total of the expenses a case records in its own collection.
pub fn case_expense_total(case: &Case) -> Decimal {
    expense_total(&case.expenses)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinancialTotals {
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub net_profit: Decimal,
    /// `net / max(revenue, 1)`.
    pub margin: Decimal,
    pub margin_percent: i64,
    pub billable_expenses: Decimal,
}

impl FinancialTotals {
    pub fn compute<'a, E, I>(expenses: E, invoices: I) -> Self
    where
        E: IntoIterator<Item = &'a Expense>,
        I: IntoIterator<Item = &'a Invoice>,
    {
        let expenses: Vec<&Expense> = expenses.into_iter().collect();
        let revenue = invoice_total(invoices);
        let spent = expense_total(expenses.iter().copied());
        let net_profit = revenue.saturating_sub(spent);
        let margin = floored_ratio(net_profit, revenue);

        Self {
            revenue,
            expenses: spent,
            net_profit,
            margin,
            margin_percent: percent(margin),
            billable_expenses: billable_expense_total(expenses.iter().copied()),
        }
    }
}
