//! Derived statistics over store data.
//!
//! All ratios go through [`safe_ratio`] or [`floored_ratio`], so no figure in
//! this module can divide by zero. Sums and differences saturate at the
//! `Decimal` bounds instead of overflowing.

mod finance;
mod retainer;
mod summary;
mod tasks;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub use finance::{
    FinancialTotals, billable_expense_total, case_expense_total, expense_total, invoice_total,
    pending_invoice_count,
};
pub use retainer::{
    RetainerGauge, RetainerHealth, RetainerStatus, remaining_retainer_total,
    retainer_usage_ratio, total_retainer,
};
pub use summary::{
    AccountActivity, AccountRow, CaseDetail, CasePerformance, CaseRow, DashboardSummary,
    FinancialOverview, InvoiceRow, RetainerRow, ReportSummary, SectionCounts,
};
pub use tasks::{case_completion_ratio, overdue_task_count, task_completion_ratio};

/// `num / den`, or zero when `den` is not positive.
pub fn safe_ratio(num: Decimal, den: Decimal) -> Decimal {
    if den <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    num.checked_div(den).unwrap_or(Decimal::ZERO)
}

/// `num / max(den, 1)`. Used where an empty denominator should leave the
/// numerator as is rather than zero the result.
pub fn floored_ratio(num: Decimal, den: Decimal) -> Decimal {
    num.checked_div(den.max(Decimal::ONE))
        .unwrap_or(Decimal::ZERO)
}

/// Whole percent of a ratio, halves rounded up (0.125 -> 13, -0.125 -> -12).
/// Ratios too large for an `i64` percentage saturate.
pub fn percent(ratio: Decimal) -> i64 {
    let half = Decimal::new(5, 1);
    let scaled = ratio
        .saturating_mul(Decimal::ONE_HUNDRED)
        .saturating_add(half)
        .floor();
    scaled.to_i64().unwrap_or(if scaled.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn count(n: usize) -> Decimal {
    Decimal::from(n)
}
