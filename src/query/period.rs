use chrono::{DateTime, Datelike, Duration, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Case, Expense, Invoice};
use crate::store::Snapshot;

/// Named reporting window, resolved against "now".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportPeriod {
    #[default]
    #[serde(rename = "current-month")]
    CurrentMonth,
    #[serde(rename = "last-month")]
    LastMonth,
    #[serde(rename = "last-3-months")]
    LastThreeMonths,
}

impl ReportPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CurrentMonth => "current-month",
            Self::LastMonth => "last-month",
            Self::LastThreeMonths => "last-3-months",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "current-month" => Some(Self::CurrentMonth),
            "last-month" => Some(Self::LastMonth),
            "last-3-months" => Some(Self::LastThreeMonths),
            _ => None,
        }
    }

    /// Like [`Self::from_label`], but unknown labels mean the current month.
    pub fn from_label_or_default(value: &str) -> Self {
        Self::from_label(value).unwrap_or_default()
    }

    pub fn range(self, now: DateTime<Utc>) -> DateRange {
        match self {
            Self::CurrentMonth => DateRange::new(start_of_month(now), end_of_month(now)),
            Self::LastMonth => {
                let last_month = sub_months(now, 1);
                DateRange::new(start_of_month(last_month), end_of_month(last_month))
            }
            Self::LastThreeMonths => DateRange::new(sub_months(now, 3), now),
        }
    }
}

/// Inclusive interval of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Midnight UTC on the first day of `at`'s month.
pub fn start_of_month(at: DateTime<Utc>) -> DateTime<Utc> {
    let date = at.date_naive();
    date.with_day(1)
        .unwrap_or(date)
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Last millisecond of `at`'s month.
pub fn end_of_month(at: DateTime<Utc>) -> DateTime<Utc> {
    let start = start_of_month(at);
    start
        .checked_add_months(Months::new(1))
        .map(|next| next - Duration::milliseconds(1))
        .unwrap_or(at)
}

/// Step back `months` calendar months, clamping the day to the target month.
fn sub_months(at: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    at.checked_sub_months(Months::new(months)).unwrap_or(at)
}

/// The records whose relevant date falls inside a range: cases by creation,
/// expenses by date incurred, invoices by creation.
#[derive(Debug, Clone, Serialize)]
pub struct ReportWindow<'a> {
    pub range: DateRange,
    pub cases: Vec<&'a Case>,
    pub expenses: Vec<&'a Expense>,
    pub invoices: Vec<&'a Invoice>,
}

impl<'a> ReportWindow<'a> {
    pub fn collect(snapshot: Snapshot<'a>, range: DateRange) -> Self {
        Self {
            range,
            cases: snapshot
                .cases
                .iter()
                .filter(|case| range.contains(case.created_at))
                .collect(),
            expenses: snapshot
                .expenses
                .iter()
                .filter(|expense| range.contains(expense.date))
                .collect(),
            invoices: snapshot
                .invoices
                .iter()
                .filter(|invoice| range.contains(invoice.created_at))
                .collect(),
        }
    }
}
