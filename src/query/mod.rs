//! Read-only views over store data: search, filters, reporting windows and
//! short feeds. Nothing here mutates or copies records.

mod feed;
mod period;
mod search;

pub use feed::{UpcomingTask, activity_feed, recent_cases, top_expenses, upcoming_tasks};
pub use period::{DateRange, ReportPeriod, ReportWindow, end_of_month, start_of_month};
pub use search::{AccountSearch, CaseFilter, UNKNOWN_LABEL, account_name, case_types};
