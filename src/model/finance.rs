use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Paid => "Paid",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Draft" => Some(Self::Draft),
            "Sent" => Some(Self::Sent),
            "Paid" => Some(Self::Paid),
            _ => None,
        }
    }
}

/// A cost incurred by the firm, optionally tied to a case.
///
/// The same shape is used for the firm-wide ledger and for the copies a case
/// keeps in its own `expenses` collection. The two are not kept in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub billable: bool,
}

#[derive(Debug, Clone)]
pub struct CreateExpenseParams {
    pub case_id: Option<String>,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
    pub date: DateTime<Utc>,
    pub receipt: Option<String>,
    pub billable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub account_id: String,
    pub case_id: String,
    pub number: String,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<InvoiceLineItem>,
}

impl Invoice {
    /// Issued to the client and not yet paid.
    pub fn is_pending(&self) -> bool {
        self.status == InvoiceStatus::Sent
    }
}
