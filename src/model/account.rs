use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of client an account represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Corporate,
    Legal,
    Individual,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Corporate => "Corporate",
            Self::Legal => "Legal",
            Self::Individual => "Individual",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Corporate" => Some(Self::Corporate),
            "Legal" => Some(Self::Legal),
            "Individual" => Some(Self::Individual),
            _ => None,
        }
    }
}

/// Account lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(Self::Active),
            "Inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub preferred: bool,
}

/// A client of the firm holding a retainer balance.
///
/// `remaining_retainer` is expected to stay within `0..=retainer`, but the
/// store does not enforce it. Readers that need a bounded value go through
/// [`crate::aggregate::retainer_usage_ratio`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub retainer: Decimal,
    pub remaining_retainer: Decimal,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub service_history: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub status: AccountStatus,
}

impl Account {
    /// First listed contact, shown as the primary point of contact.
    pub fn primary_contact(&self) -> Option<&Contact> {
        self.contacts.first()
    }
}

/// Fields supplied when opening an account. Id, creation time, contacts and
/// service history are assigned by the store.
#[derive(Debug, Clone)]
pub struct CreateAccountParams {
    pub name: String,
    pub account_type: AccountType,
    pub retainer: Decimal,
    pub remaining_retainer: Decimal,
    pub status: AccountStatus,
}

/// Shallow patch for an account. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountParams {
    pub name: Option<String>,
    pub account_type: Option<AccountType>,
    pub retainer: Option<Decimal>,
    pub remaining_retainer: Option<Decimal>,
    pub contacts: Option<Vec<Contact>>,
    pub service_history: Option<Vec<String>>,
    pub status: Option<AccountStatus>,
}

impl UpdateAccountParams {
    pub fn apply(self, account: &mut Account) {
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(account_type) = self.account_type {
            account.account_type = account_type;
        }
        if let Some(retainer) = self.retainer {
            account.retainer = retainer;
        }
        if let Some(remaining) = self.remaining_retainer {
            account.remaining_retainer = remaining;
        }
        if let Some(contacts) = self.contacts {
            account.contacts = contacts;
        }
        if let Some(service_history) = self.service_history {
            account.service_history = service_history;
        }
        if let Some(status) = self.status {
            account.status = status;
        }
    }
}
