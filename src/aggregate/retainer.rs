use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::safe_ratio;
use crate::model::Account;

/// Classification of the remaining retainer balance in currency terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RetainerHealth {
    Good,
    Low,
    Critical,
}

impl RetainerHealth {
    /// Balances above this are `Good`.
    pub const GOOD_ABOVE: Decimal = dec!(5000);
    /// Balances above this (and not `Good`) are `Low`.
    pub const LOW_ABOVE: Decimal = dec!(1000);

    pub fn classify(remaining: Decimal) -> Self {
        if remaining > Self::GOOD_ABOVE {
            Self::Good
        } else if remaining > Self::LOW_ABOVE {
            Self::Low
        } else {
            Self::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Low => "Low",
            Self::Critical => "Critical",
        }
    }
}

/// Classification of the fraction of the retainer still available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RetainerGauge {
    Healthy,
    Draining,
    Depleted,
}

impl RetainerGauge {
    pub fn classify(ratio: Decimal) -> Self {
        if ratio > dec!(0.5) {
            Self::Healthy
        } else if ratio > dec!(0.2) {
            Self::Draining
        } else {
            Self::Depleted
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Draining => "Draining",
            Self::Depleted => "Depleted",
        }
    }
}

/// Fraction of the retainer still available, in `[0, 1]`. Zero when the
/// account has no retainer.
pub fn retainer_usage_ratio(account: &Account) -> Decimal {
    safe_ratio(account.remaining_retainer, account.retainer).clamp(Decimal::ZERO, Decimal::ONE)
}

/// Everything the UI shows about one account's retainer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetainerStatus {
    pub retainer: Decimal,
    pub remaining: Decimal,
    pub usage_ratio: Decimal,
    pub usage_percent: i64,
    pub health: RetainerHealth,
    pub gauge: RetainerGauge,
}

impl RetainerStatus {
    pub fn of(account: &Account) -> Self {
        let usage_ratio = retainer_usage_ratio(account);
        Self {
            retainer: account.retainer,
            remaining: account.remaining_retainer,
            usage_ratio,
            usage_percent: super::percent(usage_ratio),
            health: RetainerHealth::classify(account.remaining_retainer),
            gauge: RetainerGauge::classify(usage_ratio),
        }
    }
}

pub fn total_retainer<'a, I>(accounts: I) -> Decimal
where
    I: IntoIterator<Item = &'a Account>,
{
    accounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, account| acc.saturating_add(account.retainer))
}

pub fn remaining_retainer_total<'a, I>(accounts: I) -> Decimal
where
    I: IntoIterator<Item = &'a Account>,
{
    accounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, account| acc.saturating_add(account.remaining_retainer))
}
