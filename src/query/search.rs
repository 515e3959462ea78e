use std::collections::BTreeSet;

use crate::model::{Account, Case, CaseStatus};

/// Shown wherever a referenced account cannot be found.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Case-insensitive substring search over account name and type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSearch {
    needle: String,
}

impl AccountSearch {
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }

    pub fn matches(&self, account: &Account) -> bool {
        self.needle.is_empty()
            || account.name.to_lowercase().contains(&self.needle)
            || account
                .account_type
                .as_str()
                .to_lowercase()
                .contains(&self.needle)
    }

    pub fn apply<'a, I>(&self, accounts: I) -> Vec<&'a Account>
    where
        I: IntoIterator<Item = &'a Account>,
    {
        accounts
            .into_iter()
            .filter(|account| self.matches(account))
            .collect()
    }
}

/// Search plus optional equality filters for the case list. All conditions
/// must hold; an unset filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFilter {
    needle: String,
    status: Option<CaseStatus>,
    case_type: Option<String>,
}

impl CaseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: &str) -> Self {
        self.needle = term.to_lowercase();
        self
    }

    pub fn status(mut self, status: Option<CaseStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn case_type(mut self, case_type: Option<String>) -> Self {
        self.case_type = case_type.filter(|t| !t.is_empty());
        self
    }

    pub fn matches(&self, case: &Case) -> bool {
        let matches_search = self.needle.is_empty()
            || case.title.to_lowercase().contains(&self.needle)
            || case.description.to_lowercase().contains(&self.needle);
        let matches_status = self.status.is_none_or(|status| case.status == status);
        let matches_type = self
            .case_type
            .as_deref()
            .is_none_or(|case_type| case.case_type == case_type);

        matches_search && matches_status && matches_type
    }

    pub fn apply<'a, I>(&self, cases: I) -> Vec<&'a Case>
    where
        I: IntoIterator<Item = &'a Case>,
    {
        cases.into_iter().filter(|case| self.matches(case)).collect()
    }
}

/// Name of the account with `id`, or [`UNKNOWN_LABEL`] for a dangling id.
pub fn account_name<'a>(accounts: &'a [Account], id: &str) -> &'a str {
    accounts
        .iter()
        .find(|account| account.id == id)
        .map(|account| account.name.as_str())
        .unwrap_or(UNKNOWN_LABEL)
}

/// Distinct case types, sorted, for populating a type filter.
pub fn case_types(cases: &[Case]) -> Vec<&str> {
    cases
        .iter()
        .map(|case| case.case_type.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
