use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::FixtureError;
use crate::model::{Account, Case, Expense, Invoice};

/// Full contents for seeding a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub cases: Vec<Case>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

static BUNDLED: LazyLock<Result<Fixtures, String>> =
    LazyLock::new(|| parse_fixtures(include_str!("fixtures.toml")));

fn parse_fixtures(raw: &str) -> Result<Fixtures, String> {
    toml::from_str(raw).map_err(|e| format!("invalid fixture TOML: {}", e))
}

impl Fixtures {
    /// The seed data shipped with the crate.
    pub fn bundled() -> Result<Self, FixtureError> {
        match &*BUNDLED {
            Ok(fixtures) => Ok(fixtures.clone()),
            Err(err) => Err(FixtureError::Parse(err.clone())),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, FixtureError> {
        parse_fixtures(raw).map_err(FixtureError::Parse)
    }

    /// Read fixtures from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path).map_err(|e| FixtureError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&raw)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_decimal_macros::dec;

    use super::Fixtures;
    use crate::error::FixtureError;
    use crate::model::{CaseStatus, InvoiceStatus, TaskStatus};

    #[test]
    fn bundled_fixtures_parse() {
        let fixtures = Fixtures::bundled().expect("bundled fixtures should parse");
        assert_eq!(fixtures.accounts.len(), 2);
        assert_eq!(fixtures.cases.len(), 1);
        assert_eq!(fixtures.expenses.len(), 1);
        assert_eq!(fixtures.invoices.len(), 1);

        let meridian = &fixtures.accounts[0];
        assert_eq!(meridian.retainer, dec!(25000));
        assert_eq!(meridian.remaining_retainer, dec!(18500));
        assert_eq!(meridian.contacts.len(), 1);

        let case = &fixtures.cases[0];
        assert_eq!(case.status, CaseStatus::Active);
        assert_eq!(case.tasks[0].status, TaskStatus::InProgress);
        assert_eq!(case.subjects[0].aliases, vec!["Bob Chen", "R. Chen"]);
        assert!(case.locations[0].coordinates.is_some());
        assert_eq!(case.expenses[0].amount, dec!(150.00));
        assert!(!case.expenses[0].billable);

        assert!(fixtures.expenses[0].billable);
        assert_eq!(fixtures.expenses[0].case_id.as_deref(), Some("1"));
        assert_eq!(fixtures.invoices[0].status, InvoiceStatus::Sent);
        assert_eq!(fixtures.invoices[0].items[0].quantity, dec!(20));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let fixtures = Fixtures::parse(
            r#"
[[accounts]]
id = "7"
name = "Solo Client"
type = "Individual"
retainer = "0"
remaining_retainer = "0"
created_at = "2024-05-01T00:00:00Z"
status = "Inactive"
"#,
        )
        .expect("partial fixtures");

        assert_eq!(fixtures.accounts.len(), 1);
        assert!(fixtures.accounts[0].contacts.is_empty());
        assert!(fixtures.cases.is_empty());
        assert!(fixtures.invoices.is_empty());
    }

    #[test]
    fn unknown_enum_label_is_a_parse_error() {
        let err = Fixtures::parse(
            r#"
[[invoices]]
id = "1"
account_id = "1"
case_id = "1"
number = "INV-1"
amount = "10"
status = "Overdue"
due_date = "2024-04-01T00:00:00Z"
created_at = "2024-03-01T00:00:00Z"
"#,
        )
        .expect_err("unknown status must be rejected");
        assert!(matches!(err, FixtureError::Parse(_)));
    }

    #[test]
    fn load_reads_fixture_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"[[expenses]]
id = "e1"
category = "Equipment"
amount = "89.99"
description = "GPS tracker"
date = "2024-03-10T00:00:00Z"
billable = true"#
        )
        .expect("write fixtures");

        let fixtures = Fixtures::load(file.path()).expect("load fixtures");
        assert_eq!(fixtures.expenses.len(), 1);
        assert_eq!(fixtures.expenses[0].amount, dec!(89.99));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Fixtures::load(&dir.path().join("absent.toml")).expect_err("missing file");
        assert!(matches!(err, FixtureError::Read { .. }));
    }
}
