//! In-memory domain store.
//!
//! The store owns the four top-level collections and is the only sanctioned
//! way to mutate them. Reads hand out borrowed slices; derived views live in
//! [`crate::query`] and [`crate::aggregate`].
//!
//! Nothing here fails. Updates addressed to an unknown id are dropped, and no
//! referential checks are made between cases, accounts, and invoices.

mod fixtures;

pub use fixtures::Fixtures;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::config::StoreConfig;
use crate::error::FixtureError;
use crate::model::{
    Account, Case, CreateAccountParams, CreateCaseParams, CreateExpenseParams, Expense, Invoice,
    UpdateAccountParams, UpdateCaseParams,
};

/// Borrowed view of every collection at one instant.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub accounts: &'a [Account],
    pub cases: &'a [Case],
    pub expenses: &'a [Expense],
    pub invoices: &'a [Invoice],
}

/// Issues ids from the clock's millisecond timestamp, bumped past the last
/// issued value so ids from one store never repeat.
#[derive(Debug, Default)]
struct IdSequence {
    last: i64,
}

impl IdSequence {
    fn next(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().max(self.last + 1);
        self.last = millis;
        millis.to_string()
    }
}

pub struct DomainStore {
    accounts: Vec<Account>,
    cases: Vec<Case>,
    expenses: Vec<Expense>,
    invoices: Vec<Invoice>,
    clock: Arc<dyn Clock>,
    ids: IdSequence,
    revision: u64,
}

impl fmt::Debug for DomainStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainStore")
            .field("accounts", &self.accounts.len())
            .field("cases", &self.cases.len())
            .field("expenses", &self.expenses.len())
            .field("invoices", &self.invoices.len())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl DomainStore {
    /// An empty store.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts: Vec::new(),
            cases: Vec::new(),
            expenses: Vec::new(),
            invoices: Vec::new(),
            clock,
            ids: IdSequence::default(),
            revision: 0,
        }
    }

    /// A store seeded with the given fixtures.
    pub fn from_fixtures(fixtures: Fixtures, clock: Arc<dyn Clock>) -> Self {
        tracing::info!(
            accounts = fixtures.accounts.len(),
            cases = fixtures.cases.len(),
            expenses = fixtures.expenses.len(),
            invoices = fixtures.invoices.len(),
            "Seeded store from fixtures"
        );
        Self {
            accounts: fixtures.accounts,
            cases: fixtures.cases,
            expenses: fixtures.expenses,
            invoices: fixtures.invoices,
            clock,
            ids: IdSequence::default(),
            revision: 0,
        }
    }

    /// Build a store the way the configuration asks for: empty, seeded from
    /// the bundled fixtures, or seeded from a fixture file.
    pub fn bootstrap(config: &StoreConfig, clock: Arc<dyn Clock>) -> Result<Self, FixtureError> {
        if !config.seed {
            tracing::info!("Starting with an empty store");
            return Ok(Self::new(clock));
        }

        let fixtures = match config.fixtures_path.as_deref() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading fixtures from file");
                Fixtures::load(path)?
            }
            None => Fixtures::bundled()?,
        };
        Ok(Self::from_fixtures(fixtures, clock))
    }

    // ==================== Reads ====================

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn case(&self, id: &str) -> Option<&Case> {
        self.cases.iter().find(|case| case.id == id)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            accounts: &self.accounts,
            cases: &self.cases,
            expenses: &self.expenses,
            invoices: &self.invoices,
        }
    }

    /// Count of applied mutations. Changes whenever a read could observe a
    /// different state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ==================== Accounts ====================

    pub fn add_account(&mut self, input: CreateAccountParams) -> Account {
        let now = self.clock.now();
        let account = Account {
            id: self.ids.next(now),
            name: input.name,
            account_type: input.account_type,
            retainer: input.retainer,
            remaining_retainer: input.remaining_retainer,
            contacts: Vec::new(),
            service_history: Vec::new(),
            created_at: now,
            status: input.status,
        };
        tracing::debug!(account_id = %account.id, name = %account.name, "Account added");
        self.accounts.push(account.clone());
        self.revision += 1;
        account
    }

    /// Shallow-merge `input` into the account with `id`. Returns the updated
    /// record, or `None` (and changes nothing) when no account has that id.
    pub fn update_account(&mut self, id: &str, input: UpdateAccountParams) -> Option<Account> {
        let Some(account) = self.accounts.iter_mut().find(|account| account.id == id) else {
            tracing::debug!(account_id = %id, "Ignoring update for unknown account");
            return None;
        };
        input.apply(account);
        let updated = account.clone();
        self.revision += 1;
        tracing::debug!(account_id = %id, "Account updated");
        Some(updated)
    }

    pub fn set_accounts(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
        self.revision += 1;
    }

    // ==================== Cases ====================

    pub fn add_case(&mut self, input: CreateCaseParams) -> Case {
        let now = self.clock.now();
        let case = Case {
            id: self.ids.next(now),
            title: input.title,
            account_id: input.account_id,
            contact_id: input.contact_id,
            status: input.status,
            priority: input.priority,
            case_type: input.case_type,
            created_at: now,
            due_date: input.due_date,
            assigned_to: input.assigned_to,
            description: input.description,
            subjects: Vec::new(),
            vehicles: Vec::new(),
            locations: Vec::new(),
            tasks: Vec::new(),
            events: Vec::new(),
            updates: Vec::new(),
            expenses: Vec::new(),
        };
        tracing::debug!(case_id = %case.id, account_id = %case.account_id, "Case opened");
        self.cases.push(case.clone());
        self.revision += 1;
        case
    }

    /// Shallow-merge `input` into the case with `id`. Nested collections in
    /// the patch replace the stored ones. No-op on an unknown id.
    pub fn update_case(&mut self, id: &str, input: UpdateCaseParams) -> Option<Case> {
        let Some(case) = self.cases.iter_mut().find(|case| case.id == id) else {
            tracing::debug!(case_id = %id, "Ignoring update for unknown case");
            return None;
        };
        input.apply(case);
        let updated = case.clone();
        self.revision += 1;
        tracing::debug!(case_id = %id, "Case updated");
        Some(updated)
    }

    pub fn set_cases(&mut self, cases: Vec<Case>) {
        self.cases = cases;
        self.revision += 1;
    }

    // ==================== Expenses & invoices ====================

    /// Record an expense in the firm-wide ledger. A case's own `expenses`
    /// collection is left as is, even when `case_id` points at it.
    pub fn add_expense(&mut self, input: CreateExpenseParams) -> Expense {
        let now = self.clock.now();
        let expense = Expense {
            id: self.ids.next(now),
            case_id: input.case_id,
            category: input.category,
            amount: input.amount,
            description: input.description,
            date: input.date,
            receipt: input.receipt,
            billable: input.billable,
        };
        tracing::debug!(
            expense_id = %expense.id,
            case_id = ?expense.case_id,
            amount = %expense.amount,
            "Expense recorded"
        );
        self.expenses.push(expense.clone());
        self.revision += 1;
        expense
    }

    pub fn set_expenses(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
        self.revision += 1;
    }

    pub fn set_invoices(&mut self, invoices: Vec<Invoice>) {
        self.invoices = invoices;
        self.revision += 1;
    }
}
