//! Record types for every entity the store holds.
//!
//! Each entity has a stored record, a `Create*Params` type carrying the
//! caller-supplied fields, and (where the store supports it) an
//! `Update*Params` shallow patch.

mod account;
mod case;
mod finance;

pub use account::{
    Account, AccountStatus, AccountType, Contact, CreateAccountParams, UpdateAccountParams,
};
pub use case::{
    Case, CaseStatus, CaseUpdate, Coordinates, CreateCaseParams, Event, Location, Priority,
    Subject, Task, TaskStatus, UpdateCaseParams, Vehicle,
};
pub use finance::{CreateExpenseParams, Expense, Invoice, InvoiceLineItem, InvoiceStatus};
