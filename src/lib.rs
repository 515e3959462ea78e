//! Case management core for a private investigation firm: an in-memory store
//! of client accounts, cases, expenses and invoices, with the filters and
//! figures the dashboard pages are built from.

pub mod aggregate;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod settings;
pub mod store;

pub use error::{Error, Result};
pub use store::{DomainStore, Fixtures, Snapshot};
