//! Service layer: business logic orchestration.
//!
//! [`LedgerService`] resolves events, runs write-side checks, and feeds
//! store snapshots to the pure engines in [`crate::ledger`].

pub mod ledger_service;

pub use ledger_service::LedgerService;
