//! # pot-ledger
//!
//! REST service for shared-expense events. Each event has a participant
//! roster and a common pot (participant id `"0"`). Participants contribute
//! to the pot, pay expenses out of pocket or from the pot, and receive
//! compensations from it.
//!
//! The service answers two read questions over an event's transactions:
//! a KPI summary (totals, pot balance, pending compensation, and
//! per-participant breakdowns) and a date-bucketed page that always holds
//! whole calendar days, newest first.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── LedgerService (service/)
//!     │
//!     ├── Ledger engines (ledger/): aggregate, paginate, validate
//!     │
//!     └── LedgerStore (persistence/): in-memory or PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod persistence;
pub mod service;
