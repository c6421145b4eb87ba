//! The ledger core: pure functions over a transaction snapshot.
//!
//! Nothing in this module performs I/O or holds state. The server and any
//! offline client call the same functions against their own in-memory
//! transaction lists:
//!
//! - [`validate_participant`] gates writes against an event roster.
//! - [`aggregate`] turns a snapshot into a [`KpiSummary`].
//! - [`paginate`] cuts a snapshot into [`TransactionPage`]s by calendar date.

pub mod aggregator;
pub mod pagination;
pub mod validator;

pub use aggregator::{KpiSummary, ParticipantAmounts, aggregate};
pub use pagination::{
    DEFAULT_NUMBER_OF_DATES, DateWindow, MAX_NUMBER_OF_DATES, TransactionPage, WindowError,
    paginate,
};
pub use validator::{ParticipantRejected, validate_participant};
