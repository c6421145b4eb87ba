//! Domain layer: identifiers, money, events, and transactions.
//!
//! These types carry no behaviour beyond construction and shape checks.
//! The arithmetic over them lives in [`crate::ledger`].

pub mod event;
pub mod ids;
pub mod money;
pub mod payment_type;
pub mod transaction;

use chrono::{DateTime, SubsecRound, Utc};

pub use event::{Event, EventInput, Participant, ParticipantDraft};
pub use ids::{EventId, POT_ID, ParticipantId, TransactionId};
pub use money::{Money, MoneyError};
pub use payment_type::PaymentType;
pub use transaction::{Transaction, TransactionInput};

/// Current time truncated to whole microseconds.
///
/// PostgreSQL `TIMESTAMPTZ` keeps microseconds, so every backend returns
/// the same instant that was written.
#[must_use]
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
