//! Persistence layer: the transaction store contract and its backends.
//!
//! [`LedgerStore`] is the only seam between the service and storage. The
//! ledger engines never see it: the service asks the store for a complete
//! snapshot of an event's transactions and hands that to the engines.
//!
//! Two backends are provided:
//!
//! - [`MemoryStore`]: `tokio::sync::RwLock` maps, used for tests and when
//!   persistence is disabled.
//! - [`PostgresStore`]: `sqlx::PgPool` with an `ON DELETE CASCADE` schema.

pub mod memory;
pub mod models;
pub mod postgres;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{Event, EventId, Participant, ParticipantId, Transaction, TransactionId};
use crate::error::LedgerError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Storage of events and their transactions.
///
/// Write operations on the same event must be serialized by the backend.
/// Roster checks run inside the same lock or database transaction as the
/// write they guard, so a roster change and a transaction write on the same
/// event can never interleave. Reads return owned snapshots; nothing is
/// cached between calls.
#[async_trait]
pub trait LedgerStore: std::fmt::Debug + Send + Sync {
    /// Stores a new event.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PersistenceError`] on storage failure.
    async fn insert_event(&self, event: Event) -> Result<Event, LedgerError>;

    /// Fetches an event by id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PersistenceError`] on storage failure.
    async fn get_event(&self, id: EventId) -> Result<Option<Event>, LedgerError>;

    /// Lists all events, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PersistenceError`] on storage failure.
    async fn list_events(&self) -> Result<Vec<Event>, LedgerError>;

    /// Replaces an existing event's title and roster.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EventNotFound`] if the event does not exist,
    /// [`LedgerError::ParticipantInUse`] if the new roster drops a
    /// participant that transactions still reference, or
    /// [`LedgerError::PersistenceError`] on storage failure.
    async fn update_event(&self, event: Event) -> Result<Event, LedgerError>;

    /// Deletes an event and every transaction it owns.
    ///
    /// Returns `false` if the event did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PersistenceError`] on storage failure.
    async fn delete_event(&self, id: EventId) -> Result<bool, LedgerError>;

    /// Returns every transaction of an event, unfiltered and unordered.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PersistenceError`] on storage failure.
    async fn event_transactions(&self, event_id: EventId) -> Result<Vec<Transaction>, LedgerError>;

    /// Fetches a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PersistenceError`] on storage failure.
    async fn get_transaction(&self, id: TransactionId)
    -> Result<Option<Transaction>, LedgerError>;

    /// Stores a new transaction.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EventNotFound`] if the owning event no longer
    /// exists, [`LedgerError::InvalidParticipant`] if the participant is not
    /// on the event's current roster, or [`LedgerError::PersistenceError`]
    /// on storage failure.
    async fn insert_transaction(&self, transaction: Transaction)
    -> Result<Transaction, LedgerError>;

    /// Replaces an existing transaction.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotFound`] if it does not exist,
    /// [`LedgerError::EventNotFound`] if its event is gone,
    /// [`LedgerError::InvalidParticipant`] if the participant is not on the
    /// event's current roster, or [`LedgerError::PersistenceError`] on
    /// storage failure.
    async fn update_transaction(&self, transaction: Transaction)
    -> Result<Transaction, LedgerError>;

    /// Deletes a transaction. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PersistenceError`] on storage failure.
    async fn delete_transaction(&self, id: TransactionId) -> Result<bool, LedgerError>;
}

/// Fails if a participant with transactions is missing from `roster`.
///
/// `referenced` maps participant ids to their transaction counts. The pot
/// is never on a roster and is skipped.
pub(crate) fn ensure_roster_keeps_referenced(
    roster: &[Participant],
    referenced: &BTreeMap<ParticipantId, usize>,
) -> Result<(), LedgerError> {
    for (id, &transactions) in referenced {
        if transactions > 0 && !id.is_pot() && !roster.iter().any(|p| &p.id == id) {
            return Err(LedgerError::ParticipantInUse {
                participant_id: id.to_string(),
                transactions,
            });
        }
    }
    Ok(())
}
