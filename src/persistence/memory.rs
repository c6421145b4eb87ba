//! In-memory store backed by `tokio::sync::RwLock` maps.
//!
//! Events and transactions live in separate maps; a transaction only knows
//! its `event_id`. Locks are always taken events-first, then transactions.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{LedgerStore, ensure_roster_keeps_referenced};
use crate::domain::{Event, EventId, Transaction, TransactionId};
use crate::error::LedgerError;
use crate::ledger::validate_participant;

/// Process-local [`LedgerStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: RwLock<HashMap<EventId, Event>>,
    transactions: RwLock<HashMap<TransactionId, Transaction>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn insert_event(&self, event: Event) -> Result<Event, LedgerError> {
        let mut events = self.events.write().await;
        if events.contains_key(&event.id) {
            return Err(LedgerError::InvalidRequest(format!(
                "event {} already exists",
                event.id
            )));
        }
        events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn get_event(&self, id: EventId) -> Result<Option<Event>, LedgerError> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>, LedgerError> {
        let mut events: Vec<Event> = self.events.read().await.values().cloned().collect();
        events.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }

    async fn update_event(&self, event: Event) -> Result<Event, LedgerError> {
        let mut events = self.events.write().await;
        let transactions = self.transactions.read().await;
        let slot = events
            .get_mut(&event.id)
            .ok_or(LedgerError::EventNotFound(*event.id.as_uuid()))?;

        let mut referenced = BTreeMap::new();
        for tx in transactions.values().filter(|tx| tx.event_id == event.id) {
            *referenced.entry(tx.participant_id.clone()).or_insert(0) += 1;
        }
        ensure_roster_keeps_referenced(&event.participants, &referenced)?;

        *slot = event.clone();
        Ok(event)
    }

    async fn delete_event(&self, id: EventId) -> Result<bool, LedgerError> {
        let mut events = self.events.write().await;
        let mut transactions = self.transactions.write().await;
        if events.remove(&id).is_none() {
            return Ok(false);
        }
        transactions.retain(|_, tx| tx.event_id != id);
        Ok(true)
    }

    async fn event_transactions(&self, event_id: EventId) -> Result<Vec<Transaction>, LedgerError> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .values()
            .filter(|tx| tx.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn get_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, LedgerError> {
        Ok(self.transactions.read().await.get(&id).cloned())
    }

    async fn insert_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, LedgerError> {
        let events = self.events.read().await;
        let event = events
            .get(&transaction.event_id)
            .ok_or(LedgerError::EventNotFound(*transaction.event_id.as_uuid()))?;
        validate_participant(&transaction.participant_id, &event.participants)?;

        let mut transactions = self.transactions.write().await;
        transactions.insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, LedgerError> {
        let events = self.events.read().await;
        let event = events
            .get(&transaction.event_id)
            .ok_or(LedgerError::EventNotFound(*transaction.event_id.as_uuid()))?;
        validate_participant(&transaction.participant_id, &event.participants)?;

        let mut transactions = self.transactions.write().await;
        let slot = transactions
            .get_mut(&transaction.id)
            .ok_or(LedgerError::TransactionNotFound(*transaction.id.as_uuid()))?;
        *slot = transaction.clone();
        Ok(transaction)
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<bool, LedgerError> {
        let _events = self.events.read().await;
        Ok(self.transactions.write().await.remove(&id).is_some())
    }
}
