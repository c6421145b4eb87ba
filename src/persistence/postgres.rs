//! PostgreSQL implementation of the transaction store.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool};
use sqlx::types::Json;

use super::models::{EventRow, TransactionRow};
use super::{LedgerStore, ensure_roster_keeps_referenced};
use crate::config::LedgerConfig;
use crate::domain::{Event, EventId, Participant, ParticipantId, Transaction, TransactionId};
use crate::error::LedgerError;
use crate::ledger::validate_participant;

const TRANSACTION_COLUMNS: &str = "id, event_id, title, payment_type, amount, participant_id, date, created_at, updated_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError::PersistenceError`] if the database cannot be
    /// reached within the configured timeout.
    pub async fn connect(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Applies pending schema migrations from `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError::PersistenceError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), LedgerError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| LedgerError::PersistenceError(e.to_string()))
    }
}

#[async_trait]
impl LedgerStore for PostgresStore {
    async fn insert_event(&self, event: Event) -> Result<Event, LedgerError> {
        sqlx::query(
            "INSERT INTO events (id, title, participants, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(*event.id.as_uuid())
        .bind(&event.title)
        .bind(Json(&event.participants))
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        Ok(event)
    }

    async fn get_event(&self, id: EventId) -> Result<Option<Event>, LedgerError> {
        let row = sqlx::query_as::<_, EventRow>(
            "SELECT id, title, participants, created_at, updated_at FROM events WHERE id = $1",
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        Ok(row.map(Event::from))
    }

    async fn list_events(&self) -> Result<Vec<Event>, LedgerError> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT id, title, participants, created_at, updated_at FROM events \
             ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn update_event(&self, event: Event) -> Result<Event, LedgerError> {
        let mut db = self
            .pool
            .begin()
            .await
            .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        // FOR UPDATE blocks transaction writes, which take FOR SHARE
        lock_roster(&mut db, event.id, "FOR UPDATE").await?;

        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT participant_id, COUNT(*) FROM transactions \
             WHERE event_id = $1 GROUP BY participant_id",
        )
        .bind(*event.id.as_uuid())
        .fetch_all(&mut *db)
        .await
        .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;
        let referenced: BTreeMap<ParticipantId, usize> = rows
            .into_iter()
            .map(|(id, n)| (ParticipantId::new(id), usize::try_from(n).unwrap_or(usize::MAX)))
            .collect();
        ensure_roster_keeps_referenced(&event.participants, &referenced)?;

        sqlx::query(
            "UPDATE events SET title = $2, participants = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(*event.id.as_uuid())
        .bind(&event.title)
        .bind(Json(&event.participants))
        .bind(event.updated_at)
        .execute(&mut *db)
        .await
        .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        db.commit()
            .await
            .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;
        Ok(event)
    }

    async fn delete_event(&self, id: EventId) -> Result<bool, LedgerError> {
        // transactions go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn event_transactions(&self, event_id: EventId) -> Result<Vec<Transaction>, LedgerError> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE event_id = $1"
        ))
        .bind(*event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn get_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, LedgerError> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        row.map(Transaction::try_from).transpose()
    }

    async fn insert_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, LedgerError> {
        let mut db = self
            .pool
            .begin()
            .await
            .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        let roster = lock_roster(&mut db, transaction.event_id, "FOR SHARE").await?;
        validate_participant(&transaction.participant_id, &roster)?;

        sqlx::query(&format!(
            "INSERT INTO transactions ({TRANSACTION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        ))
        .bind(*transaction.id.as_uuid())
        .bind(*transaction.event_id.as_uuid())
        .bind(&transaction.title)
        .bind(transaction.payment_type.as_str())
        .bind(transaction.amount.as_decimal())
        .bind(transaction.participant_id.as_str())
        .bind(transaction.date)
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .execute(&mut *db)
        .await
        .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        db.commit()
            .await
            .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;
        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Transaction, LedgerError> {
        let mut db = self
            .pool
            .begin()
            .await
            .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        let roster = lock_roster(&mut db, transaction.event_id, "FOR SHARE").await?;
        validate_participant(&transaction.participant_id, &roster)?;

        let result = sqlx::query(
            "UPDATE transactions SET title = $2, payment_type = $3, amount = $4, \
             participant_id = $5, date = $6, updated_at = $7 WHERE id = $1",
        )
        .bind(*transaction.id.as_uuid())
        .bind(&transaction.title)
        .bind(transaction.payment_type.as_str())
        .bind(transaction.amount.as_decimal())
        .bind(transaction.participant_id.as_str())
        .bind(transaction.date)
        .bind(transaction.updated_at)
        .execute(&mut *db)
        .await
        .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::TransactionNotFound(*transaction.id.as_uuid()));
        }
        db.commit()
            .await
            .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;
        Ok(transaction)
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<bool, LedgerError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Locks an event row with `lock` (`FOR UPDATE` or `FOR SHARE`) and returns
/// its roster.
async fn lock_roster(
    db: &mut PgConnection,
    event_id: EventId,
    lock: &str,
) -> Result<Vec<Participant>, LedgerError> {
    let row: Option<(Json<Vec<Participant>>,)> =
        sqlx::query_as(&format!("SELECT participants FROM events WHERE id = $1 {lock}"))
            .bind(*event_id.as_uuid())
            .fetch_optional(&mut *db)
            .await
            .map_err(|e| LedgerError::PersistenceError(e.to_string()))?;

    row.map(|(participants,)| participants.0)
        .ok_or(LedgerError::EventNotFound(*event_id.as_uuid()))
}
