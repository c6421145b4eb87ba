//! Database row models for events and transactions.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::{Event, EventId, Money, Participant, ParticipantId, Transaction, TransactionId};
use crate::error::LedgerError;

/// A row of the `events` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// Primary key.
    pub id: Uuid,
    /// Event title.
    pub title: String,
    /// Ordered roster as JSONB.
    pub participants: Json<Vec<Participant>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: EventId::from_uuid(row.id),
            title: row.title,
            participants: row.participants.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row of the `transactions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning event.
    pub event_id: Uuid,
    /// Free-text title.
    pub title: String,
    /// `contribution`, `expense` or `compensation`.
    pub payment_type: String,
    /// `NUMERIC(12,2)` amount.
    pub amount: Decimal,
    /// Participant id or `"0"` for the pot.
    pub participant_id: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = LedgerError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let payment_type = row
            .payment_type
            .parse()
            .map_err(|e| LedgerError::PersistenceError(format!("transaction {}: {e}", row.id)))?;
        let amount = Money::from_decimal(row.amount)
            .map_err(|e| LedgerError::PersistenceError(format!("transaction {}: {e}", row.id)))?;
        Ok(Self {
            id: TransactionId::from_uuid(row.id),
            title: row.title,
            payment_type,
            amount,
            participant_id: ParticipantId::new(row.participant_id),
            date: row.date,
            event_id: EventId::from_uuid(row.event_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::PaymentType;

    fn row(payment_type: &str, amount: Decimal) -> TransactionRow {
        TransactionRow {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            title: "Dinner".to_string(),
            payment_type: payment_type.to_string(),
            amount,
            participant_id: "0".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_transaction() {
        let Ok(tx) = Transaction::try_from(row("expense", Decimal::new(2_000, 2))) else {
            panic!("valid row rejected");
        };
        assert_eq!(tx.payment_type, PaymentType::Expense);
        assert_eq!(tx.amount, Money::from_cents(2_000));
        assert!(tx.participant_id.is_pot());
    }

    #[test]
    fn corrupt_payment_type_is_a_persistence_error() {
        let result = Transaction::try_from(row("refund", Decimal::ONE));
        assert!(matches!(result, Err(LedgerError::PersistenceError(_))));
    }
}
