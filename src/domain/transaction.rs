//! Money-movement records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventId, Money, ParticipantId, PaymentType, TransactionId, timestamp_now};
use crate::error::LedgerError;

/// One contribution, expense, or compensation within an event.
///
/// Only `date` (a calendar day, no time of day) matters for bucketing;
/// `created_at` orders transactions that share a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction identifier.
    pub id: TransactionId,
    /// Free-text title.
    pub title: String,
    /// Kind of movement.
    pub payment_type: PaymentType,
    /// Non-negative amount with two fractional digits.
    #[schema(value_type = String, example = "12.50")]
    pub amount: Money,
    /// Participant involved, or `"0"` for the pot.
    pub participant_id: ParticipantId,
    /// Calendar date of the movement.
    pub date: NaiveDate,
    /// Owning event.
    pub event_id: EventId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update.
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a new transaction in `event_id` from validated input.
    #[must_use]
    pub fn new(event_id: EventId, input: TransactionInput) -> Self {
        let now = timestamp_now();
        Self {
            id: TransactionId::new(),
            title: input.title,
            payment_type: input.payment_type,
            amount: input.amount,
            participant_id: input.participant_id,
            date: input.date,
            event_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the mutable fields with validated input.
    ///
    /// `id`, `event_id`, and `created_at` never change.
    pub fn apply(&mut self, input: TransactionInput) {
        self.title = input.title;
        self.payment_type = input.payment_type;
        self.amount = input.amount;
        self.participant_id = input.participant_id;
        self.date = input.date;
        self.updated_at = timestamp_now();
    }
}

/// Write-side payload for creating or updating a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    /// Free-text title.
    pub title: String,
    /// Kind of movement.
    pub payment_type: PaymentType,
    /// Amount, must not be negative.
    pub amount: Money,
    /// Participant involved, or the pot.
    pub participant_id: ParticipantId,
    /// Calendar date.
    pub date: NaiveDate,
}

impl TransactionInput {
    /// Checks the shape invariants that do not depend on the event.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidRequest`] if the title is blank, the
    /// amount is negative or above [`Money::MAX`], or the participant id is
    /// blank.
    pub fn validate(mut self) -> Result<Self, LedgerError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(LedgerError::InvalidRequest(
                "transaction title must not be empty".to_string(),
            ));
        }
        self.title = title.to_string();
        if self.amount.is_negative() {
            return Err(LedgerError::InvalidRequest(format!(
                "amount must not be negative, got {}",
                self.amount
            )));
        }
        if self.amount > Money::MAX {
            return Err(LedgerError::InvalidRequest(format!(
                "amount must not exceed {}, got {}",
                Money::MAX,
                self.amount
            )));
        }
        if self.participant_id.as_str().trim().is_empty() {
            return Err(LedgerError::InvalidRequest(
                "participantId must not be empty".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn input(amount: i64) -> TransactionInput {
        TransactionInput {
            title: " Groceries ".to_string(),
            payment_type: PaymentType::Expense,
            amount: Money::from_cents(amount),
            participant_id: ParticipantId::from("a1"),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default(),
        }
    }

    #[test]
    fn validate_trims_title() {
        let Ok(valid) = input(1250).validate() else {
            panic!("valid input rejected");
        };
        assert_eq!(valid.title, "Groceries");
    }

    #[test]
    fn zero_amount_is_allowed() {
        assert!(input(0).validate().is_ok());
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(matches!(
            input(-1).validate(),
            Err(LedgerError::InvalidRequest(_))
        ));
    }

    #[test]
    fn amount_above_max_is_rejected() {
        assert!(input(999_999_999_999).validate().is_ok());
        assert!(matches!(
            input(1_000_000_000_000).validate(),
            Err(LedgerError::InvalidRequest(_))
        ));
    }

    #[test]
    fn timestamps_carry_whole_microseconds() {
        let Ok(valid) = input(100).validate() else {
            panic!("valid input rejected");
        };
        let mut tx = Transaction::new(EventId::new(), valid.clone());
        assert_eq!(tx.created_at.timestamp_subsec_nanos() % 1_000, 0);
        tx.apply(valid);
        assert_eq!(tx.updated_at.timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn apply_keeps_identity() {
        let Ok(valid) = input(100).validate() else {
            panic!("valid input rejected");
        };
        let mut tx = Transaction::new(EventId::new(), valid.clone());
        let (id, created) = (tx.id, tx.created_at);
        tx.apply(TransactionInput {
            amount: Money::from_cents(300),
            ..valid
        });
        assert_eq!(tx.id, id);
        assert_eq!(tx.created_at, created);
        assert_eq!(tx.amount, Money::from_cents(300));
    }

    #[test]
    fn serializes_camel_case() {
        let Ok(valid) = input(4000).validate() else {
            panic!("valid input rejected");
        };
        let tx = Transaction::new(EventId::new(), valid);
        let json = serde_json::to_value(&tx).unwrap_or_default();
        assert_eq!(json["paymentType"], "expense");
        assert_eq!(json["participantId"], "a1");
        assert_eq!(json["amount"], "40.00");
        assert_eq!(json["date"], "2024-05-01");
        assert!(json.get("createdAt").is_some());
    }
}
