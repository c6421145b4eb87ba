//! Transaction write DTOs.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Money, MoneyError, ParticipantId, PaymentType, TransactionInput};
use crate::error::LedgerError;

/// Request body for creating or updating a transaction.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Free-text title.
    pub title: String,
    /// `contribution`, `expense`, or `compensation`.
    pub payment_type: PaymentType,
    /// Non-negative amount with at most two fractional digits, as a string
    /// or a number.
    #[schema(value_type = String, example = "12.50")]
    pub amount: Value,
    /// Participant id, or `"0"` for the pot.
    pub participant_id: String,
    /// Calendar date (`YYYY-MM-DD`).
    pub date: NaiveDate,
}

impl TryFrom<TransactionRequest> for TransactionInput {
    type Error = LedgerError;

    fn try_from(req: TransactionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: req.title,
            payment_type: req.payment_type,
            amount: parse_amount(&req.amount)?,
            participant_id: ParticipantId::new(req.participant_id),
            date: req.date,
        })
    }
}

fn parse_amount(raw: &Value) -> Result<Money, MoneyError> {
    match raw {
        Value::String(s) => s.parse(),
        Value::Number(n) => n.to_string().parse(),
        other => Err(MoneyError::Invalid(other.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(amount: Value) -> TransactionRequest {
        let body = json!({
            "title": "Dinner",
            "paymentType": "expense",
            "amount": amount,
            "participantId": "a1",
            "date": "2024-02-03"
        });
        serde_json::from_value(body).unwrap_or_else(|e| panic!("request shape rejected: {e}"))
    }

    #[test]
    fn strings_and_numbers_become_money() {
        for amount in [json!("12.50"), json!(12.5), json!(12.50)] {
            let Ok(input) = TransactionInput::try_from(request(amount)) else {
                panic!("valid amount rejected");
            };
            assert_eq!(input.amount, Money::from_cents(1250));
        }
    }

    #[test]
    fn bad_amounts_are_invalid_amount_errors() {
        for amount in [json!("1.005"), json!("abc"), json!(true), json!("10000000000")] {
            assert!(matches!(
                TransactionInput::try_from(request(amount)),
                Err(LedgerError::InvalidAmount(_))
            ));
        }
    }
}
