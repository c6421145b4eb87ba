//! Kind of money movement recorded by a transaction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Direction of a transaction relative to the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// A participant puts money into the pot.
    Contribution,
    /// Money is spent, either out of a participant's pocket or from the pot.
    Expense,
    /// The pot reimburses a participant.
    Compensation,
}

impl PaymentType {
    /// Returns the wire/storage name of this payment type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contribution => "contribution",
            Self::Expense => "expense",
            Self::Compensation => "compensation",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown payment type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment type: {0}")]
pub struct UnknownPaymentType(pub String);

impl FromStr for PaymentType {
    type Err = UnknownPaymentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contribution" => Ok(Self::Contribution),
            "expense" => Ok(Self::Expense),
            "compensation" => Ok(Self::Compensation),
            other => Err(UnknownPaymentType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_storage_names() {
        for kind in [
            PaymentType::Contribution,
            PaymentType::Expense,
            PaymentType::Compensation,
        ] {
            assert_eq!(kind.as_str().parse::<PaymentType>(), Ok(kind));
        }
        assert!("refund".parse::<PaymentType>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&PaymentType::Compensation).unwrap_or_default();
        assert_eq!(json, "\"compensation\"");
    }
}
