//! Type-safe identifiers for events, transactions, and participants.
//!
//! [`EventId`] and [`TransactionId`] are newtype wrappers around
//! [`uuid::Uuid`] (v4) so the two cannot be confused with each other.
//! [`ParticipantId`] is an opaque string chosen per event, with `"0"`
//! reserved for the pot.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw value of the reserved participant id that designates the pot.
pub const POT_ID: &str = "0";

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Creates a new random identifier (UUID v4).
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Creates an identifier from an existing [`uuid::Uuid`].
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner [`uuid::Uuid`].
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id!(
    /// Unique identifier of an event (the group sharing a pot).
    EventId
);

uuid_id!(
    /// Unique identifier of a money-movement record.
    ///
    /// Also serves as the last-resort tie-breaker when two transactions
    /// share both date and creation timestamp.
    TransactionId
);

/// Identifier of a participant within one event.
///
/// Participant ids are only unique inside their event. The value `"0"`
/// never names a person: it is the pot sentinel (see [`ParticipantId::pot`]).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Wraps a raw participant id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The reserved id standing for the event's shared pot.
    #[must_use]
    pub fn pot() -> Self {
        Self(POT_ID.to_string())
    }

    /// Returns `true` if this id is the pot sentinel.
    #[must_use]
    pub fn is_pot(&self) -> bool {
        self.0 == POT_ID
    }

    /// Returns the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(EventId::new(), EventId::new());
        assert_ne!(TransactionId::new(), TransactionId::new());
    }

    #[test]
    fn display_is_uuid_format() {
        let s = format!("{}", TransactionId::new());
        assert_eq!(s.len(), 36);
        assert!(s.contains('-'));
    }

    #[test]
    fn event_id_is_transparent_in_json() {
        let uuid = uuid::Uuid::new_v4();
        let Ok(json) = serde_json::to_string(&EventId::from_uuid(uuid)) else {
            panic!("serialization failed");
        };
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn pot_sentinel_is_zero() {
        let pot = ParticipantId::pot();
        assert!(pot.is_pot());
        assert_eq!(pot.as_str(), "0");
        assert!(ParticipantId::from("0").is_pot());
        assert!(!ParticipantId::from("00").is_pot());
        assert!(!ParticipantId::from("a1").is_pot());
    }

    #[test]
    fn participant_id_works_as_json_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(ParticipantId::from("a1"), 1);
        let Ok(json) = serde_json::to_string(&map) else {
            panic!("serialization failed");
        };
        assert_eq!(json, r#"{"a1":1}"#);
    }
}
