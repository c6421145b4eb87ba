//! Events and their participant rosters.
//!
//! An [`Event`] owns its transactions, but only by reference: transactions
//! carry an [`EventId`] and are fetched through the store. The event never
//! embeds live transaction objects.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventId, ParticipantId, timestamp_now};
use crate::error::LedgerError;

/// A person taking part in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    /// Identifier, unique within the event and never `"0"`.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
}

/// A shared-expense event with its ordered participant roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event identifier.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Ordered roster. The pot is never listed here.
    pub participants: Vec<Participant>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last title/roster change.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new event from validated input.
    #[must_use]
    pub fn new(input: EventInput) -> Self {
        let now = timestamp_now();
        Self {
            id: EventId::new(),
            title: input.title,
            participants: input.participants,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces title and roster with validated input.
    pub fn apply(&mut self, input: EventInput) {
        self.title = input.title;
        self.participants = input.participants;
        self.updated_at = timestamp_now();
    }
}

/// A participant as supplied by a client, id optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantDraft {
    /// Requested id; generated when absent.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
}

/// Validated title and roster for creating or updating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInput {
    /// Non-empty title.
    pub title: String,
    /// Roster with unique, non-pot ids.
    pub participants: Vec<Participant>,
}

impl EventInput {
    /// Validates a title and participant drafts.
    ///
    /// Missing participant ids are filled with fresh UUIDs.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidRequest`] if the title or a name is
    /// blank, an id is blank or equal to the pot sentinel, or two
    /// participants share an id.
    pub fn new(title: &str, drafts: Vec<ParticipantDraft>) -> Result<Self, LedgerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(LedgerError::InvalidRequest(
                "event title must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(drafts.len());
        let mut participants = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let name = draft.name.trim();
            if name.is_empty() {
                return Err(LedgerError::InvalidRequest(
                    "participant name must not be empty".to_string(),
                ));
            }
            let id = match draft.id {
                Some(raw) => {
                    let raw = raw.trim();
                    if raw.is_empty() {
                        return Err(LedgerError::InvalidRequest(
                            "participant id must not be empty".to_string(),
                        ));
                    }
                    ParticipantId::new(raw)
                }
                None => ParticipantId::new(uuid::Uuid::new_v4().to_string()),
            };
            if id.is_pot() {
                return Err(LedgerError::InvalidRequest(format!(
                    "participant id \"{id}\" is reserved for the pot"
                )));
            }
            if !seen.insert(id.clone()) {
                return Err(LedgerError::InvalidRequest(format!(
                    "duplicate participant id \"{id}\""
                )));
            }
            participants.push(Participant {
                id,
                name: name.to_string(),
            });
        }

        Ok(Self {
            title: title.to_string(),
            participants,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn draft(id: Option<&str>, name: &str) -> ParticipantDraft {
        ParticipantDraft {
            id: id.map(str::to_string),
            name: name.to_string(),
        }
    }

    #[test]
    fn keeps_roster_order_and_trims() {
        let Ok(input) = EventInput::new(
            " Trip ",
            vec![draft(Some("a1"), " Alice "), draft(Some("a2"), "Bob")],
        ) else {
            panic!("valid input rejected");
        };
        assert_eq!(input.title, "Trip");
        let ids: Vec<&str> = input.participants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
        assert_eq!(input.participants.first().map(|p| p.name.as_str()), Some("Alice"));
    }

    #[test]
    fn generates_missing_ids() {
        let Ok(input) = EventInput::new("Trip", vec![draft(None, "Alice"), draft(None, "Bob")])
        else {
            panic!("valid input rejected");
        };
        assert_eq!(input.participants.len(), 2);
        assert!(input.participants.iter().all(|p| !p.id.is_pot()));
        assert_ne!(
            input.participants.first().map(|p| &p.id),
            input.participants.get(1).map(|p| &p.id)
        );
    }

    #[test]
    fn rejects_pot_id_in_roster() {
        let result = EventInput::new("Trip", vec![draft(Some("0"), "Pot")]);
        assert!(matches!(result, Err(LedgerError::InvalidRequest(_))));
    }

    #[test]
    fn rejects_duplicates_and_blanks() {
        assert!(EventInput::new("Trip", vec![draft(Some("a"), "A"), draft(Some("a"), "B")]).is_err());
        assert!(EventInput::new("  ", vec![]).is_err());
        assert!(EventInput::new("Trip", vec![draft(Some("a"), " ")]).is_err());
        assert!(EventInput::new("Trip", vec![draft(Some(" "), "A")]).is_err());
    }

    #[test]
    fn timestamps_carry_whole_microseconds() {
        let Ok(input) = EventInput::new("Trip", vec![draft(Some("a1"), "Alice")]) else {
            panic!("valid input rejected");
        };
        let event = Event::new(input);
        assert_eq!(event.created_at.timestamp_subsec_nanos() % 1_000, 0);
        assert_eq!(event.created_at, event.updated_at);
    }
}
