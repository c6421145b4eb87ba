//! Participant reference check run before any transaction is written.

use std::fmt;

use crate::domain::{POT_ID, Participant, ParticipantId};

/// A participant id that is neither on the roster nor the pot.
///
/// The message lists every valid id so the caller can correct the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRejected {
    /// The offending id.
    pub participant_id: ParticipantId,
    /// Ids on the event's roster at validation time, in roster order.
    pub valid_ids: Vec<ParticipantId>,
}

impl fmt::Display for ParticipantRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "participant \"{}\" is not part of this event; valid participant ids: ",
            self.participant_id
        )?;
        for id in &self.valid_ids {
            write!(f, "\"{id}\", ")?;
        }
        write!(f, "or \"{POT_ID}\" for the pot")
    }
}

impl std::error::Error for ParticipantRejected {}

/// Checks that `participant_id` may appear on a transaction of an event
/// whose roster is `participants`.
///
/// The pot sentinel is accepted for every roster, including an empty one.
///
/// # Errors
///
/// Returns [`ParticipantRejected`] if the id is not the pot and no
/// participant on the roster carries it.
pub fn validate_participant(
    participant_id: &ParticipantId,
    participants: &[Participant],
) -> Result<(), ParticipantRejected> {
    if participant_id.is_pot() || participants.iter().any(|p| &p.id == participant_id) {
        return Ok(());
    }
    Err(ParticipantRejected {
        participant_id: participant_id.clone(),
        valid_ids: participants.iter().map(|p| p.id.clone()).collect(),
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn roster() -> Vec<Participant> {
        vec![
            Participant {
                id: ParticipantId::from("a1"),
                name: "Alice".to_string(),
            },
            Participant {
                id: ParticipantId::from("a2"),
                name: "Bob".to_string(),
            },
        ]
    }

    #[test]
    fn roster_member_is_accepted() {
        assert!(validate_participant(&ParticipantId::from("a2"), &roster()).is_ok());
    }

    #[test]
    fn pot_is_accepted_for_any_roster() {
        assert!(validate_participant(&ParticipantId::pot(), &roster()).is_ok());
        assert!(validate_participant(&ParticipantId::pot(), &[]).is_ok());
    }

    #[test]
    fn unknown_id_lists_valid_ids_and_pot() {
        let Err(rejected) = validate_participant(&ParticipantId::from("zz"), &roster()) else {
            panic!("unknown participant accepted");
        };
        assert_eq!(rejected.valid_ids.len(), 2);
        let message = rejected.to_string();
        assert!(message.contains("\"zz\""));
        assert!(message.contains("\"a1\""));
        assert!(message.contains("\"a2\""));
        assert!(message.contains("\"0\" for the pot"));
    }

    #[test]
    fn empty_roster_rejects_everyone_but_pot() {
        let Err(rejected) = validate_participant(&ParticipantId::from("a1"), &[]) else {
            panic!("participant accepted on empty roster");
        };
        assert!(rejected.valid_ids.is_empty());
        assert!(rejected.to_string().contains("\"0\""));
    }
}
