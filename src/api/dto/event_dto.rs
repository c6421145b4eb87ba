//! Event DTOs for create, update, and list operations.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Event, EventInput, ParticipantDraft};
use crate::error::LedgerError;

/// A participant in an event request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ParticipantRequest {
    /// Optional id, unique within the event and not `"0"`. Generated if absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
}

/// Request body for `POST /events` and `PUT /events/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EventRequest {
    /// Event title.
    pub title: String,
    /// Full roster, in display order.
    #[serde(default)]
    pub participants: Vec<ParticipantRequest>,
}

impl EventRequest {
    /// Validates the request into domain input.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidRequest`] on a blank title or name, or
    /// a duplicate or reserved participant id.
    pub fn into_input(self) -> Result<EventInput, LedgerError> {
        let drafts = self
            .participants
            .into_iter()
            .map(|p| ParticipantDraft {
                id: p.id,
                name: p.name,
            })
            .collect();
        EventInput::new(&self.title, drafts)
    }
}

/// List response for `GET /events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Events, oldest first.
    pub data: Vec<Event>,
    /// Number of events.
    pub total: usize,
}
