//! Event CRUD handlers and the KPI query.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{EventListResponse, EventRequest};
use crate::app_state::AppState;
use crate::domain::{Event, EventId};
use crate::error::{ErrorResponse, LedgerError};
use crate::ledger::KpiSummary;

/// `POST /events`: Create an event.
///
/// # Errors
///
/// Returns [`LedgerError`] on an invalid title or roster.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Creates an event with an ordered participant roster. Participant ids are generated when omitted; `\"0\"` is reserved for the pot.",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid title or roster", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LedgerError> {
    let Json(req) = payload?;
    let event = state.ledger_service.create_event(req.into_input()?).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// `GET /events`: List events.
///
/// # Errors
///
/// Returns [`LedgerError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns every event, oldest first.",
    responses(
        (status = 200, description = "Event list", body = EventListResponse),
    )
)]
pub async fn list_events(State(state): State<AppState>) -> Result<impl IntoResponse, LedgerError> {
    let data = state.ledger_service.list_events().await?;
    let total = data.len();
    Ok(Json(EventListResponse { data, total }))
}

/// `GET /events/{id}`: Get an event.
///
/// # Errors
///
/// Returns [`LedgerError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get an event",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Event details", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, LedgerError> {
    let event = state.ledger_service.get_event(EventId::from_uuid(id)).await?;
    Ok(Json(event))
}

/// `PUT /events/{id}`: Replace title and roster.
///
/// # Errors
///
/// Returns [`LedgerError`] if the event does not exist, the input is
/// invalid, or a removed participant still has transactions.
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Update an event",
    description = "Replaces the title and the full roster. Removing a participant who still has transactions is refused with 409.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Invalid title or roster", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 409, description = "Participant still referenced", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LedgerError> {
    let Json(req) = payload?;
    let event = state
        .ledger_service
        .update_event(EventId::from_uuid(id), req.into_input()?)
        .await?;
    Ok(Json(event))
}

/// `DELETE /events/{id}`: Delete an event and its transactions.
///
/// # Errors
///
/// Returns [`LedgerError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Delete an event",
    description = "Deletes the event and every transaction it owns.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, LedgerError> {
    state.ledger_service.delete_event(EventId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /events/{id}/kpis`: Financial KPIs of an event.
///
/// # Errors
///
/// Returns [`LedgerError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/kpis",
    tag = "Ledger",
    summary = "Get event KPIs",
    description = "Totals, pot balance, pending compensation, and per-participant breakdowns computed over every transaction of the event.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "KPI summary", body = KpiSummary),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_kpis(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, LedgerError> {
    let kpis = state.ledger_service.kpis(EventId::from_uuid(id)).await?;
    Ok(Json(kpis))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/events/{id}/kpis", get(get_kpis))
}
