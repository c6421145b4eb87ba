//! Transaction handlers: date-bucketed listing and CRUD.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{DatePageQuery, TransactionRequest};
use crate::app_state::AppState;
use crate::domain::{EventId, Transaction, TransactionId};
use crate::error::{ErrorResponse, LedgerError};
use crate::ledger::TransactionPage;

/// `GET /events/{id}/transactions`: One page of transactions, by date.
///
/// # Errors
///
/// Returns [`LedgerError`] on an out-of-range window or unknown event.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/transactions",
    tag = "Transactions",
    summary = "List transactions by date",
    description = "Pages over distinct calendar dates, newest first. A page holds every transaction of `numberOfDates` dates after skipping the `offsetDates` most recent ones.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
        DatePageQuery,
    ),
    responses(
        (status = 200, description = "Transaction page", body = TransactionPage),
        (status = 400, description = "Invalid window", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Query(query): Query<DatePageQuery>,
) -> Result<impl IntoResponse, LedgerError> {
    let window = query.window(state.default_number_of_dates)?;
    let page = state
        .ledger_service
        .transaction_page(EventId::from_uuid(id), window)
        .await?;
    Ok(Json(page))
}

/// `POST /events/{id}/transactions`: Record a transaction.
///
/// # Errors
///
/// Returns [`LedgerError`] on invalid input, an unknown participant, or an
/// unknown event.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/transactions",
    tag = "Transactions",
    summary = "Create a transaction",
    description = "Records a contribution, expense, or compensation. The participant must be on the event roster or be the pot (`\"0\"`, expenses only).",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    request_body = TransactionRequest,
    responses(
        (status = 201, description = "Transaction created", body = Transaction),
        (status = 400, description = "Invalid transaction or participant", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LedgerError> {
    let Json(req) = payload?;
    let transaction = state
        .ledger_service
        .create_transaction(EventId::from_uuid(id), req.try_into()?)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// `GET /events/{id}/transactions/{transaction_id}`: Get a transaction.
///
/// # Errors
///
/// Returns [`LedgerError::TransactionNotFound`] if it does not exist in
/// this event.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/transactions/{transaction_id}",
    tag = "Transactions",
    summary = "Get a transaction",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
        ("transaction_id" = uuid::Uuid, Path, description = "Transaction UUID"),
    ),
    responses(
        (status = 200, description = "Transaction", body = Transaction),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
    )
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path((id, transaction_id)): Path<(uuid::Uuid, uuid::Uuid)>,
) -> Result<impl IntoResponse, LedgerError> {
    let transaction = state
        .ledger_service
        .get_transaction(
            EventId::from_uuid(id),
            TransactionId::from_uuid(transaction_id),
        )
        .await?;
    Ok(Json(transaction))
}

/// `PUT /events/{id}/transactions/{transaction_id}`: Update a transaction.
///
/// # Errors
///
/// Returns [`LedgerError`] on invalid input, an unknown participant, or a
/// missing event or transaction.
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}/transactions/{transaction_id}",
    tag = "Transactions",
    summary = "Update a transaction",
    description = "Replaces title, type, amount, participant, and date. The participant is validated against the current roster.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
        ("transaction_id" = uuid::Uuid, Path, description = "Transaction UUID"),
    ),
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Transaction updated", body = Transaction),
        (status = 400, description = "Invalid transaction or participant", body = ErrorResponse),
        (status = 404, description = "Event or transaction not found", body = ErrorResponse),
    )
)]
pub async fn update_transaction(
    State(state): State<AppState>,
    Path((id, transaction_id)): Path<(uuid::Uuid, uuid::Uuid)>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LedgerError> {
    let Json(req) = payload?;
    let transaction = state
        .ledger_service
        .update_transaction(
            EventId::from_uuid(id),
            TransactionId::from_uuid(transaction_id),
            req.try_into()?,
        )
        .await?;
    Ok(Json(transaction))
}

/// `DELETE /events/{id}/transactions/{transaction_id}`: Delete a transaction.
///
/// # Errors
///
/// Returns [`LedgerError::TransactionNotFound`] if it does not exist in
/// this event.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}/transactions/{transaction_id}",
    tag = "Transactions",
    summary = "Delete a transaction",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
        ("transaction_id" = uuid::Uuid, Path, description = "Transaction UUID"),
    ),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
    )
)]
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path((id, transaction_id)): Path<(uuid::Uuid, uuid::Uuid)>,
) -> Result<impl IntoResponse, LedgerError> {
    state
        .ledger_service
        .delete_transaction(
            EventId::from_uuid(id),
            TransactionId::from_uuid(transaction_id),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events/{id}/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/events/{id}/transactions/{transaction_id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
