//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto::{EventListResponse, EventRequest, ParticipantRequest, TransactionRequest};
use crate::domain::{Event, Participant, PaymentType, Transaction};
use crate::error::{ErrorBody, ErrorResponse};
use crate::ledger::{KpiSummary, TransactionPage};

use super::handlers::system::HealthResponse;

/// Generated OpenAPI document.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        super::handlers::events::create_event,
        super::handlers::events::list_events,
        super::handlers::events::get_event,
        super::handlers::events::update_event,
        super::handlers::events::delete_event,
        super::handlers::events::get_kpis,
        super::handlers::transactions::list_transactions,
        super::handlers::transactions::create_transaction,
        super::handlers::transactions::get_transaction,
        super::handlers::transactions::update_transaction,
        super::handlers::transactions::delete_transaction,
        super::handlers::system::health_handler
    ),
    components(schemas(
        EventRequest,
        ParticipantRequest,
        EventListResponse,
        TransactionRequest,
        Event,
        Participant,
        PaymentType,
        Transaction,
        KpiSummary,
        TransactionPage,
        ErrorResponse,
        ErrorBody,
        HealthResponse
    )),
    tags(
        (name = "Events", description = "Event and roster management"),
        (name = "Transactions", description = "Transaction records and date-bucketed paging"),
        (name = "Ledger", description = "Financial KPIs"),
        (name = "System", description = "Service health")
    ),
    info(
        title = "pot-ledger API",
        description = "Shared-expense events with a common pot: KPIs and date-bucketed transaction pages",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/v1/events",
            "/api/v1/events/{id}",
            "/api/v1/events/{id}/kpis",
            "/api/v1/events/{id}/transactions",
            "/api/v1/events/{id}/transactions/{transaction_id}",
            "/health",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }
}
