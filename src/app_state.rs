//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::LedgerService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Ledger service for all business logic.
    pub ledger_service: Arc<LedgerService>,
    /// Dates per page when `numberOfDates` is not given.
    pub default_number_of_dates: u32,
}
