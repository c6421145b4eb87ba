//! Shared DTO types used across multiple endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::LedgerError;
use crate::ledger::DateWindow;

/// Date-window query parameters for the transaction list endpoint.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DatePageQuery {
    /// Number of distinct dates per page (1–50). Defaults to 3.
    #[serde(default)]
    pub number_of_dates: Option<u32>,
    /// Number of most recent dates to skip. Defaults to 0.
    #[serde(default)]
    pub offset_dates: Option<u32>,
}

impl DatePageQuery {
    /// Resolves defaults and validates the window.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidWindow`] if `numberOfDates` is outside
    /// `1..=50`.
    pub fn window(&self, default_number_of_dates: u32) -> Result<DateWindow, LedgerError> {
        Ok(DateWindow::new(
            self.offset_dates.unwrap_or(0),
            self.number_of_dates.unwrap_or(default_number_of_dates),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_use_defaults() {
        let window = DatePageQuery::default().window(3);
        assert!(matches!(window, Ok(w) if w.offset_dates() == 0 && w.number_of_dates() == 3));
    }

    #[test]
    fn out_of_range_count_is_rejected() {
        let query = DatePageQuery {
            number_of_dates: Some(51),
            offset_dates: None,
        };
        assert!(matches!(query.window(3), Err(LedgerError::InvalidWindow(_))));
    }
}
