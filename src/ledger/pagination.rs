//! Date-bucketed pagination over a transaction snapshot.
//!
//! The paging unit is a distinct calendar date, not a row. Dates are
//! dense-ranked newest first (rank 1 is the most recent date), and a
//! [`DateWindow`] selects every transaction whose date rank `r` satisfies
//! `offset < r <= offset + count`. A page therefore never splits a day.
//!
//! Within a page transactions are ordered by date descending, then by
//! creation time descending, then by id, so the order is total and
//! identical across calls on the same snapshot.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Transaction;

/// Default number of dates per page.
pub const DEFAULT_NUMBER_OF_DATES: u32 = 3;

/// Largest number of dates a single page may span.
pub const MAX_NUMBER_OF_DATES: u32 = 50;

/// Rejected pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// `numberOfDates` outside `1..=50`.
    #[error("numberOfDates must be between 1 and 50, got {0}")]
    NumberOfDatesOutOfRange(u32),
}

/// A validated `(offsetDates, numberOfDates)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    offset_dates: u32,
    number_of_dates: u32,
}

impl DateWindow {
    /// Validates a window.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::NumberOfDatesOutOfRange`] if `number_of_dates`
    /// is 0 or above [`MAX_NUMBER_OF_DATES`].
    pub const fn new(offset_dates: u32, number_of_dates: u32) -> Result<Self, WindowError> {
        if number_of_dates == 0 || number_of_dates > MAX_NUMBER_OF_DATES {
            return Err(WindowError::NumberOfDatesOutOfRange(number_of_dates));
        }
        Ok(Self {
            offset_dates,
            number_of_dates,
        })
    }

    /// Number of most recent dates to skip.
    #[must_use]
    pub const fn offset_dates(&self) -> u32 {
        self.offset_dates
    }

    /// Number of dates to return.
    #[must_use]
    pub const fn number_of_dates(&self) -> u32 {
        self.number_of_dates
    }

    /// The window immediately following this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self {
            offset_dates: self.offset_dates.saturating_add(self.number_of_dates),
            number_of_dates: self.number_of_dates,
        }
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self {
            offset_dates: 0,
            number_of_dates: DEFAULT_NUMBER_OF_DATES,
        }
    }
}

/// One page of transactions plus paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// Transactions of the selected dates, newest first.
    pub transactions: Vec<Transaction>,
    /// Whether older dates remain beyond this window.
    pub has_more: bool,
    /// Number of distinct dates in the whole snapshot.
    pub total_dates: usize,
    /// Number of distinct dates present in `transactions`.
    pub loaded_dates: usize,
}

/// Selects the transactions of the dates covered by `window`.
///
/// Total over any snapshot: an offset at or past the last date yields an
/// empty page with `has_more == false`.
#[must_use]
pub fn paginate(transactions: Vec<Transaction>, window: DateWindow) -> TransactionPage {
    let dates: BTreeSet<NaiveDate> = transactions.iter().map(|tx| tx.date).collect();
    let total_dates = dates.len();

    let offset = usize::try_from(window.offset_dates()).unwrap_or(usize::MAX);
    let count = usize::try_from(window.number_of_dates()).unwrap_or(usize::MAX);

    let selected: HashSet<NaiveDate> = dates.into_iter().rev().skip(offset).take(count).collect();

    let mut page: Vec<Transaction> = transactions
        .into_iter()
        .filter(|tx| selected.contains(&tx.date))
        .collect();
    page.sort_by(newest_first);

    let loaded_dates = page.chunk_by(|a, b| a.date == b.date).count();
    let has_more =
        u64::from(window.offset_dates()) + u64::from(window.number_of_dates()) < total_dates as u64;

    tracing::debug!(
        offset_dates = window.offset_dates(),
        number_of_dates = window.number_of_dates(),
        total_dates,
        loaded_dates,
        rows = page.len(),
        "paginated transactions by date"
    );

    TransactionPage {
        transactions: page,
        has_more,
        total_dates,
        loaded_dates,
    }
}

fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}
