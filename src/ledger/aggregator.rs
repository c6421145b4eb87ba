//! Ledger aggregation: transactions to KPI summary.
//!
//! [`aggregate`] is a total function over any slice of transactions. It
//! folds every record once into running [`Money`] sums, so the global and
//! per-participant figures always satisfy:
//!
//! - `potBalance = totalContributions - totalCompensations - totalExpenses`
//! - `pendingToCompensate = totalExpenses - totalCompensations`
//! - `sum(participantExpenses) + potExpenses = totalExpenses`
//!
//! Per-participant maps never contain the pot, and only carry ids that
//! appear on at least one qualifying transaction.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Money, ParticipantId, PaymentType, Transaction};

/// Per-participant amounts keyed by participant id.
pub type ParticipantAmounts = BTreeMap<ParticipantId, Money>;

/// Financial KPIs of one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    /// Sum of all expenses, the pot's included.
    #[schema(value_type = String, example = "60.00")]
    pub total_expenses: Money,
    /// Sum of all contributions.
    #[schema(value_type = String, example = "100.00")]
    pub total_contributions: Money,
    /// Sum of all compensations.
    #[schema(value_type = String, example = "10.00")]
    pub total_compensations: Money,
    /// Contributions minus compensations minus expenses.
    #[schema(value_type = String, example = "30.00")]
    pub pot_balance: Money,
    /// Expenses not yet compensated.
    #[schema(value_type = String, example = "50.00")]
    pub pending_to_compensate: Money,
    /// Expenses paid directly by the pot.
    #[schema(value_type = String, example = "20.00")]
    pub pot_expenses: Money,
    /// Contributions minus expenses minus compensations, per participant.
    #[schema(value_type = BTreeMap<String, String>)]
    pub participant_balances: ParticipantAmounts,
    /// Contributions per participant.
    #[schema(value_type = BTreeMap<String, String>)]
    pub participant_contributions: ParticipantAmounts,
    /// Out-of-pocket expenses per participant.
    #[schema(value_type = BTreeMap<String, String>)]
    pub participant_expenses: ParticipantAmounts,
    /// Compensations received per participant.
    #[schema(value_type = BTreeMap<String, String>)]
    pub participant_compensations: ParticipantAmounts,
    /// Expenses minus compensations, only for participants still owed money.
    #[schema(value_type = BTreeMap<String, String>)]
    pub participant_pending: ParticipantAmounts,
}

/// Computes the KPI summary of a complete transaction snapshot.
///
/// An empty slice yields all-zero totals and empty maps. Amounts are
/// assumed non-negative; they are not re-validated here.
#[must_use]
pub fn aggregate(transactions: &[Transaction]) -> KpiSummary {
    let mut kpis = KpiSummary::default();

    for tx in transactions {
        let on_pot = tx.participant_id.is_pot();
        let (total, per_participant) = match tx.payment_type {
            PaymentType::Contribution => (
                &mut kpis.total_contributions,
                &mut kpis.participant_contributions,
            ),
            PaymentType::Expense => {
                if on_pot {
                    kpis.pot_expenses += tx.amount;
                }
                (&mut kpis.total_expenses, &mut kpis.participant_expenses)
            }
            PaymentType::Compensation => (
                &mut kpis.total_compensations,
                &mut kpis.participant_compensations,
            ),
        };
        *total += tx.amount;
        if !on_pot {
            *per_participant
                .entry(tx.participant_id.clone())
                .or_default() += tx.amount;
        }
    }

    kpis.pot_balance = kpis.total_contributions - kpis.total_compensations - kpis.total_expenses;
    kpis.pending_to_compensate = kpis.total_expenses - kpis.total_compensations;

    let involved: BTreeSet<&ParticipantId> = kpis
        .participant_contributions
        .keys()
        .chain(kpis.participant_expenses.keys())
        .chain(kpis.participant_compensations.keys())
        .collect();

    let mut balances = ParticipantAmounts::new();
    let mut pending = ParticipantAmounts::new();
    for id in involved {
        let contributed = amount_of(&kpis.participant_contributions, id);
        let spent = amount_of(&kpis.participant_expenses, id);
        let compensated = amount_of(&kpis.participant_compensations, id);

        balances.insert(id.clone(), contributed - spent - compensated);

        let owed = spent - compensated;
        if owed.is_positive() {
            pending.insert(id.clone(), owed);
        }
    }
    kpis.participant_balances = balances;
    kpis.participant_pending = pending;

    kpis
}

fn amount_of(amounts: &ParticipantAmounts, id: &ParticipantId) -> Money {
    amounts.get(id).copied().unwrap_or(Money::ZERO)
}
