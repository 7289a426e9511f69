//! Balance and late-penalty computation
//!
//! Every balance inquiry recomputes lateness from scratch against the date it
//! is asked for. Nothing accumulates between calls, so asking twice on the
//! same day yields the same figures.
//!
//! # Rules
//!
//! - A pending installment whose due date is before `today` is late by the
//!   whole days between the two dates, and owes `late_days * fee` in penalty
//! - Any other installment (paid, or not yet due) has no lateness
//! - Total paid sums `amount + penalty` over paid installments. Paid
//!   installments never carry a penalty after recomputation, so in practice
//!   this is the sum of their amounts; a late payer's penalty is never
//!   collected
//! - Outstanding is `total_due - total_paid`, rounded to cents and floored at zero
//! - A loan is settled when nothing is outstanding

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::temporal::days_elapsed;
use core_kernel::Money;

use crate::installment::Installment;

/// Default flat late fee charged per day an installment is overdue
pub const LATE_FEE_PER_DAY: Decimal = dec!(50);

/// Lateness of a single installment on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lateness {
    pub late_days: u32,
    pub penalty: Money,
}

impl Lateness {
    pub fn none() -> Self {
        Self {
            late_days: 0,
            penalty: Money::zero(),
        }
    }
}

/// Result of recomputing a loan's installments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Installments with refreshed lateness
    pub installments: Vec<Installment>,
    /// Sum over paid installments
    pub total_paid: Money,
    /// Amount still owed, never negative
    pub outstanding: Money,
    /// True when nothing is outstanding
    pub settled: bool,
}

/// Computes lateness, penalties and balances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceEngine {
    late_fee_per_day: Money,
}

impl Default for BalanceEngine {
    fn default() -> Self {
        Self::new(Money::new(LATE_FEE_PER_DAY))
    }
}

impl BalanceEngine {
    /// Creates an engine charging a flat fee per overdue day
    pub fn new(late_fee_per_day: Money) -> Self {
        Self { late_fee_per_day }
    }

    pub fn late_fee_per_day(&self) -> Money {
        self.late_fee_per_day
    }

    /// Computes the lateness of one installment as of `today`
    pub fn assess(&self, installment: &Installment, today: NaiveDate) -> Lateness {
        if !installment.is_overdue(today) {
            return Lateness::none();
        }

        let late_days = days_elapsed(installment.due_date, today);
        Lateness {
            late_days,
            penalty: self
                .late_fee_per_day
                .saturating_mul(Decimal::from(late_days))
                .round_to_cents(),
        }
    }

    /// Recomputes every installment and the loan totals as of `today`
    ///
    /// # Arguments
    ///
    /// * `total_due` - The loan's fixed total (principal plus interest)
    /// * `installments` - Current installment states
    /// * `today` - The date the inquiry is made
    pub fn recompute(
        &self,
        total_due: Money,
        installments: &[Installment],
        today: NaiveDate,
    ) -> BalanceSnapshot {
        let installments: Vec<Installment> = installments
            .iter()
            .map(|installment| {
                let lateness = self.assess(installment, today);
                Installment {
                    late_days: lateness.late_days,
                    penalty: lateness.penalty,
                    ..installment.clone()
                }
            })
            .collect();

        let total_paid: Money = installments
            .iter()
            .filter(|i| i.is_paid())
            .map(|i| i.amount + i.penalty)
            .sum();

        let outstanding = (total_due - total_paid).round_to_cents().clamp_non_negative();

        BalanceSnapshot {
            installments,
            total_paid,
            outstanding,
            settled: outstanding.is_zero(),
        }
    }
}
