//! Loan Aggregate Root
//!
//! A loan owns its borrower details and its installment schedule. The
//! schedule is generated once when the loan is originated; afterwards only
//! installment statuses change, plus the lateness figures refreshed on each
//! balance inquiry.
//!
//! # Invariants
//!
//! - `total_due` and `installment_amount` are fixed at origination
//! - Editing borrower details never touches the schedule
//! - Installments are created together and never added or removed
//! - `settled` reflects the most recent refresh

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{LoanId, Money};

use crate::balance::{BalanceEngine, Lateness};
use crate::error::LendingError;
use crate::installment::Installment;
use crate::schedule::{LoanTerms, ScheduleGenerator};

/// Borrower contact details
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Borrower {
    /// Full name
    pub name: String,
    /// Phone number
    #[serde(default)]
    pub phone: String,
    /// Home address
    #[serde(default)]
    pub address: String,
    /// Description of the collateral held against the loan
    #[serde(default)]
    pub collateral: String,
}

impl Borrower {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_collateral(mut self, collateral: impl Into<String>) -> Self {
        self.collateral = collateral.into();
        self
    }

    /// Checks the borrower can be put on a loan
    pub fn validate(&self) -> Result<(), LendingError> {
        if self.name.trim().is_empty() {
            return Err(LendingError::InvalidBorrower(
                "borrower name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Balance figures of a loan after a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanBalance {
    pub total_due: Money,
    pub total_paid: Money,
    pub outstanding: Money,
    pub settled: bool,
}

/// One line of a loan listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub id: LoanId,
    pub borrower_name: String,
    pub total_due: Money,
    pub origination_date: NaiveDate,
    pub settled: bool,
}

/// Fields written back after a refresh
///
/// Carries only what a refresh computes. Applying it never changes an
/// installment's status, so it can be stored without overwriting a payment
/// recorded since the loan was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRefresh {
    pub settled: bool,
    /// Lateness per installment, keyed by sequence number
    pub lateness: Vec<(u32, Lateness)>,
}

/// A loan and its repayment schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    /// Unique identifier
    pub id: LoanId,
    /// Borrower details
    pub borrower: Borrower,
    /// Terms agreed at origination
    pub terms: LoanTerms,
    /// Principal plus interest
    pub total_due: Money,
    /// Amount of each installment
    pub installment_amount: Money,
    /// Date the loan was made
    pub origination_date: NaiveDate,
    /// Whether the loan was fully repaid at the last refresh
    pub settled: bool,
    /// Repayment schedule ordered by sequence number
    pub installments: Vec<Installment>,
}

impl Loan {
    /// Originates a loan, generating its installment schedule
    ///
    /// # Errors
    ///
    /// Returns `InvalidBorrower` for a blank name and `InvalidLoanTerms` when
    /// the terms cannot produce a schedule.
    pub fn originate(
        borrower: Borrower,
        terms: LoanTerms,
        origination_date: NaiveDate,
    ) -> Result<Self, LendingError> {
        borrower.validate()?;
        let schedule = ScheduleGenerator::new().generate(&terms, origination_date)?;

        Ok(Self {
            id: LoanId::generate(),
            borrower,
            terms,
            total_due: schedule.total_due,
            installment_amount: schedule.installment_amount,
            origination_date,
            settled: false,
            installments: schedule.installments,
        })
    }

    /// Replaces the borrower details; the schedule is left as it was
    pub fn update_borrower(&mut self, borrower: Borrower) -> Result<(), LendingError> {
        borrower.validate()?;
        self.borrower = borrower;
        Ok(())
    }

    /// Marks an installment as paid
    ///
    /// Returns false if it was already paid.
    pub fn mark_installment_paid(&mut self, sequence_number: u32) -> Result<bool, LendingError> {
        let loan_id = self.id;
        let installment = self
            .installments
            .iter_mut()
            .find(|i| i.sequence_number == sequence_number)
            .ok_or(LendingError::InstallmentNotFound {
                loan_id,
                sequence_number,
            })?;

        Ok(installment.mark_paid())
    }

    /// Recomputes lateness and balances as of `today` and stores the result
    pub fn refresh(&mut self, engine: &BalanceEngine, today: NaiveDate) -> LoanBalance {
        let snapshot = engine.recompute(self.total_due, &self.installments, today);
        self.installments = snapshot.installments;
        self.settled = snapshot.settled;

        LoanBalance {
            total_due: self.total_due,
            total_paid: snapshot.total_paid,
            outstanding: snapshot.outstanding,
            settled: snapshot.settled,
        }
    }

    /// The refreshed fields of this loan, ready to be stored
    pub fn refresh_record(&self) -> LoanRefresh {
        LoanRefresh {
            settled: self.settled,
            lateness: self
                .installments
                .iter()
                .map(|i| {
                    (
                        i.sequence_number,
                        Lateness {
                            late_days: i.late_days,
                            penalty: i.penalty,
                        },
                    )
                })
                .collect(),
        }
    }

    /// Number of installments still pending
    pub fn pending_count(&self) -> usize {
        self.installments.iter().filter(|i| i.is_pending()).count()
    }

    pub fn summary(&self) -> LoanSummary {
        LoanSummary {
            id: self.id,
            borrower_name: self.borrower.name.clone(),
            total_due: self.total_due,
            origination_date: self.origination_date,
            settled: self.settled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Frequency;
    use rust_decimal_macros::dec;

    fn sample_loan() -> Loan {
        Loan::originate(
            Borrower::new("Maria Lopez").with_phone("555-0101"),
            LoanTerms::new(Money::new(dec!(1000)), dec!(10), Frequency::Monthly, 4),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_originate_builds_schedule() {
        let loan = sample_loan();

        assert_eq!(loan.total_due.amount(), dec!(1100.00));
        assert_eq!(loan.installments.len(), 4);
        assert!(!loan.settled);
        assert_eq!(loan.pending_count(), 4);
    }

    #[test]
    fn test_originate_rejects_blank_name() {
        let result = Loan::originate(
            Borrower::new("   "),
            LoanTerms::new(Money::new(dec!(1000)), dec!(10), Frequency::Monthly, 4),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );

        assert!(matches!(result, Err(LendingError::InvalidBorrower(_))));
    }

    #[test]
    fn test_update_borrower_keeps_schedule() {
        let mut loan = sample_loan();
        let before = loan.installments.clone();

        loan.update_borrower(Borrower::new("Maria L. Lopez").with_address("Calle 5"))
            .unwrap();

        assert_eq!(loan.borrower.address, "Calle 5");
        assert_eq!(loan.installments, before);
        assert_eq!(loan.total_due.amount(), dec!(1100.00));
    }

    #[test]
    fn test_mark_unknown_installment() {
        let mut loan = sample_loan();
        let result = loan.mark_installment_paid(9);

        assert_eq!(
            result,
            Err(LendingError::InstallmentNotFound {
                loan_id: loan.id,
                sequence_number: 9
            })
        );
    }

    #[test]
    fn test_refresh_settles_fully_paid_loan() {
        let mut loan = sample_loan();
        for n in 1..=4 {
            assert!(loan.mark_installment_paid(n).unwrap());
        }

        let balance = loan.refresh(&BalanceEngine::default(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        assert_eq!(balance.total_paid.amount(), dec!(1100.00));
        assert!(balance.outstanding.is_zero());
        assert!(loan.settled);
    }

    #[test]
    fn test_refresh_record_carries_lateness() {
        let mut loan = sample_loan();
        loan.refresh(&BalanceEngine::default(), NaiveDate::from_ymd_opt(2024, 2, 5).unwrap());

        let record = loan.refresh_record();

        assert!(!record.settled);
        assert_eq!(record.lateness.len(), 4);
        assert_eq!(record.lateness[0].0, 1);
        assert_eq!(record.lateness[0].1.late_days, 5);
        assert_eq!(record.lateness[0].1.penalty.amount(), dec!(250.00));
        assert_eq!(record.lateness[1].1, Lateness::none());
    }
}
