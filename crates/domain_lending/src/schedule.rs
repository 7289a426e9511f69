//! Installment schedule generation
//!
//! Turns loan terms into the fixed repayment plan: the total due, the amount
//! of each installment, and one dated installment per period.
//!
//! # Schedule rules
//!
//! - Interest is simple and applied once: `total = principal + principal * rate / 100`
//! - Every installment has the same amount: `total / count`
//! - Both figures are rounded to cents, half-up
//! - At most `MAX_INSTALLMENTS` installments, and terms whose amounts fall
//!   outside the decimal range are rejected rather than computed
//! - Period steps are fixed day counts, not calendar arithmetic:
//!   weekly = 7 days, biweekly = 15 days, monthly = 30 days

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{Money, Rate};

use crate::error::LendingError;
use crate::installment::Installment;

/// Largest installment count a schedule may have
pub const MAX_INSTALLMENTS: u32 = 1_000;

/// Repayment frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// One installment every 7 days
    Weekly,
    /// One installment every 15 days
    Biweekly,
    /// One installment every 30 days
    Monthly,
}

impl Frequency {
    /// Returns the number of days between consecutive installments
    pub fn step_days(&self) -> u64 {
        match self {
            Frequency::Weekly => 7,
            Frequency::Biweekly => 15,
            Frequency::Monthly => 30,
        }
    }

    /// Returns the unit name used in installment labels
    pub fn period_label(&self) -> &'static str {
        match self {
            Frequency::Weekly => "Week",
            Frequency::Biweekly => "Fortnight",
            Frequency::Monthly => "Month",
        }
    }

    /// Calculates the due date of the installment at `sequence_number`
    ///
    /// Returns `None` if the date falls outside the supported calendar range.
    pub fn due_date(&self, origination_date: NaiveDate, sequence_number: u32) -> Option<NaiveDate> {
        let offset = self.step_days().checked_mul(u64::from(sequence_number))?;
        origination_date.checked_add_days(Days::new(offset))
    }

    /// Parses a frequency as submitted by a loan form
    ///
    /// Unrecognized values fall back to `Monthly`.
    pub fn from_form_value(value: &str) -> Self {
        value.parse().unwrap_or(Frequency::Monthly)
    }
}

impl FromStr for Frequency {
    type Err = LendingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" | "semanal" => Ok(Frequency::Weekly),
            "biweekly" | "quincenal" => Ok(Frequency::Biweekly),
            "monthly" | "mensual" => Ok(Frequency::Monthly),
            other => Err(LendingError::invalid_terms(format!(
                "unrecognized frequency '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Biweekly => write!(f, "biweekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

/// The agreed terms of a loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount lent
    pub principal: Money,
    /// Interest as a percentage of principal (10 means 10%)
    pub interest_rate: Decimal,
    /// Repayment frequency
    pub frequency: Frequency,
    /// Number of installments
    pub installment_count: u32,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        interest_rate: Decimal,
        frequency: Frequency,
        installment_count: u32,
    ) -> Self {
        Self {
            principal,
            interest_rate,
            frequency,
            installment_count,
        }
    }

    /// Checks the terms can produce a schedule
    pub fn validate(&self) -> Result<(), LendingError> {
        if !self.principal.is_positive() {
            return Err(LendingError::invalid_terms(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }
        if self.rate().is_negative() {
            return Err(LendingError::invalid_terms(format!(
                "interest rate must not be negative, got {}",
                self.interest_rate
            )));
        }
        if self.installment_count == 0 {
            return Err(LendingError::invalid_terms(
                "installment count must be positive",
            ));
        }
        if self.installment_count > MAX_INSTALLMENTS {
            return Err(LendingError::invalid_terms(format!(
                "installment count must be at most {}, got {}",
                MAX_INSTALLMENTS, self.installment_count
            )));
        }
        Ok(())
    }

    /// The interest rate as a `Rate`
    pub fn rate(&self) -> Rate {
        Rate::from_percentage(self.interest_rate)
    }

    /// Principal plus simple interest, rounded to cents
    ///
    /// Fails with `InvalidLoanTerms` when the total does not fit a decimal.
    pub fn total_due(&self) -> Result<Money, LendingError> {
        let interest = self.principal.checked_mul(self.rate().as_decimal())?;
        Ok(self.principal.checked_add(interest)?.round_to_cents())
    }
}

/// A generated repayment plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Principal plus interest
    pub total_due: Money,
    /// Amount of every installment
    pub installment_amount: Money,
    /// Installments ordered by sequence number
    pub installments: Vec<Installment>,
}

/// Generates installment schedules from loan terms
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleGenerator;

impl ScheduleGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates the repayment schedule for a loan
    ///
    /// # Arguments
    ///
    /// * `terms` - Principal, interest rate, frequency and installment count
    /// * `origination_date` - Date the loan was made; due dates count from it
    ///
    /// # Errors
    ///
    /// Returns `LendingError::InvalidLoanTerms` for a non-positive principal,
    /// a negative rate, a zero or oversized count, amounts out of decimal
    /// range, or a schedule past the calendar range.
    pub fn generate(
        &self,
        terms: &LoanTerms,
        origination_date: NaiveDate,
    ) -> Result<Schedule, LendingError> {
        terms.validate()?;

        let total_due = terms.total_due()?;
        let installment_amount = total_due
            .divide(Decimal::from(terms.installment_count))?
            .round_to_cents();

        if terms
            .frequency
            .due_date(origination_date, terms.installment_count)
            .is_none()
        {
            return Err(LendingError::invalid_terms(format!(
                "installment {} falls outside the supported calendar",
                terms.installment_count
            )));
        }

        let mut installments = Vec::with_capacity(terms.installment_count as usize);
        for sequence in 1..=terms.installment_count {
            let due_date = terms
                .frequency
                .due_date(origination_date, sequence)
                .ok_or_else(|| {
                    LendingError::invalid_terms(format!(
                        "installment {} falls outside the supported calendar",
                        sequence
                    ))
                })?;

            installments.push(Installment::scheduled(
                sequence,
                format!("{} {}", terms.frequency.period_label(), sequence),
                due_date,
                installment_amount,
            ));
        }

        tracing::debug!(
            frequency = %terms.frequency,
            rate = %terms.rate(),
            count = terms.installment_count,
            total_due = %total_due,
            installment_amount = %installment_amount,
            "Generated installment schedule"
        );

        Ok(Schedule {
            total_due,
            installment_amount,
            installments,
        })
    }
}
