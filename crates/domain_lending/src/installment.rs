//! Scheduled installments
//!
//! An installment is one fixed payment of a loan. It is created with the rest
//! of the schedule and only ever moves from `Pending` to `Paid`. The lateness
//! fields are scratch values overwritten on every balance inquiry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{InstallmentId, Money};

/// Installment payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstallmentStatus {
    /// Not yet paid
    Pending,
    /// Paid in full; terminal
    Paid,
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallmentStatus::Pending => write!(f, "Pending"),
            InstallmentStatus::Paid => write!(f, "Paid"),
        }
    }
}

/// One scheduled payment of a loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// Unique identifier
    pub id: InstallmentId,
    /// 1-based position in the schedule
    pub sequence_number: u32,
    /// Human label, e.g. "Week 3"
    pub label: String,
    /// Due date
    pub due_date: NaiveDate,
    /// Amount due, fixed at creation
    pub amount: Money,
    /// Payment status
    pub status: InstallmentStatus,
    /// Days overdue as of the latest balance inquiry
    pub late_days: u32,
    /// Late penalty as of the latest balance inquiry
    pub penalty: Money,
}

impl Installment {
    /// Creates a pending installment with no lateness
    pub fn scheduled(
        sequence_number: u32,
        label: impl Into<String>,
        due_date: NaiveDate,
        amount: Money,
    ) -> Self {
        Self {
            id: InstallmentId::generate(),
            sequence_number,
            label: label.into(),
            due_date,
            amount,
            status: InstallmentStatus::Pending,
            late_days: 0,
            penalty: Money::zero(),
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }

    pub fn is_pending(&self) -> bool {
        self.status == InstallmentStatus::Pending
    }

    /// Returns true if the installment is unpaid and its due date is before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_pending() && self.due_date < today
    }

    /// Marks the installment as paid
    ///
    /// Returns false when it was already paid; the status is left unchanged.
    pub fn mark_paid(&mut self) -> bool {
        if self.is_paid() {
            return false;
        }
        self.status = InstallmentStatus::Paid;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn week_one() -> Installment {
        Installment::scheduled(
            1,
            "Week 1",
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            Money::new(dec!(100)),
        )
    }

    #[test]
    fn test_scheduled_starts_pending_without_penalty() {
        let installment = week_one();

        assert!(installment.is_pending());
        assert_eq!(installment.late_days, 0);
        assert!(installment.penalty.is_zero());
    }

    #[test]
    fn test_mark_paid_is_one_way() {
        let mut installment = week_one();

        assert!(installment.mark_paid());
        assert!(!installment.mark_paid());
        assert_eq!(installment.status, InstallmentStatus::Paid);
    }

    #[test]
    fn test_overdue_only_after_due_date() {
        let installment = week_one();

        assert!(!installment.is_overdue(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()));
        assert!(installment.is_overdue(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()));
    }
}
