//! Printable payment history
//!
//! A `PaymentHistory` is the document handed to whatever prints or renders a
//! loan statement. It is built from a freshly refreshed loan so penalties
//! reflect the day it was produced.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::temporal::format_ledger_date;
use core_kernel::Money;

use crate::installment::InstallmentStatus;
use crate::loan::{Loan, LoanBalance};

/// Title printed at the top of every statement
pub const STATEMENT_TITLE: &str = "Payment History";

/// One row of the installment table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub label: String,
    pub due_date: NaiveDate,
    pub amount: Money,
    pub penalty: Money,
    pub status: InstallmentStatus,
}

/// Payment history document for one loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentHistory {
    pub borrower_name: String,
    pub phone: String,
    pub loan_date: NaiveDate,
    pub rows: Vec<HistoryRow>,
    pub total_due: Money,
    pub total_paid: Money,
    pub outstanding: Money,
}

impl PaymentHistory {
    /// Builds the history from a loan and the balance of its latest refresh
    pub fn new(loan: &Loan, balance: &LoanBalance) -> Self {
        let rows = loan
            .installments
            .iter()
            .map(|i| HistoryRow {
                label: i.label.clone(),
                due_date: i.due_date,
                amount: i.amount,
                penalty: i.penalty,
                status: i.status,
            })
            .collect();

        Self {
            borrower_name: loan.borrower.name.clone(),
            phone: loan.borrower.phone.clone(),
            loan_date: loan.origination_date,
            rows,
            total_due: balance.total_due,
            total_paid: balance.total_paid,
            outstanding: balance.outstanding,
        }
    }

    /// File name stem for a saved copy, e.g. `payments_Maria_Lopez`
    pub fn file_stem(&self) -> String {
        let name: String = self
            .borrower_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        format!("payments_{}", name)
    }
}

impl fmt::Display for PaymentHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", STATEMENT_TITLE)?;
        writeln!(f)?;
        writeln!(f, "Borrower: {}", self.borrower_name)?;
        writeln!(f, "Phone: {}", self.phone)?;
        writeln!(f, "Loan date: {}", format_ledger_date(self.loan_date))?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<14}{:<12}{:>12}{:>12}  {}",
            "Period", "Due date", "Amount", "Penalty", "Status"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<14}{:<12}{:>12}{:>12}  {}",
                row.label,
                format_ledger_date(row.due_date),
                row.amount.to_string(),
                row.penalty.to_string(),
                row.status
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Total loan: {}", self.total_due)?;
        writeln!(f, "Total paid: {}", self.total_paid)?;
        write!(f, "Outstanding: {}", self.outstanding)
    }
}
