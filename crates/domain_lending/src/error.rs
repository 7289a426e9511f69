//! Lending domain errors

use core_kernel::{LoanId, MoneyError};
use thiserror::Error;

/// Errors that can occur in the lending domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LendingError {
    /// Principal, rate, count or frequency rejected at loan creation
    #[error("Invalid loan terms: {0}")]
    InvalidLoanTerms(String),

    /// Borrower contact data rejected
    #[error("Invalid borrower: {0}")]
    InvalidBorrower(String),

    /// No installment with that sequence number on the loan
    #[error("Installment {sequence_number} not found on loan {loan_id}")]
    InstallmentNotFound {
        loan_id: LoanId,
        sequence_number: u32,
    },
}

impl LendingError {
    pub fn invalid_terms(message: impl Into<String>) -> Self {
        LendingError::InvalidLoanTerms(message.into())
    }
}

impl From<MoneyError> for LendingError {
    fn from(err: MoneyError) -> Self {
        LendingError::InvalidLoanTerms(err.to_string())
    }
}
