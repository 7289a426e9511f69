//! Lending Domain Ports
//!
//! The `LoanRepository` trait is everything the lending use cases need from
//! storage. A loan is inserted and deleted together with its whole schedule.
//! Later writes are narrow: an installment status, the refreshed lateness
//! figures, or the borrower details. None of them rewrites the others, so
//! concurrent use cases do not overwrite each other's changes.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_lending::ports::LoanRepository;
//! use std::sync::Arc;
//!
//! pub struct LoanService {
//!     loans: Arc<dyn LoanRepository>,
//! }
//!
//! impl LoanService {
//!     pub async fn get(&self, id: LoanId) -> Result<Loan, PortError> {
//!         self.loans.get_loan(id).await
//!     }
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, LoanId, PortError};

use crate::loan::{Borrower, Loan, LoanRefresh};

/// Storage port for loans and their installments
///
/// Implementations must apply each call atomically: a loan is never visible
/// with only part of its installments.
#[async_trait]
pub trait LoanRepository: DomainPort {
    /// Stores a new loan with its full schedule
    ///
    /// Returns `PortError::Conflict` if a loan with the same id exists.
    async fn insert_loan(&self, loan: &Loan) -> Result<(), PortError>;

    /// Retrieves a loan with its installments
    ///
    /// Returns `PortError::NotFound` for an unknown id.
    async fn get_loan(&self, id: LoanId) -> Result<Loan, PortError>;

    /// Retrieves all loans in creation order
    async fn list_loans(&self) -> Result<Vec<Loan>, PortError>;

    /// Marks one installment as paid
    ///
    /// Returns false if it was already paid. Returns `PortError::NotFound`
    /// for an unknown loan or sequence number.
    async fn mark_installment_paid(
        &self,
        id: LoanId,
        sequence_number: u32,
    ) -> Result<bool, PortError>;

    /// Stores the lateness figures and settled flag of a refresh
    ///
    /// Installment statuses are left as stored. A Paid installment keeps no
    /// lateness, whatever the refresh computed. Returns `PortError::NotFound`
    /// for an unknown id.
    async fn save_refresh(&self, id: LoanId, refresh: &LoanRefresh) -> Result<(), PortError>;

    /// Replaces the borrower details of a loan
    ///
    /// Returns `PortError::NotFound` for an unknown id.
    async fn update_borrower(&self, id: LoanId, borrower: &Borrower) -> Result<(), PortError>;

    /// Deletes a loan and all of its installments
    ///
    /// Returns `PortError::NotFound` for an unknown id.
    async fn delete_loan(&self, id: LoanId) -> Result<(), PortError>;
}
