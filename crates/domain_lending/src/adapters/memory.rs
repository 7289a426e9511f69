//! In-memory loan store
//!
//! Keeps loan aggregates in a map guarded by an async `RwLock`. Each call
//! holds the lock for its whole duration, so a loan and its installments are
//! always read and written together. Writes after insertion touch only the
//! fields they name. Ids are time-ordered (UUID v7), so map order is creation
//! order.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, LoanId, PortError};

use crate::balance::Lateness;
use crate::loan::{Borrower, Loan, LoanRefresh};
use crate::ports::LoanRepository;

/// `LoanRepository` backed by process memory
#[derive(Debug, Default, Clone)]
pub struct InMemoryLoanRepository {
    loans: Arc<RwLock<BTreeMap<LoanId, Loan>>>,
}

impl InMemoryLoanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store
    pub async fn with_loans(loans: Vec<Loan>) -> Self {
        let repository = Self::new();
        {
            let mut map = repository.loans.write().await;
            for loan in loans {
                map.insert(loan.id, loan);
            }
        }
        repository
    }

    /// Number of stored loans
    pub async fn len(&self) -> usize {
        self.loans.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.loans.read().await.is_empty()
    }
}

impl DomainPort for InMemoryLoanRepository {}

#[async_trait]
impl LoanRepository for InMemoryLoanRepository {
    #[instrument(skip(self, loan), fields(loan_id = %loan.id))]
    async fn insert_loan(&self, loan: &Loan) -> Result<(), PortError> {
        let mut loans = self.loans.write().await;
        if loans.contains_key(&loan.id) {
            return Err(PortError::conflict(format!("Loan {} already stored", loan.id)));
        }
        debug!(installments = loan.installments.len(), "Inserting loan");
        loans.insert(loan.id, loan.clone());
        Ok(())
    }

    #[instrument(skip(self), fields(loan_id = %id))]
    async fn get_loan(&self, id: LoanId) -> Result<Loan, PortError> {
        debug!("Fetching loan");
        self.loans
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Loan", id))
    }

    #[instrument(skip(self))]
    async fn list_loans(&self) -> Result<Vec<Loan>, PortError> {
        Ok(self.loans.read().await.values().cloned().collect())
    }

    #[instrument(skip(self), fields(loan_id = %id))]
    async fn mark_installment_paid(
        &self,
        id: LoanId,
        sequence_number: u32,
    ) -> Result<bool, PortError> {
        let mut loans = self.loans.write().await;
        let loan = loans
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Loan", id))?;
        let installment = loan
            .installments
            .iter_mut()
            .find(|i| i.sequence_number == sequence_number)
            .ok_or_else(|| {
                PortError::not_found("Installment", format!("{id}#{sequence_number}"))
            })?;

        let changed = installment.mark_paid();
        debug!(sequence_number, changed, "Marking installment paid");
        Ok(changed)
    }

    #[instrument(skip(self, refresh), fields(loan_id = %id))]
    async fn save_refresh(&self, id: LoanId, refresh: &LoanRefresh) -> Result<(), PortError> {
        let mut loans = self.loans.write().await;
        let loan = loans
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Loan", id))?;

        for (sequence_number, lateness) in &refresh.lateness {
            let Some(installment) = loan
                .installments
                .iter_mut()
                .find(|i| i.sequence_number == *sequence_number)
            else {
                continue;
            };
            let lateness = if installment.is_paid() {
                Lateness::none()
            } else {
                *lateness
            };
            installment.late_days = lateness.late_days;
            installment.penalty = lateness.penalty;
        }
        loan.settled = refresh.settled;

        debug!(settled = refresh.settled, "Saved refresh");
        Ok(())
    }

    #[instrument(skip(self, borrower), fields(loan_id = %id))]
    async fn update_borrower(&self, id: LoanId, borrower: &Borrower) -> Result<(), PortError> {
        let mut loans = self.loans.write().await;
        let loan = loans
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Loan", id))?;

        debug!("Updating borrower");
        loan.borrower = borrower.clone();
        Ok(())
    }

    #[instrument(skip(self), fields(loan_id = %id))]
    async fn delete_loan(&self, id: LoanId) -> Result<(), PortError> {
        debug!("Deleting loan and its installments");
        self.loans
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("Loan", id))
    }
}
