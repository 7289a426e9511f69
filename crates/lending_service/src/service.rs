//! Lending use cases

use std::sync::Arc;

use tracing::{debug, info, instrument};
use validator::Validate;

use core_kernel::{Clock, LoanId};
use domain_lending::{BalanceEngine, Loan, LoanRepository, LoanSummary, PaymentHistory};

use crate::dto::{BorrowerDetails, LoanView, NewLoanRequest};
use crate::error::ServiceError;

/// Runs the lending use cases against a repository
///
/// Every call that looks at balances refreshes the loan against the clock's
/// current date and persists the result, so the stored settled flag reflects
/// the latest inquiry. Only the refreshed fields are written back; a payment
/// recorded meanwhile stays paid.
#[derive(Clone)]
pub struct LoanService {
    loans: Arc<dyn LoanRepository>,
    clock: Arc<dyn Clock>,
    engine: BalanceEngine,
}

impl LoanService {
    pub fn new(
        loans: Arc<dyn LoanRepository>,
        clock: Arc<dyn Clock>,
        engine: BalanceEngine,
    ) -> Self {
        Self {
            loans,
            clock,
            engine,
        }
    }

    /// Originates a loan dated today and stores it with its schedule
    ///
    /// # Errors
    ///
    /// * `ServiceError::Validation` - the request fails field validation
    /// * `ServiceError::Lending` - the terms cannot produce a schedule
    #[instrument(skip(self, request), fields(borrower = %request.name))]
    pub async fn create_loan(&self, request: NewLoanRequest) -> Result<Loan, ServiceError> {
        request.validate()?;

        let today = self.clock.today();
        let loan = Loan::originate(request.borrower(), request.terms(), today)?;
        self.loans.insert_loan(&loan).await?;

        info!(
            loan_id = %loan.id,
            total_due = %loan.total_due,
            installment_amount = %loan.installment_amount,
            installments = loan.installments.len(),
            "Loan created"
        );
        Ok(loan)
    }

    /// Lists every loan with the settled flag from its last refresh
    #[instrument(skip(self))]
    pub async fn list_loans(&self) -> Result<Vec<LoanSummary>, ServiceError> {
        let loans = self.loans.list_loans().await?;
        debug!(count = loans.len(), "Listed loans");
        Ok(loans.iter().map(Loan::summary).collect())
    }

    /// Refreshes a loan against today and returns it with its balance
    #[instrument(skip(self), fields(loan_id = %id))]
    pub async fn view_loan(&self, id: LoanId) -> Result<LoanView, ServiceError> {
        let mut loan = self.loans.get_loan(id).await?;
        let today = self.clock.today();
        let balance = loan.refresh(&self.engine, today);
        self.loans.save_refresh(id, &loan.refresh_record()).await?;

        debug!(
            %today,
            outstanding = %balance.outstanding,
            settled = balance.settled,
            "Loan refreshed"
        );
        Ok(LoanView { loan, balance })
    }

    /// Marks one installment as paid
    ///
    /// Paying an installment that is already paid leaves the loan unchanged.
    #[instrument(skip(self), fields(loan_id = %id))]
    pub async fn record_payment(
        &self,
        id: LoanId,
        sequence_number: u32,
    ) -> Result<Loan, ServiceError> {
        let mut loan = self.loans.get_loan(id).await?;
        loan.mark_installment_paid(sequence_number)?;

        if self.loans.mark_installment_paid(id, sequence_number).await? {
            info!(sequence_number, "Installment paid");
        } else {
            debug!(sequence_number, "Installment already paid");
        }
        Ok(loan)
    }

    /// Replaces the borrower's contact details
    #[instrument(skip(self, details), fields(loan_id = %id))]
    pub async fn edit_borrower(
        &self,
        id: LoanId,
        details: BorrowerDetails,
    ) -> Result<Loan, ServiceError> {
        details.validate()?;

        let mut loan = self.loans.get_loan(id).await?;
        loan.update_borrower(details.into())?;
        self.loans.update_borrower(id, &loan.borrower).await?;

        info!("Borrower updated");
        Ok(loan)
    }

    /// Deletes a loan and its installments
    #[instrument(skip(self), fields(loan_id = %id))]
    pub async fn delete_loan(&self, id: LoanId) -> Result<(), ServiceError> {
        self.loans.delete_loan(id).await?;
        info!("Loan deleted");
        Ok(())
    }

    /// Builds the printable payment history from a fresh refresh
    #[instrument(skip(self), fields(loan_id = %id))]
    pub async fn payment_history(&self, id: LoanId) -> Result<PaymentHistory, ServiceError> {
        let view = self.view_loan(id).await?;
        Ok(PaymentHistory::new(&view.loan, &view.balance))
    }
}
