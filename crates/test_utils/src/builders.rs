//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::Money;
use domain_lending::{Borrower, Frequency, Loan, LoanTerms};
use rust_decimal::Decimal;

use crate::fixtures::{BorrowerFixtures, TermsFixtures, TemporalFixtures};

/// Builder for originated loans
pub struct LoanBuilder {
    borrower: Borrower,
    terms: LoanTerms,
    origination_date: NaiveDate,
    paid: Vec<u32>,
}

impl Default for LoanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            borrower: BorrowerFixtures::maria(),
            terms: TermsFixtures::monthly_with_interest(),
            origination_date: TemporalFixtures::origination(),
            paid: Vec::new(),
        }
    }

    /// Sets the borrower
    pub fn with_borrower(mut self, borrower: Borrower) -> Self {
        self.borrower = borrower;
        self
    }

    /// Sets all terms at once
    pub fn with_terms(mut self, terms: LoanTerms) -> Self {
        self.terms = terms;
        self
    }

    /// Sets the principal
    pub fn with_principal(mut self, principal: Decimal) -> Self {
        self.terms.principal = Money::new(principal);
        self
    }

    /// Sets the interest rate percentage
    pub fn with_interest_rate(mut self, rate: Decimal) -> Self {
        self.terms.interest_rate = rate;
        self
    }

    /// Sets the frequency
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.terms.frequency = frequency;
        self
    }

    /// Sets the installment count
    pub fn with_installments(mut self, count: u32) -> Self {
        self.terms.installment_count = count;
        self
    }

    /// Sets the origination date
    pub fn originated_on(mut self, date: NaiveDate) -> Self {
        self.origination_date = date;
        self
    }

    /// Marks installments as paid after origination
    pub fn with_paid(mut self, sequence_numbers: impl IntoIterator<Item = u32>) -> Self {
        self.paid.extend(sequence_numbers);
        self
    }

    /// Builds the loan
    ///
    /// # Panics
    ///
    /// Panics if the configured borrower, terms or paid numbers are invalid
    pub fn build(self) -> Loan {
        let mut loan = Loan::originate(self.borrower, self.terms, self.origination_date)
            .expect("builder produced invalid loan");
        for sequence_number in self.paid {
            loan.mark_installment_paid(sequence_number)
                .expect("builder marked unknown installment");
        }
        loan
    }
}
