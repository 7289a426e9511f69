//! Lending Domain - Informal Loan Ledger
//!
//! This crate records loans made to borrowers, generates their repayment
//! schedules, and computes late penalties and balances on demand.
//!
//! # Components
//!
//! - **ScheduleGenerator**: turns loan terms into a fixed installment plan
//! - **BalanceEngine**: recomputes lateness, penalties, totals and settlement
//!   against an explicit date
//! - **Loan**: aggregate owning the borrower details and the installments
//! - **PaymentHistory**: printable statement of a loan
//! - **LoanRepository**: storage port, with an in-memory adapter
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::Money;
//! use domain_lending::{BalanceEngine, Borrower, Frequency, Loan, LoanTerms};
//! use rust_decimal_macros::dec;
//!
//! let mut loan = Loan::originate(
//!     Borrower::new("Maria Lopez"),
//!     LoanTerms::new(Money::new(dec!(1000)), dec!(10), Frequency::Monthly, 4),
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//! )
//! .unwrap();
//!
//! loan.mark_installment_paid(1).unwrap();
//! let balance = loan.refresh(&BalanceEngine::default(), NaiveDate::from_ymd_opt(2024, 2, 5).unwrap());
//!
//! assert_eq!(balance.outstanding.amount(), dec!(825.00));
//! ```

pub mod schedule;
pub mod installment;
pub mod balance;
pub mod loan;
pub mod statement;
pub mod error;
pub mod ports;
pub mod adapters;

pub use schedule::{Frequency, LoanTerms, Schedule, ScheduleGenerator, MAX_INSTALLMENTS};
pub use installment::{Installment, InstallmentStatus};
pub use balance::{BalanceEngine, BalanceSnapshot, Lateness, LATE_FEE_PER_DAY};
pub use loan::{Borrower, Loan, LoanBalance, LoanRefresh, LoanSummary};
pub use statement::{HistoryRow, PaymentHistory};
pub use error::LendingError;
pub use ports::LoanRepository;
pub use adapters::InMemoryLoanRepository;
