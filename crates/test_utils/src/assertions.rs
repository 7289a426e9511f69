//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_lending::{Loan, LoanTerms, Schedule};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts that a schedule matches its terms
///
/// Checks the installment count, 1-based numbering, strictly increasing due
/// dates, equal amounts, and that the installments add up to the total within
/// one cent per installment.
pub fn assert_schedule_well_formed(schedule: &Schedule, terms: &LoanTerms) {
    assert_eq!(
        schedule.installments.len(),
        terms.installment_count as usize,
        "Expected {} installments, got {}",
        terms.installment_count,
        schedule.installments.len()
    );

    for (i, installment) in schedule.installments.iter().enumerate() {
        assert_eq!(
            installment.sequence_number as usize,
            i + 1,
            "Installment at position {} has sequence number {}",
            i,
            installment.sequence_number
        );
        assert_eq!(
            installment.amount, schedule.installment_amount,
            "Installment {} amount {} differs from {}",
            installment.sequence_number, installment.amount, schedule.installment_amount
        );
    }

    for pair in schedule.installments.windows(2) {
        assert!(
            pair[0].due_date < pair[1].due_date,
            "Due dates not increasing: {} then {}",
            pair[0].due_date,
            pair[1].due_date
        );
    }

    let count = Decimal::from(terms.installment_count);
    let scheduled = schedule.installment_amount.amount() * count;
    let tolerance = Decimal::new(1, 2) * count;
    assert!(
        (scheduled - schedule.total_due.amount()).abs() <= tolerance,
        "Installments sum to {} but total due is {}",
        scheduled,
        schedule.total_due
    );
}

/// Asserts a loan's settled flag agrees with a fresh balance
pub fn assert_settled_consistent(loan: &Loan, outstanding: &Money) {
    assert_eq!(
        loan.settled,
        outstanding.is_zero(),
        "Loan {} settled={} but outstanding is {}",
        loan.id,
        loan.settled,
        outstanding
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
