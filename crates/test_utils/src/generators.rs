//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Days, NaiveDate};
use core_kernel::Money;
use domain_lending::{Frequency, LoanTerms};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating frequencies
pub fn frequency_strategy() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Weekly),
        Just(Frequency::Biweekly),
        Just(Frequency::Monthly),
    ]
}

/// Strategy for positive principals between 0.01 and 1,000,000.00
pub fn principal_strategy() -> impl Strategy<Value = Money> {
    (1i64..100_000_000i64).prop_map(Money::from_minor)
}

/// Strategy for interest percentages from 0% to 100% with two decimals
pub fn interest_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Strategy for installment counts (1 to 52)
pub fn installment_count_strategy() -> impl Strategy<Value = u32> {
    1u32..=52u32
}

/// Strategy for valid loan terms
pub fn loan_terms_strategy() -> impl Strategy<Value = LoanTerms> {
    (
        principal_strategy(),
        interest_rate_strategy(),
        frequency_strategy(),
        installment_count_strategy(),
    )
        .prop_map(|(principal, rate, frequency, count)| {
            LoanTerms::new(principal, rate, frequency, count)
        })
}

/// Strategy for dates in 2020 through 2029
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..3_650u64).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .map(|start| start + Days::new(offset))
            .unwrap_or_default()
    })
}
