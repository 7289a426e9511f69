//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for loans, borrowers and dates.
//! These fixtures are consistent and predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::{FixedClock, Money};
use domain_lending::{Borrower, Frequency, LoanTerms};
use fake::faker::address::en::StreetName;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rust_decimal_macros::dec;

/// Fixture for borrower test data
pub struct BorrowerFixtures;

impl BorrowerFixtures {
    /// A borrower with every contact field filled in
    pub fn maria() -> Borrower {
        Borrower::new("Maria Lopez")
            .with_phone("555-0101")
            .with_address("Calle Reforma 12")
            .with_collateral("Motorcycle title")
    }

    /// A borrower with a random name and phone
    pub fn random() -> Borrower {
        let name: String = Name().fake();
        let phone: String = PhoneNumber().fake();
        let street: String = StreetName().fake();
        Borrower::new(name).with_phone(phone).with_address(street)
    }
}

/// Fixture for loan terms
pub struct TermsFixtures;

impl TermsFixtures {
    /// 1000 at 10% over 4 monthly installments of 275.00
    pub fn monthly_with_interest() -> LoanTerms {
        LoanTerms::new(Money::new(dec!(1000)), dec!(10), Frequency::Monthly, 4)
    }

    /// 500 at 0% over 3 weekly installments of 166.67
    pub fn weekly_without_interest() -> LoanTerms {
        LoanTerms::new(Money::new(dec!(500)), dec!(0), Frequency::Weekly, 3)
    }

    /// 3000 at 20% over 6 biweekly installments of 600.00
    pub fn biweekly() -> LoanTerms {
        LoanTerms::new(Money::new(dec!(3000)), dec!(20), Frequency::Biweekly, 6)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard origination date (Jan 1, 2024)
    pub fn origination() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid fixture date")
    }

    /// A clock pinned to the origination date
    pub fn clock_at_origination() -> FixedClock {
        FixedClock(Self::origination())
    }

    /// A clock pinned `days` after the origination date
    pub fn clock_days_after(days: u64) -> FixedClock {
        FixedClock(Self::origination() + chrono::Days::new(days))
    }
}
