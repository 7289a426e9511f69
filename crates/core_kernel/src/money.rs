//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.
//!
//! The ledger works in a single currency. Amounts are kept exact and rounded
//! to cents, half-up, exactly once: when a figure is fixed into a loan (total
//! due, installment amount, penalty, outstanding).

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Decimal places of a cent-rounded amount
pub const CENT_PLACES: u32 = 2;

/// Tie-break used for every cent rounding: 0.005 rounds up to 0.01
pub const CENT_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Symbol printed in front of amounts
pub const CURRENCY_SYMBOL: &str = "$";

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount out of range while computing {0}")]
    Overflow(&'static str),

    #[error("Division by zero")]
    DivisionByZero,
}

/// A monetary amount
///
/// Money uses rust_decimal for precise arithmetic without floating-point errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    amount: Decimal,
}

impl Money {
    /// Creates a new Money value holding `amount` unrounded
    pub fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Creates Money from an integer amount in cents
    pub fn from_minor(minor_units: i64) -> Self {
        Self::new(Decimal::new(minor_units, CENT_PLACES))
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self { amount: dec!(0) }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Rounds to whole cents, half-up
    pub fn round_to_cents(&self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(CENT_PLACES, CENT_ROUNDING),
        }
    }

    /// Returns this amount, or zero when it is negative
    pub fn clamp_non_negative(&self) -> Self {
        if self.is_negative() {
            Self::zero()
        } else {
            *self
        }
    }

    /// Adds, failing instead of overflowing
    pub fn checked_add(&self, other: Money) -> Result<Self, MoneyError> {
        self.amount
            .checked_add(other.amount)
            .map(Self::new)
            .ok_or(MoneyError::Overflow("sum"))
    }

    /// Multiplies by a scalar, failing instead of overflowing
    pub fn checked_mul(&self, factor: Decimal) -> Result<Self, MoneyError> {
        self.amount
            .checked_mul(factor)
            .map(Self::new)
            .ok_or(MoneyError::Overflow("product"))
    }

    /// Multiplies by a scalar, capping at the largest representable amount
    pub fn saturating_mul(&self, factor: Decimal) -> Self {
        Self::new(self.amount.saturating_mul(factor))
    }

    /// Divides by a scalar
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        self.amount
            .checked_div(divisor)
            .map(Self::new)
            .ok_or(MoneyError::Overflow("quotient"))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.dp$}",
            CURRENCY_SYMBOL,
            self.amount,
            dp = CENT_PLACES as usize
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.amount + other.amount)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.amount - other.amount)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Represents a percentage rate (e.g., interest rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.05 for 5%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a percentage (e.g., 5.0 for 5%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Returns true for a negative rate
    pub fn is_negative(&self) -> bool {
        self.value.is_sign_negative() && !self.value.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().round_dp(4).normalize())
    }
}
