//! Core Kernel - Foundational types and utilities for the loan ledger
//!
//! This crate provides the fundamental building blocks used by the lending domain:
//! - Money types with precise decimal arithmetic and cent rounding
//! - Calendar helpers and an injectable clock
//! - Common identifiers, errors and port infrastructure

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use money::{Money, Rate, MoneyError};
pub use temporal::{Clock, FixedClock, SystemClock, Timezone, TemporalError};
pub use identifiers::{LoanId, InstallmentId};
pub use error::CoreError;
pub use ports::{PortError, DomainPort};
