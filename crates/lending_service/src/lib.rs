//! Lending Service
//!
//! Application layer for the loan ledger. `LoanService` runs the lending use
//! cases (create, list, view, record payment, edit borrower, delete and
//! payment history) against a `LoanRepository` and a `Clock`.
//!
//! # Modules
//!
//! - `service`: the use cases
//! - `dto`: request and response types
//! - `config`: environment configuration
//! - `telemetry`: tracing setup

pub mod config;
pub mod dto;
pub mod error;
pub mod service;
pub mod telemetry;

pub use config::ServiceConfig;
pub use dto::{BorrowerDetails, LoanView, NewLoanRequest, StatementRequest};
pub use error::ServiceError;
pub use service::LoanService;
