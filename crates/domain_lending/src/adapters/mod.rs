//! Storage adapters for the lending domain
//!
//! - **InMemoryLoanRepository**: process-local store, used by the statement
//!   tool and the test suites

pub mod memory;

pub use memory::InMemoryLoanRepository;
