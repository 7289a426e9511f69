//! Loan Statement Tool
//!
//! Reads a loan description from a JSON file, replays it through the lending
//! use cases and prints the payment history.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin loan-statement -- loan.json
//! ```
//!
//! ```json
//! {
//!   "name": "Maria Lopez",
//!   "phone": "555-0101",
//!   "principal": "1000",
//!   "interest_rate": "10",
//!   "frequency": "monthly",
//!   "installment_count": 4,
//!   "origination_date": "2024-01-01",
//!   "paid": [1],
//!   "as_of": "2024-02-05"
//! }
//! ```
//!
//! # Environment Variables
//!
//! * `LENDING_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `LENDING_TIMEZONE` - IANA timezone that decides today's date (default: UTC)
//! * `LENDING_LATE_FEE_PER_DAY` - Penalty per overdue day (default: 50)

use std::sync::Arc;

use anyhow::Context;

use core_kernel::{Clock, FixedClock};
use domain_lending::InMemoryLoanRepository;
use lending_service::{telemetry::init_tracing, LoanService, ServiceConfig, StatementRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServiceConfig::from_env().context("invalid LENDING_* configuration")?;
    init_tracing(&config.log_level);

    let path = std::env::args()
        .nth(1)
        .context("usage: loan-statement <loan.json>")?;
    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let request: StatementRequest =
        serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?;

    let today = config.clock()?.today();
    let origination_date = request.origination_date.unwrap_or(today);
    let as_of = request.as_of.unwrap_or(today);
    tracing::info!(%origination_date, %as_of, "Building statement");

    let repository = Arc::new(InMemoryLoanRepository::new());
    let engine = config.balance_engine();

    let desk = LoanService::new(
        repository.clone(),
        Arc::new(FixedClock(origination_date)),
        engine,
    );
    let loan = desk.create_loan(request.loan).await?;
    for sequence_number in request.paid {
        desk.record_payment(loan.id, sequence_number).await?;
    }

    let history = LoanService::new(repository, Arc::new(FixedClock(as_of)), engine)
        .payment_history(loan.id)
        .await?;

    println!("{history}");
    Ok(())
}
