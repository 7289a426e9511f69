//! Request and response types for the lending use cases

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::Money;
use domain_lending::{Borrower, Frequency, Loan, LoanBalance, LoanTerms, MAX_INSTALLMENTS};

/// Request to lend money to a borrower
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewLoanRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub address: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub collateral: String,
    pub principal: Decimal,
    /// Interest as a percentage of principal
    pub interest_rate: Decimal,
    #[serde(deserialize_with = "deserialize_frequency")]
    pub frequency: Frequency,
    /// Zero passes here and is rejected as invalid terms
    #[validate(range(max = MAX_INSTALLMENTS))]
    pub installment_count: u32,
}

impl NewLoanRequest {
    pub fn borrower(&self) -> Borrower {
        Borrower::new(self.name.trim())
            .with_phone(self.phone.trim())
            .with_address(self.address.trim())
            .with_collateral(self.collateral.trim())
    }

    pub fn terms(&self) -> LoanTerms {
        LoanTerms::new(
            Money::new(self.principal),
            self.interest_rate,
            self.frequency,
            self.installment_count,
        )
    }
}

/// Accepts any frequency spelling; unrecognized values fall back to monthly
fn deserialize_frequency<'de, D>(deserializer: D) -> Result<Frequency, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(Frequency::from_form_value(&value))
}

/// Replacement contact details for a borrower
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BorrowerDetails {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub address: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub collateral: String,
}

impl From<BorrowerDetails> for Borrower {
    fn from(details: BorrowerDetails) -> Self {
        Borrower::new(details.name.trim())
            .with_phone(details.phone.trim())
            .with_address(details.address.trim())
            .with_collateral(details.collateral.trim())
    }
}

/// A refreshed loan together with its balance figures
#[derive(Debug, Clone, Serialize)]
pub struct LoanView {
    pub loan: Loan,
    pub balance: LoanBalance,
}

/// Input file for the `loan-statement` tool
#[derive(Debug, Clone, Deserialize)]
pub struct StatementRequest {
    #[serde(flatten)]
    pub loan: NewLoanRequest,
    /// Date the loan was made; today when absent
    #[serde(default)]
    pub origination_date: Option<NaiveDate>,
    /// Sequence numbers of installments already paid
    #[serde(default)]
    pub paid: Vec<u32>,
    /// Date to assess lateness against; today when absent
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request_json() -> serde_json::Value {
        serde_json::json!({
            "name": "  Maria Lopez ",
            "phone": "555-0101",
            "principal": "1000",
            "interest_rate": "10",
            "frequency": "quincenal",
            "installment_count": 4
        })
    }

    #[test]
    fn test_request_maps_to_domain() {
        let request: NewLoanRequest = serde_json::from_value(request_json()).unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.borrower().name, "Maria Lopez");
        assert_eq!(request.borrower().address, "");

        let terms = request.terms();
        assert_eq!(terms.principal.amount(), dec!(1000));
        assert_eq!(terms.frequency, Frequency::Biweekly);
        assert_eq!(terms.installment_count, 4);
    }

    #[test]
    fn test_unknown_frequency_falls_back_to_monthly() {
        let mut json = request_json();
        json["frequency"] = serde_json::json!("yearly");

        let request: NewLoanRequest = serde_json::from_value(json).unwrap();

        assert_eq!(request.frequency, Frequency::Monthly);
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let mut json = request_json();
        json["name"] = serde_json::json!("");

        let request: NewLoanRequest = serde_json::from_value(json).unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_installment_count_is_capped() {
        let mut json = request_json();
        json["installment_count"] = serde_json::json!(MAX_INSTALLMENTS + 1);

        let request: NewLoanRequest = serde_json::from_value(json).unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("installment_count"));
    }

    #[test]
    fn test_overlong_phone_fails_validation() {
        let details = BorrowerDetails {
            name: "Maria Lopez".to_string(),
            phone: "5".repeat(51),
            address: String::new(),
            collateral: String::new(),
        };

        assert!(details.validate().is_err());
    }

    #[test]
    fn test_statement_request_flattens_loan() {
        let mut json = request_json();
        json["origination_date"] = serde_json::json!("2024-01-01");
        json["paid"] = serde_json::json!([1, 2]);

        let request: StatementRequest = serde_json::from_value(json).unwrap();

        assert_eq!(request.loan.name, "  Maria Lopez ");
        assert_eq!(request.origination_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(request.paid, vec![1, 2]);
        assert!(request.as_of.is_none());
    }
}
