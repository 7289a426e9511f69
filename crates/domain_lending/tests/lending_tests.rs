//! Comprehensive tests for domain_lending

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Money;

use domain_lending::{
    BalanceEngine, Borrower, Frequency, InstallmentStatus, LendingError, Loan, LoanTerms,
    PaymentHistory, ScheduleGenerator,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn terms(principal: Decimal, rate: Decimal, frequency: Frequency, count: u32) -> LoanTerms {
    LoanTerms::new(Money::new(principal), rate, frequency, count)
}

// ============================================================================
// Schedule Tests
// ============================================================================

mod schedule_tests {
    use super::*;

    #[test]
    fn test_documented_monthly_example() {
        let origination = date(2024, 3, 1);
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(1000), dec!(10), Frequency::Monthly, 4), origination)
            .unwrap();

        assert_eq!(schedule.total_due.amount(), dec!(1100.00));
        assert_eq!(schedule.installment_amount.amount(), dec!(275.00));
        for (i, installment) in schedule.installments.iter().enumerate() {
            let n = i as u64 + 1;
            assert_eq!(installment.sequence_number as u64, n);
            assert_eq!(installment.due_date, origination + Days::new(30 * n));
            assert_eq!(installment.status, InstallmentStatus::Pending);
            assert_eq!(installment.amount, schedule.installment_amount);
        }
    }

    #[test]
    fn test_monthly_ignores_calendar_months() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(100), dec!(0), Frequency::Monthly, 2), date(2024, 1, 31))
            .unwrap();

        assert_eq!(schedule.installments[0].due_date, date(2024, 3, 1));
        assert_eq!(schedule.installments[1].due_date, date(2024, 3, 31));
    }

    #[test]
    fn test_fractional_rate() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(333.33), dec!(12.5), Frequency::Weekly, 7), date(2024, 1, 1))
            .unwrap();

        // 333.33 * 1.125 = 374.99625
        assert_eq!(schedule.total_due.amount(), dec!(375.00));
        assert_eq!(schedule.installment_amount.amount(), dec!(53.57));
    }

    #[test]
    fn test_single_installment_equals_total() {
        let schedule = ScheduleGenerator::new()
            .generate(&terms(dec!(250), dec!(20), Frequency::Biweekly, 1), date(2024, 1, 1))
            .unwrap();

        assert_eq!(schedule.installments.len(), 1);
        assert_eq!(schedule.installment_amount, schedule.total_due);
        assert_eq!(schedule.installments[0].label, "Fortnight 1");
    }

    #[test]
    fn test_negative_principal_rejected() {
        let result = ScheduleGenerator::new()
            .generate(&terms(dec!(-5), dec!(0), Frequency::Weekly, 1), date(2024, 1, 1));

        assert!(matches!(result, Err(LendingError::InvalidLoanTerms(_))));
    }

    #[test]
    fn test_overflowing_amounts_rejected() {
        let generator = ScheduleGenerator::new();

        let huge_principal = generator.generate(
            &terms(Decimal::MAX, dec!(10), Frequency::Monthly, 4),
            date(2024, 1, 1),
        );
        let huge_rate = generator.generate(
            &terms(dec!(1000000), Decimal::MAX, Frequency::Monthly, 4),
            date(2024, 1, 1),
        );

        assert!(matches!(huge_principal, Err(LendingError::InvalidLoanTerms(_))));
        assert!(matches!(huge_rate, Err(LendingError::InvalidLoanTerms(_))));
    }

    #[test]
    fn test_oversized_count_rejected_without_building() {
        let result = ScheduleGenerator::new()
            .generate(&terms(dec!(100), dec!(0), Frequency::Weekly, u32::MAX), date(2024, 1, 1));

        assert!(matches!(result, Err(LendingError::InvalidLoanTerms(_))));
    }

    #[test]
    fn test_schedule_past_calendar_rejected() {
        let result = ScheduleGenerator::new()
            .generate(&terms(dec!(10), dec!(0), Frequency::Monthly, 2), NaiveDate::MAX);

        assert!(matches!(result, Err(LendingError::InvalidLoanTerms(_))));
    }
}

// ============================================================================
// Balance Tests
// ============================================================================

mod balance_tests {
    use super::*;

    fn weekly_loan() -> Loan {
        Loan::originate(
            Borrower::new("Jose Perez"),
            terms(dec!(500), dec!(0), Frequency::Weekly, 3),
            date(2024, 1, 1),
        )
        .unwrap()
    }

    #[test]
    fn test_pending_installment_ten_days_late() {
        let loan = weekly_loan();
        let due = loan.installments[0].due_date;
        let today = due + Days::new(10);

        let snapshot = BalanceEngine::default().recompute(loan.total_due, &loan.installments, today);

        assert_eq!(snapshot.installments[0].late_days, 10);
        assert_eq!(snapshot.installments[0].penalty.amount(), dec!(500.00));
        // The second installment was due 2024-01-15, three days before today
        assert_eq!(snapshot.installments[1].late_days, 3);
        assert_eq!(snapshot.installments[2].late_days, 0);
    }

    #[test]
    fn test_pending_penalties_do_not_reduce_balance() {
        let loan = weekly_loan();
        let snapshot =
            BalanceEngine::default().recompute(loan.total_due, &loan.installments, date(2024, 6, 1));

        assert!(snapshot.total_paid.is_zero());
        assert_eq!(snapshot.outstanding.amount(), dec!(500.00));
        assert!(!snapshot.settled);
    }

    #[test]
    fn test_late_payment_penalty_is_never_collected() {
        let mut loan = weekly_loan();
        let engine = BalanceEngine::default();

        let before = loan.refresh(&engine, date(2024, 1, 18));
        assert_eq!(loan.installments[0].penalty.amount(), dec!(500.00));
        assert!(before.total_paid.is_zero());

        loan.mark_installment_paid(1).unwrap();
        let after = loan.refresh(&engine, date(2024, 1, 18));

        assert!(loan.installments[0].penalty.is_zero());
        assert_eq!(after.total_paid.amount(), dec!(166.67));
        assert_eq!(after.outstanding.amount(), dec!(333.33));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut loan = weekly_loan();
        loan.mark_installment_paid(2).unwrap();
        let engine = BalanceEngine::default();
        let today = date(2024, 2, 20);

        let first = engine.recompute(loan.total_due, &loan.installments, today);
        let second = engine.recompute(loan.total_due, &first.installments, today);

        assert_eq!(first, second);
    }

    #[test]
    fn test_penalty_is_not_accumulated_across_inquiries() {
        let mut loan = weekly_loan();
        let engine = BalanceEngine::default();

        loan.refresh(&engine, date(2024, 1, 20));
        loan.refresh(&engine, date(2024, 1, 10));

        assert_eq!(loan.installments[0].late_days, 2);
        assert_eq!(loan.installments[0].penalty.amount(), dec!(100.00));
    }

    #[test]
    fn test_penalty_tracks_later_inquiries() {
        let mut loan = weekly_loan();
        let engine = BalanceEngine::default();
        let due = loan.installments[0].due_date;

        loan.refresh(&engine, due + Days::new(3));
        assert_eq!(loan.installments[0].late_days, 3);
        assert_eq!(loan.installments[0].penalty.amount(), dec!(150.00));

        loan.refresh(&engine, due + Days::new(10));
        assert_eq!(loan.installments[0].late_days, 10);
        assert_eq!(loan.installments[0].penalty.amount(), dec!(500.00));
    }

    #[test]
    fn test_rounding_shortfall_leaves_loan_unsettled() {
        let mut loan = Loan::originate(
            Borrower::new("Luis"),
            terms(dec!(100), dec!(0), Frequency::Weekly, 3),
            date(2024, 1, 1),
        )
        .unwrap();
        for n in 1..=3 {
            loan.mark_installment_paid(n).unwrap();
        }

        let balance = loan.refresh(&BalanceEngine::default(), date(2024, 2, 1));

        assert_eq!(balance.total_paid.amount(), dec!(99.99));
        assert_eq!(balance.outstanding.amount(), dec!(0.01));
        assert!(!balance.settled);
    }
}

// ============================================================================
// Statement Tests
// ============================================================================

mod statement_tests {
    use super::*;

    #[test]
    fn test_history_totals_match_refresh() {
        let mut loan = Loan::originate(
            Borrower::new("Rosa Diaz").with_phone("555-0199"),
            terms(dec!(1000), dec!(10), Frequency::Monthly, 4),
            date(2024, 1, 1),
        )
        .unwrap();
        loan.mark_installment_paid(1).unwrap();
        loan.mark_installment_paid(2).unwrap();
        let balance = loan.refresh(&BalanceEngine::default(), date(2024, 4, 5));

        let history = PaymentHistory::new(&loan, &balance);

        assert_eq!(history.total_due.amount(), dec!(1100.00));
        assert_eq!(history.total_paid.amount(), dec!(550.00));
        assert_eq!(history.outstanding.amount(), dec!(550.00));
        assert_eq!(history.rows[2].penalty.amount(), dec!(250.00));
        assert_eq!(history.rows[0].status, InstallmentStatus::Paid);
        assert!(history.to_string().contains("Phone: 555-0199"));
    }

    #[test]
    fn test_history_serializes() {
        let mut loan = Loan::originate(
            Borrower::new("Rosa Diaz"),
            terms(dec!(90), dec!(0), Frequency::Weekly, 3),
            date(2024, 1, 1),
        )
        .unwrap();
        let balance = loan.refresh(&BalanceEngine::default(), date(2024, 1, 2));

        let json = serde_json::to_value(PaymentHistory::new(&loan, &balance)).unwrap();

        assert_eq!(json["rows"].as_array().unwrap().len(), 3);
        assert_eq!(json["rows"][0]["status"], "Pending");
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use test_utils::loan_terms_strategy;

    proptest! {
        #[test]
        fn total_covers_principal_and_installments_cover_total(terms in loan_terms_strategy()) {
            let schedule = ScheduleGenerator::new().generate(&terms, date(2024, 1, 1)).unwrap();
            let count = Decimal::from(terms.installment_count);

            prop_assert!(schedule.total_due >= terms.principal);
            let diff = (schedule.installment_amount.amount() * count - schedule.total_due.amount()).abs();
            prop_assert!(diff <= dec!(0.01) * count);
        }

        #[test]
        fn schedule_is_numbered_and_strictly_increasing(terms in loan_terms_strategy()) {
            let schedule = ScheduleGenerator::new().generate(&terms, date(2024, 1, 1)).unwrap();

            prop_assert_eq!(schedule.installments.len(), terms.installment_count as usize);
            for (i, installment) in schedule.installments.iter().enumerate() {
                prop_assert_eq!(installment.sequence_number as usize, i + 1);
            }
            for pair in schedule.installments.windows(2) {
                prop_assert!(pair[0].due_date < pair[1].due_date);
            }
        }

        #[test]
        fn balance_invariants_hold(
            terms in loan_terms_strategy(),
            paid_mask in any::<u64>(),
            days_after in 0u64..2_000u64
        ) {
            let mut loan = Loan::originate(Borrower::new("Prop"), terms, date(2024, 1, 1)).unwrap();
            for installment in loan.installments.iter_mut() {
                if paid_mask & (1 << (installment.sequence_number % 64)) != 0 {
                    installment.mark_paid();
                }
            }
            let today = date(2024, 1, 1) + Days::new(days_after);
            let engine = BalanceEngine::default();

            let snapshot = engine.recompute(loan.total_due, &loan.installments, today);

            prop_assert!(!snapshot.outstanding.is_negative());
            prop_assert_eq!(snapshot.settled, snapshot.outstanding.is_zero());
            for installment in snapshot.installments.iter().filter(|i| i.is_paid()) {
                prop_assert_eq!(installment.late_days, 0);
                prop_assert!(installment.penalty.is_zero());
            }
            prop_assert_eq!(
                engine.recompute(loan.total_due, &snapshot.installments, today),
                snapshot
            );
        }
    }
}
