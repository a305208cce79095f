//! Scenarios every pricing backend must pass.
//!
//! Each backend's integration tests build its engine over
//! [`reference_config`](crate::reference_config) and hand it to these functions,
//! so the standard and rule-based engines are held to the same expectations.

use crate::fixtures::customers;
use crate::pricing_test::{PricingTest, assertions};
use cinema_pricing_core::{Customer, PricingEngine, PricingError, TicketCategory, TransactionId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One expected pricing outcome under the reference configuration
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Short label used in failure messages
    pub name: &'static str,
    /// Transaction id priced
    pub transaction_id: i64,
    /// Customers in the transaction
    pub customers: Vec<Customer>,
    /// Expected `(category, quantity, total)` lines
    pub lines: Vec<(TicketCategory, u32, Decimal)>,
    /// Expected transaction total
    pub total: Decimal,
}

/// The four reference transactions
#[must_use]
pub fn reference_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "single adult",
            transaction_id: 1,
            customers: customers(&[("Billy Kidd", 30)]),
            lines: vec![(TicketCategory::Adult, 1, dec!(25.00))],
            total: dec!(25.00),
        },
        Scenario {
            name: "senior and two children",
            transaction_id: 2,
            customers: customers(&[("John Smith", 70), ("Jane Doe", 5), ("Bob Doe", 6)]),
            lines: vec![
                (TicketCategory::Children, 2, dec!(10.00)),
                (TicketCategory::Senior, 1, dec!(17.50)),
            ],
            total: dec!(27.50),
        },
        Scenario {
            name: "adult, three children and a teen",
            transaction_id: 3,
            customers: customers(&[
                ("Billy Kidd", 36),
                ("Zoe Daniels", 3),
                ("George White", 8),
                ("Tommy Anderson", 9),
                ("Joe Smith", 17),
            ]),
            lines: vec![
                (TicketCategory::Adult, 1, dec!(25.00)),
                (TicketCategory::Children, 3, dec!(11.25)),
                (TicketCategory::Teen, 1, dec!(12.00)),
            ],
            total: dec!(48.25),
        },
        Scenario {
            name: "one of each category",
            transaction_id: 4,
            customers: customers(&[
                ("Jesse James", 36),
                ("Daniel Anderson", 95),
                ("Mary Jones", 15),
                ("Michelle Parker", 10),
            ]),
            lines: vec![
                (TicketCategory::Adult, 1, dec!(25.00)),
                (TicketCategory::Children, 1, dec!(5.00)),
                (TicketCategory::Senior, 1, dec!(17.50)),
                (TicketCategory::Teen, 1, dec!(12.00)),
            ],
            total: dec!(59.50),
        },
    ]
}

/// Price every reference scenario with `engine` and check lines and totals
///
/// `engine` must be built over the reference configuration.
///
/// # Panics
///
/// Panics if any scenario prices differently.
#[allow(clippy::panic)] // Test assertion
pub fn assert_reference_scenarios(engine: &dyn PricingEngine) {
    for scenario in reference_scenarios() {
        let expected_lines = scenario.lines.len();
        let name = scenario.name;
        let mut test = PricingTest::new(engine)
            .given_customers(scenario.customers)
            .when_priced(scenario.transaction_id);
        for (category, quantity, total) in scenario.lines {
            test = test.then_ticket(category, quantity, total);
        }
        test.then_total(scenario.total)
            .then_calculation(move |calculation| {
                assert_eq!(
                    calculation.ticket_calculations().len(),
                    expected_lines,
                    "unexpected line count for {name}"
                );
                assert_eq!(
                    calculation.transaction_id(),
                    TransactionId::new(scenario.transaction_id)
                );
                assertions::assert_lines_ordered(calculation);
                assertions::assert_total_is_rounded_sum(calculation);
            })
            .run();
    }
}

/// Price half-cent lines with `engine` and check each line and the total round half up
///
/// `engine` must be built over [`rounding_config`](crate::rounding_config). Lines are
/// rounded to cents first and the transaction total is rounded again over their sum:
///
/// | Line          | Unrounded                          | Rounded |
/// |---------------|------------------------------------|---------|
/// | 1 × Senior    | 17.50 − 33% = 11.725               | 11.73   |
/// | 3 × Children  | 15.03 − 25% = 11.2725              | 11.27   |
/// | 1 × Adult     | 25.00                              | 25.00   |
///
/// # Panics
///
/// Panics if a line or the total is rounded any other way.
#[allow(clippy::panic)] // Test assertion
pub fn assert_lines_and_total_rounded_half_up(engine: &dyn PricingEngine) {
    PricingTest::new(engine)
        .given_customers(customers(&[
            ("Edna Mole", 72),
            ("Ann Lee", 4),
            ("Ben Lee", 6),
            ("Cal Lee", 9),
            ("Dan Lee", 40),
        ]))
        .when_priced(7)
        .then_ticket(TicketCategory::Senior, 1, dec!(11.73))
        .then_ticket(TicketCategory::Children, 3, dec!(11.27))
        .then_ticket(TicketCategory::Adult, 1, dec!(25.00))
        .then_total(dec!(48.00))
        .then_calculation(|calculation| {
            let senior = calculation
                .ticket(TicketCategory::Senior)
                .map(|ticket| ticket.total_cost);
            assert_ne!(senior, Some(dec!(11.72)), "senior line rounded half to even");
            assertions::assert_total_is_rounded_sum(calculation);
        })
        .run();
}

/// Check the rejection paths every backend shares
///
/// # Panics
///
/// Panics if an invalid transaction is priced or fails with the wrong error.
#[allow(clippy::panic)] // Test assertion
pub fn assert_rejects_invalid_input(engine: &dyn PricingEngine) {
    PricingTest::new(engine)
        .when_priced(99)
        .then_error(|error| {
            assert!(matches!(error, PricingError::InvalidInput(_)), "got {error:?}");
        })
        .run();

    PricingTest::new(engine)
        .given_customer("Valid", 30)
        .given_customer("", 30)
        .when_priced(100)
        .then_error(|error| {
            assert!(matches!(error, PricingError::InvalidInput(_)), "got {error:?}");
        })
        .run();

    PricingTest::new(engine)
        .given_customer("Negative", -1)
        .when_priced(101)
        .then_error(|error| {
            assert!(matches!(error, PricingError::InvalidInput(_)), "got {error:?}");
        })
        .run();
}

/// Price the same transaction with two engines and require identical results
///
/// # Panics
///
/// Panics if the engines disagree on the outcome, including the error.
#[allow(clippy::panic)] // Test assertion
pub fn assert_engines_agree(
    left: &dyn PricingEngine,
    right: &dyn PricingEngine,
    transaction_id: TransactionId,
    customers: &[Customer],
) {
    let left_result = left.calculate_price(transaction_id, customers);
    let right_result = right.calculate_price(transaction_id, customers);
    assert_eq!(
        left_result,
        right_result,
        "{} and {} engines disagree on {customers:?}",
        left.name(),
        right.name()
    );
}
