//! Given-When-Then builder for pricing a transaction.
//!
//! # Example
//!
//! ```
//! use cinema_pricing_core::{StandardPricingEngine, TicketCategory};
//! use cinema_pricing_testing::{reference_config, test_clock, PricingTest};
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let engine = StandardPricingEngine::with_clock(&reference_config(), Arc::new(test_clock()));
//!
//! PricingTest::new(&engine)
//!     .given_customer("John Smith", 70)
//!     .given_customer("Jane Doe", 5)
//!     .when_priced(2)
//!     .then_ticket(TicketCategory::Senior, 1, dec!(17.50))
//!     .then_total(dec!(22.50))
//!     .run();
//! ```

use cinema_pricing_core::{
    Customer, PricingEngine, PricingError, TicketCategory, TransactionCalculation, TransactionId,
};
use rust_decimal::Decimal;

type CalculationAssertion<'a> = Box<dyn FnOnce(&TransactionCalculation) + 'a>;
type ErrorAssertion<'a> = Box<dyn FnOnce(&PricingError) + 'a>;

/// Fluent builder for pricing engine tests
///
/// A test either expects a calculation (`then_*` calculation assertions) or an
/// error (`then_error`); mixing both fails the run.
pub struct PricingTest<'a> {
    engine: &'a dyn PricingEngine,
    customers: Vec<Customer>,
    transaction_id: Option<TransactionId>,
    calculation_assertions: Vec<CalculationAssertion<'a>>,
    error_assertions: Vec<ErrorAssertion<'a>>,
}

impl<'a> PricingTest<'a> {
    /// Create a new test against `engine`
    #[must_use]
    pub fn new(engine: &'a dyn PricingEngine) -> Self {
        Self {
            engine,
            customers: Vec::new(),
            transaction_id: None,
            calculation_assertions: Vec::new(),
            error_assertions: Vec::new(),
        }
    }

    /// Add one customer (Given)
    #[must_use]
    pub fn given_customer(mut self, name: &str, age: i32) -> Self {
        self.customers.push(Customer::new(name, age));
        self
    }

    /// Add several customers (Given)
    #[must_use]
    pub fn given_customers(mut self, customers: impl IntoIterator<Item = Customer>) -> Self {
        self.customers.extend(customers);
        self
    }

    /// Price the customers under `transaction_id` (When)
    #[must_use]
    pub fn when_priced(mut self, transaction_id: i64) -> Self {
        self.transaction_id = Some(TransactionId::new(transaction_id));
        self
    }

    /// Add an assertion about the resulting calculation (Then)
    #[must_use]
    pub fn then_calculation<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&TransactionCalculation) + 'a,
    {
        self.calculation_assertions.push(Box::new(assertion));
        self
    }

    /// Assert the transaction total (Then)
    #[must_use]
    #[allow(clippy::panic)] // Test assertion
    pub fn then_total(self, expected: Decimal) -> Self {
        self.then_calculation(move |calculation| {
            assert_eq!(
                calculation.total_cost(),
                expected,
                "unexpected total for transaction {}",
                calculation.transaction_id()
            );
        })
    }

    /// Assert the quantity and total of one category line (Then)
    #[must_use]
    #[allow(clippy::panic)] // Test assertion
    pub fn then_ticket(self, category: TicketCategory, quantity: u32, total: Decimal) -> Self {
        self.then_calculation(move |calculation| {
            let Some(line) = calculation.ticket(category) else {
                panic!("Expected a {category} line, found {:?}", calculation.ticket_calculations());
            };
            assert_eq!(line.quantity, quantity, "unexpected {category} quantity");
            assert_eq!(line.total_cost, total, "unexpected {category} total");
        })
    }

    /// Add an assertion about the error the engine must return (Then)
    #[must_use]
    pub fn then_error<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&PricingError) + 'a,
    {
        self.error_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if the transaction id is not set, if the outcome contradicts the
    /// registered assertions, or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let transaction_id = self
            .transaction_id
            .expect("Transaction must be priced with when_priced()");

        match self.engine.calculate_price(transaction_id, &self.customers) {
            Ok(calculation) => {
                assert!(
                    self.error_assertions.is_empty(),
                    "Expected {} engine to fail, but it priced {calculation:?}",
                    self.engine.name()
                );
                for assertion in self.calculation_assertions {
                    assertion(&calculation);
                }
            }
            Err(error) => {
                assert!(
                    self.calculation_assertions.is_empty(),
                    "Expected {} engine to price the transaction, but it failed: {error}",
                    self.engine.name()
                );
                for assertion in self.error_assertions {
                    assertion(&error);
                }
            }
        }
    }
}

/// Helper assertions for calculations
pub mod assertions {
    use cinema_pricing_core::{TransactionCalculation, round_money};
    use rust_decimal::Decimal;

    /// Assert the total equals the rounded sum of the line totals
    ///
    /// # Panics
    ///
    /// Panics if the total drifted from its lines.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_total_is_rounded_sum(calculation: &TransactionCalculation) {
        let sum: Decimal = calculation
            .ticket_calculations()
            .iter()
            .map(|ticket| ticket.total_cost)
            .sum();
        assert_eq!(calculation.total_cost(), round_money(sum));
    }

    /// Assert lines are sorted by category display name with no category repeated
    ///
    /// # Panics
    ///
    /// Panics if two lines are out of order or share a category.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_lines_ordered(calculation: &TransactionCalculation) {
        for pair in calculation.ticket_calculations().windows(2) {
            assert!(
                pair[0].category.display_name() < pair[1].category.display_name(),
                "lines out of order: {:?}",
                calculation.ticket_calculations()
            );
        }
    }

    /// Assert no line or total is negative and every amount has at most two decimals
    ///
    /// # Panics
    ///
    /// Panics if an amount is negative or carries sub-cent digits.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_money_well_formed(calculation: &TransactionCalculation) {
        let amounts = calculation
            .ticket_calculations()
            .iter()
            .map(|ticket| ticket.total_cost)
            .chain(std::iter::once(calculation.total_cost()));
        for amount in amounts {
            assert!(amount >= Decimal::ZERO, "negative amount {amount}");
            assert_eq!(amount, round_money(amount), "unrounded amount {amount}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinema_pricing_core::{CategoryCounts, TicketCalculation};
    use rust_decimal_macros::dec;

    /// Prices every customer at a flat 10.00 as an adult
    struct FlatEngine;

    impl PricingEngine for FlatEngine {
        fn name(&self) -> &'static str {
            "flat"
        }

        fn calculate_price(
            &self,
            transaction_id: TransactionId,
            customers: &[Customer],
        ) -> Result<TransactionCalculation, PricingError> {
            if customers.is_empty() {
                return Err(PricingError::InvalidInput("empty".to_string()));
            }
            let mut counts = CategoryCounts::new();
            counts.insert(TicketCategory::Adult, u32::try_from(customers.len()).unwrap_or(0));
            let tickets = counts
                .iter()
                .map(|(category, quantity)| {
                    TicketCalculation::new(
                        *category,
                        *quantity,
                        Decimal::from(*quantity) * dec!(10.00),
                        false,
                    )
                })
                .collect();
            Ok(TransactionCalculation::from_tickets(transaction_id, tickets))
        }
    }

    #[test]
    fn test_pricing_test_calculation() {
        PricingTest::new(&FlatEngine)
            .given_customer("a", 30)
            .given_customer("b", 31)
            .when_priced(7)
            .then_ticket(TicketCategory::Adult, 2, dec!(20.00))
            .then_total(dec!(20.00))
            .then_calculation(|calculation| {
                assert_eq!(calculation.transaction_id(), TransactionId::new(7));
                assertions::assert_total_is_rounded_sum(calculation);
                assertions::assert_lines_ordered(calculation);
                assertions::assert_money_well_formed(calculation);
            })
            .run();
    }

    #[test]
    fn test_pricing_test_error() {
        PricingTest::new(&FlatEngine)
            .when_priced(1)
            .then_error(|error| assert!(matches!(error, PricingError::InvalidInput(_))))
            .run();
    }

    #[test]
    #[should_panic(expected = "Expected flat engine to fail")]
    fn test_pricing_test_unexpected_success() {
        PricingTest::new(&FlatEngine)
            .given_customer("a", 30)
            .when_priced(1)
            .then_error(|_| {})
            .run();
    }
}
