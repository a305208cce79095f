//! Category pricing and transaction orchestration.
//!
//! ```text
//! customers ──► AgeRangeResolver ──► category counts
//!                                        │
//!                 per category ──► CategoryPricingStrategy (BasePriceTable + DiscountEngine)
//!                                        │
//!                                        ▼
//!                       TransactionCalculation (sorted lines, rounded total)
//! ```

use crate::age::AgeRangeResolver;
use crate::config::PricingConfiguration;
use crate::discount::{DiscountContext, DiscountEngine, DiscountSummary};
use crate::environment::{Clock, SystemClock};
use crate::error::PricingError;
use crate::price::BasePriceTable;
use crate::types::{
    CategoryCounts, Customer, TicketCalculation, TicketCategory, TransactionCalculation,
    TransactionId, round_money,
};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Prices one ticket category within a transaction
pub trait CategoryPricingStrategy: Send + Sync {
    /// Final cost of `quantity` tickets of `category`, never negative, rounded to cents
    fn cost_for(
        &self,
        category: TicketCategory,
        quantity: u32,
        counts: &CategoryCounts,
    ) -> Decimal;

    /// Whether any discount applies to `quantity` tickets of `category`
    fn has_discount(
        &self,
        category: TicketCategory,
        quantity: u32,
        counts: &CategoryCounts,
    ) -> bool;

    /// Priced line for the category
    fn price(
        &self,
        category: TicketCategory,
        quantity: u32,
        counts: &CategoryCounts,
    ) -> TicketCalculation {
        TicketCalculation::new(
            category,
            quantity,
            self.cost_for(category, quantity, counts),
            self.has_discount(category, quantity, counts),
        )
    }
}

/// Base price table plus discount engine
pub struct StandardPricingStrategy {
    prices: BasePriceTable,
    discounts: DiscountEngine,
    clock: Arc<dyn Clock>,
}

impl StandardPricingStrategy {
    /// Creates a strategy from its parts
    #[must_use]
    pub fn new(prices: BasePriceTable, discounts: DiscountEngine, clock: Arc<dyn Clock>) -> Self {
        Self {
            prices,
            discounts,
            clock,
        }
    }

    /// Strategy with the configured prices and the standard discount strategies
    #[must_use]
    pub fn from_config(config: &PricingConfiguration, clock: Arc<dyn Clock>) -> Self {
        Self::new(*config.base_prices(), DiscountEngine::standard(config), clock)
    }

    fn summarize(
        &self,
        category: TicketCategory,
        quantity: u32,
        counts: &CategoryCounts,
    ) -> (DiscountContext, DiscountSummary) {
        let context = DiscountContext::new(
            category,
            quantity,
            self.prices.price_for(category),
            counts.clone(),
            self.clock.now(),
        );
        let summary = self.discounts.apply_discounts(&context);
        (context, summary)
    }
}

fn final_cost(context: &DiscountContext, summary: &DiscountSummary) -> Decimal {
    let discounted = context.base_total_cost - summary.total_discount_amount();
    round_money(discounted.max(Decimal::ZERO))
}

impl CategoryPricingStrategy for StandardPricingStrategy {
    fn cost_for(
        &self,
        category: TicketCategory,
        quantity: u32,
        counts: &CategoryCounts,
    ) -> Decimal {
        let (context, summary) = self.summarize(category, quantity, counts);
        final_cost(&context, &summary)
    }

    fn has_discount(
        &self,
        category: TicketCategory,
        quantity: u32,
        counts: &CategoryCounts,
    ) -> bool {
        self.summarize(category, quantity, counts).1.has_discounts()
    }

    fn price(
        &self,
        category: TicketCategory,
        quantity: u32,
        counts: &CategoryCounts,
    ) -> TicketCalculation {
        let (context, summary) = self.summarize(category, quantity, counts);
        let total_cost = final_cost(&context, &summary);
        tracing::debug!(
            category = %category,
            quantity,
            base_total = %context.base_total_cost,
            discount = %summary.total_discount_amount(),
            total = %total_cost,
            "Priced category"
        );
        TicketCalculation::new(category, quantity, total_cost, summary.has_discounts())
    }
}

/// Prices a whole transaction
///
/// Implementations are pure functions of their configuration and the input, and
/// safe to call concurrently.
pub trait PricingEngine: Send + Sync {
    /// Short backend name, for logs
    fn name(&self) -> &'static str;

    /// Price every customer in the transaction.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidInput`] if `customers` is empty or a customer is
    /// invalid, and [`PricingError::UnresolvableAge`] if an age falls outside every
    /// configured range. No partial result is produced.
    fn calculate_price(
        &self,
        transaction_id: TransactionId,
        customers: &[Customer],
    ) -> Result<TransactionCalculation, PricingError>;
}

/// Reject a request before any computation.
///
/// # Errors
///
/// Returns [`PricingError::InvalidInput`] if there are no customers or any customer
/// fails [`Customer::validate`].
pub fn validate_customers(customers: &[Customer]) -> Result<(), PricingError> {
    if customers.is_empty() {
        return Err(PricingError::InvalidInput(
            "Customers list cannot be null or empty".to_string(),
        ));
    }
    customers.iter().try_for_each(Customer::validate)
}

/// Direct strategy-composition backend
pub struct StandardPricingEngine<S = StandardPricingStrategy> {
    resolver: AgeRangeResolver,
    strategy: S,
}

impl StandardPricingEngine {
    /// Engine over the configured ranges, prices and discounts, stamped by the system clock
    #[must_use]
    pub fn from_config(config: &PricingConfiguration) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Engine over the configuration with an injected clock
    #[must_use]
    pub fn with_clock(config: &PricingConfiguration, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            AgeRangeResolver::new(config.age_ranges()),
            StandardPricingStrategy::from_config(config, clock),
        )
    }
}

impl<S: CategoryPricingStrategy> StandardPricingEngine<S> {
    /// Engine from a resolver and any category pricing strategy
    #[must_use]
    pub const fn new(resolver: AgeRangeResolver, strategy: S) -> Self {
        Self { resolver, strategy }
    }
}

impl<S: CategoryPricingStrategy> PricingEngine for StandardPricingEngine<S> {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn calculate_price(
        &self,
        transaction_id: TransactionId,
        customers: &[Customer],
    ) -> Result<TransactionCalculation, PricingError> {
        validate_customers(customers)?;
        tracing::debug!(
            transaction_id = %transaction_id,
            customers = customers.len(),
            "Calculating ticket prices"
        );

        let counts = self.resolver.count_categories(customers)?;
        let tickets = counts
            .iter()
            .map(|(category, quantity)| self.strategy.price(*category, *quantity, &counts))
            .collect();

        let calculation = TransactionCalculation::from_tickets(transaction_id, tickets);
        tracing::debug!(
            transaction_id = %transaction_id,
            total = %calculation.total_cost(),
            "Transaction priced"
        );
        Ok(calculation)
    }
}
