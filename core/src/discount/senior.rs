//! Flat-rate discount for senior tickets.

use super::{DiscountContext, DiscountResult, DiscountStrategy};
use crate::config::PricingConfiguration;
use crate::types::TicketCategory;
use rust_decimal::Decimal;

/// Takes the configured senior rate off every senior ticket, regardless of quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeniorDiscountStrategy {
    rate: Decimal,
}

impl SeniorDiscountStrategy {
    /// Discount type identifier
    pub const DISCOUNT_TYPE: &'static str = "SENIOR_DISCOUNT";
    /// Display name
    pub const DISPLAY_NAME: &'static str = "Senior Citizen Discount";
    /// Priority relative to other strategies
    pub const PRIORITY: i32 = 150;

    /// Creates a strategy with an explicit rate
    #[must_use]
    pub const fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    /// Creates a strategy with the configured senior rate
    #[must_use]
    pub const fn from_config(config: &PricingConfiguration) -> Self {
        Self::new(config.senior_discount_rate())
    }
}

impl DiscountStrategy for SeniorDiscountStrategy {
    fn is_applicable(&self, context: &DiscountContext) -> bool {
        context.category == TicketCategory::Senior
    }

    fn evaluate(&self, context: &DiscountContext) -> DiscountResult {
        let amount = context.base_total_cost * self.rate;
        tracing::debug!(
            category = %context.category,
            quantity = context.quantity,
            rate = %self.rate,
            amount = %amount,
            "Senior discount"
        );
        DiscountResult::applied(self.discount_type(), self.display_name(), amount, self.rate)
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn discount_type(&self) -> &str {
        Self::DISCOUNT_TYPE
    }

    fn display_name(&self) -> &str {
        Self::DISPLAY_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CategoryCounts;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn context(category: TicketCategory, quantity: u32, unit: Decimal) -> DiscountContext {
        DiscountContext::new(category, quantity, unit, CategoryCounts::new(), Utc::now())
    }

    #[test]
    fn test_applies_only_to_seniors() {
        let strategy = SeniorDiscountStrategy::new(dec!(0.30));

        assert!(strategy.is_applicable(&context(TicketCategory::Senior, 1, dec!(25))));
        assert!(!strategy.is_applicable(&context(TicketCategory::Adult, 1, dec!(25))));
        assert!(!strategy.is_applicable(&context(TicketCategory::Children, 5, dec!(5))));
    }

    #[test]
    fn test_amount_scales_with_quantity() {
        let strategy = SeniorDiscountStrategy::new(dec!(0.30));

        let single = strategy.evaluate(&context(TicketCategory::Senior, 1, dec!(25.00)));
        assert!(single.applied);
        assert_eq!(single.amount, dec!(7.5));
        assert_eq!(single.discount_type, "SENIOR_DISCOUNT");

        let triple = strategy.evaluate(&context(TicketCategory::Senior, 3, dec!(25.00)));
        assert_eq!(triple.amount, dec!(22.5));
        assert_eq!(triple.rate, dec!(0.30));
    }
}
