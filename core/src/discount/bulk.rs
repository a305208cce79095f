//! Quantity-triggered discount.

use super::{DiscountContext, DiscountResult, DiscountStrategy};
use crate::config::PricingConfiguration;
use crate::types::BulkDiscountRule;

/// Discounts a category once its quantity reaches a configured threshold
///
/// When several rules could trigger for the same category, the first one in
/// configured order wins, even if a later rule would discount more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkDiscountStrategy {
    rules: Vec<BulkDiscountRule>,
}

impl BulkDiscountStrategy {
    /// Discount type identifier
    pub const DISCOUNT_TYPE: &'static str = "BULK_DISCOUNT";
    /// Display name
    pub const DISPLAY_NAME: &'static str = "Bulk Purchase Discount";
    /// Priority relative to other strategies
    pub const PRIORITY: i32 = 100;

    /// Creates a strategy over explicit rules
    #[must_use]
    pub const fn new(rules: Vec<BulkDiscountRule>) -> Self {
        Self { rules }
    }

    /// Creates a strategy over the configured bulk rules
    #[must_use]
    pub fn from_config(config: &PricingConfiguration) -> Self {
        Self::new(config.bulk_discounts().to_vec())
    }

    fn find_rule(&self, context: &DiscountContext) -> Option<&BulkDiscountRule> {
        self.rules
            .iter()
            .find(|rule| rule.matches(context.category, context.quantity))
    }
}

impl DiscountStrategy for BulkDiscountStrategy {
    fn is_applicable(&self, context: &DiscountContext) -> bool {
        self.find_rule(context).is_some()
    }

    fn evaluate(&self, context: &DiscountContext) -> DiscountResult {
        let Some(rule) = self.find_rule(context) else {
            return DiscountResult::no_discount(format!(
                "No applicable bulk discount found for {}",
                context.category
            ));
        };

        let amount = context.base_total_cost * rule.rate;
        tracing::debug!(
            category = %context.category,
            quantity = context.quantity,
            threshold = rule.threshold,
            rate = %rule.rate,
            amount = %amount,
            "Bulk discount"
        );
        DiscountResult::applied(self.discount_type(), self.display_name(), amount, rule.rate)
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
