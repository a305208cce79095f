//! Priority-ordered composition of discount strategies.

use super::{
    BulkDiscountStrategy, DiscountContext, DiscountStrategy, DiscountSummary,
    SeniorDiscountStrategy,
};
use crate::config::PricingConfiguration;
use smallvec::SmallVec;
use std::cmp::Reverse;
use std::fmt;

/// Evaluates registered strategies and aggregates their applied discounts
///
/// Strategies are sorted once, at construction, by descending priority; equal
/// priorities keep registration order.
pub struct DiscountEngine {
    strategies: Vec<Box<dyn DiscountStrategy>>,
}

impl DiscountEngine {
    /// Register `strategies` and fix their evaluation order
    #[must_use]
    pub fn new(mut strategies: Vec<Box<dyn DiscountStrategy>>) -> Self {
        strategies.sort_by_key(|strategy| Reverse(strategy.priority()));

        let engine = Self { strategies };
        tracing::info!(
            count = engine.strategies.len(),
            strategies = %engine.strategy_names().join(", "),
            "Initialized discount strategies"
        );
        engine
    }

    /// Engine with the senior and bulk strategies drawn from `config`
    #[must_use]
    pub fn standard(config: &PricingConfiguration) -> Self {
        Self::new(vec![
            Box::new(BulkDiscountStrategy::from_config(config)),
            Box::new(SeniorDiscountStrategy::from_config(config)),
        ])
    }

    /// Display names in evaluation order
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies
            .iter()
            .map(|strategy| strategy.display_name())
            .collect()
    }

    /// Evaluate every applicable strategy against `context`.
    ///
    /// Each amount is computed from the same base total; amounts are summed, not
    /// applied one after another. No applicable strategy yields an empty summary.
    #[must_use]
    pub fn apply_discounts(&self, context: &DiscountContext) -> DiscountSummary {
        let applied: SmallVec<_> = self
            .strategies
            .iter()
            .filter(|strategy| strategy.is_applicable(context))
            .map(|strategy| strategy.evaluate(context))
            .filter(|result| result.applied)
            .inspect(|result| {
                tracing::debug!(
                    discount = %result.display_name,
                    amount = %result.amount,
                    "Discount applied"
                );
            })
            .collect();

        let summary = DiscountSummary::new(applied);
        if summary.has_discounts() {
            tracing::debug!(
                count = summary.applied().len(),
                total = %summary.total_discount_amount(),
                category = %context.category,
                "Applied discounts"
            );
        }
        summary
    }
}

impl fmt::Debug for DiscountEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountEngine")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}
