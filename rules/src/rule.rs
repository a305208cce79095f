//! Production rules over [`PricingFact`]s.
//!
//! | Rule              | Salience | Fires when                                  |
//! |-------------------|----------|---------------------------------------------|
//! | `base-price`      | 100      | the fact has no base total                  |
//! | `senior-discount` | 90       | an open senior fact                         |
//! | `bulk-discount`   | 80       | an open fact whose quantity meets a bulk rule |
//! | `finalize-price`  | 0        | any open fact                               |

use crate::fact::PricingFact;
use cinema_pricing_core::discount::{BulkDiscountStrategy, SeniorDiscountStrategy};
use cinema_pricing_core::{BasePriceTable, PricingConfiguration, TicketCategory, line_total};
use rust_decimal::Decimal;
use std::sync::Arc;

/// A condition-action pair evaluated against one fact at a time
///
/// Rules must be pure functions of the fact and their own configuration, so a
/// rule base can be shared by concurrent sessions.
pub trait Rule: Send + Sync {
    /// Unique rule name, for logs
    fn name(&self) -> &'static str;

    /// Agenda priority; higher fires first
    fn salience(&self) -> i32;

    /// Whether the rule is activated by `fact`
    fn matches(&self, fact: &PricingFact) -> bool;

    /// Act on an activated fact
    fn fire(&self, fact: &mut PricingFact);
}

/// Sets the undiscounted total of a fact
#[derive(Debug, Clone, Copy)]
pub struct BasePriceRule {
    prices: BasePriceTable,
}

impl BasePriceRule {
    /// Rule name
    pub const NAME: &'static str = "base-price";
    /// Agenda priority
    pub const SALIENCE: i32 = 100;

    /// Rule over the given price table
    #[must_use]
    pub const fn new(prices: BasePriceTable) -> Self {
        Self { prices }
    }
}

impl Rule for BasePriceRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn salience(&self) -> i32 {
        Self::SALIENCE
    }

    fn matches(&self, fact: &PricingFact) -> bool {
        fact.base_total.is_none()
    }

    fn fire(&self, fact: &mut PricingFact) {
        fact.base_total = Some(line_total(self.prices.price_for(fact.category), fact.quantity));
    }
}

/// Takes the senior rate off senior facts
#[derive(Debug, Clone, Copy)]
pub struct SeniorDiscountRule {
    rate: Decimal,
}

impl SeniorDiscountRule {
    /// Rule name
    pub const NAME: &'static str = "senior-discount";
    /// Agenda priority
    pub const SALIENCE: i32 = 90;

    /// Rule with an explicit rate
    #[must_use]
    pub const fn new(rate: Decimal) -> Self {
        Self { rate }
    }
}

impl Rule for SeniorDiscountRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn salience(&self) -> i32 {
        Self::SALIENCE
    }

    fn matches(&self, fact: &PricingFact) -> bool {
        fact.category == TicketCategory::Senior && fact.is_open()
    }

    fn fire(&self, fact: &mut PricingFact) {
        let amount = fact.base_total.unwrap_or(Decimal::ZERO) * self.rate;
        fact.apply_discount(SeniorDiscountStrategy::DISCOUNT_TYPE, amount);
    }
}

/// Applies the first configured bulk rule a fact's quantity triggers
#[derive(Debug, Clone)]
pub struct BulkDiscountRule {
    config: Arc<PricingConfiguration>,
}

impl BulkDiscountRule {
    /// Rule name
    pub const NAME: &'static str = "bulk-discount";
    /// Agenda priority
    pub const SALIENCE: i32 = 80;

    /// Rule over the configured bulk discounts
    #[must_use]
    pub const fn new(config: Arc<PricingConfiguration>) -> Self {
        Self { config }
    }
}

impl Rule for BulkDiscountRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn salience(&self) -> i32 {
        Self::SALIENCE
    }

    fn matches(&self, fact: &PricingFact) -> bool {
        fact.is_open()
            && self
                .config
                .bulk_rule_for(fact.category, fact.quantity)
                .is_some()
    }

    fn fire(&self, fact: &mut PricingFact) {
        if let Some(rule) = self.config.bulk_rule_for(fact.category, fact.quantity) {
            let amount = fact.base_total.unwrap_or(Decimal::ZERO) * rule.rate;
            fact.apply_discount(BulkDiscountStrategy::DISCOUNT_TYPE, amount);
        }
    }
}

/// Settles the final price of every open fact
#[derive(Debug, Clone, Copy, Default)]
pub struct FinalizePriceRule;

impl FinalizePriceRule {
    /// Rule name
    pub const NAME: &'static str = "finalize-price";
    /// Agenda priority
    pub const SALIENCE: i32 = 0;
}

impl Rule for FinalizePriceRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn salience(&self) -> i32 {
        Self::SALIENCE
    }

    fn matches(&self, fact: &PricingFact) -> bool {
        fact.is_open()
    }

    fn fire(&self, fact: &mut PricingFact) {
        fact.final_price = Some(fact.settled_price());
    }
}

/// The four pricing rules drawn from `config`
#[must_use]
pub fn standard_rules(config: &Arc<PricingConfiguration>) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(BasePriceRule::new(*config.base_prices())),
        Box::new(SeniorDiscountRule::new(config.senior_discount_rate())),
        Box::new(BulkDiscountRule::new(Arc::clone(config))),
        Box::new(FinalizePriceRule),
    ]
}
