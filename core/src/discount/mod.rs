//! Discount strategies and the engine that composes them.
//!
//! A [`DiscountStrategy`] decides whether it applies to a [`DiscountContext`] and, if
//! so, how much it takes off. The [`DiscountEngine`] evaluates every registered
//! strategy against the same base total and sums the applied amounts into a
//! [`DiscountSummary`]. Discounts never cascade: each one is computed from the
//! undiscounted base total.
//!
//! # Adding a strategy
//!
//! ```
//! use cinema_pricing_core::discount::{DiscountContext, DiscountResult, DiscountStrategy};
//!
//! struct MatineeDiscount;
//!
//! impl DiscountStrategy for MatineeDiscount {
//!     fn is_applicable(&self, context: &DiscountContext) -> bool {
//!         context.promo_code.as_deref() == Some("MATINEE")
//!     }
//!
//!     fn evaluate(&self, context: &DiscountContext) -> DiscountResult {
//!         let rate = rust_decimal::Decimal::new(10, 2);
//!         DiscountResult::applied(
//!             self.discount_type(),
//!             self.display_name(),
//!             context.base_total_cost * rate,
//!             rate,
//!         )
//!     }
//!
//!     fn priority(&self) -> i32 {
//!         50
//!     }
//!
//!     fn discount_type(&self) -> &str {
//!         "MATINEE_DISCOUNT"
//!     }
//!
//!     fn display_name(&self) -> &str {
//!         "Matinee Discount"
//!     }
//! }
//! ```

mod bulk;
mod engine;
mod senior;

pub use bulk::BulkDiscountStrategy;
pub use engine::DiscountEngine;
pub use senior::SeniorDiscountStrategy;

use crate::price::line_total;
use crate::types::{CategoryCounts, TicketCategory};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use smallvec::SmallVec;

/// Per-category input every discount strategy evaluates against
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscountContext {
    /// Category being priced
    pub category: TicketCategory,
    /// Number of tickets in the category
    pub quantity: u32,
    /// Undiscounted unit price
    pub unit_base_price: Decimal,
    /// `unit_base_price × quantity`
    pub base_total_cost: Decimal,
    /// Snapshot of all category counts in the transaction
    pub all_category_counts: CategoryCounts,
    /// When the discounts are evaluated
    pub evaluation_time: DateTime<Utc>,
    /// Promotional code attached to the transaction, if any
    pub promo_code: Option<String>,
}

impl DiscountContext {
    /// Creates a context, deriving the base total from unit price and quantity
    #[must_use]
    pub fn new(
        category: TicketCategory,
        quantity: u32,
        unit_base_price: Decimal,
        all_category_counts: CategoryCounts,
        evaluation_time: DateTime<Utc>,
    ) -> Self {
        Self {
            category,
            quantity,
            unit_base_price,
            base_total_cost: line_total(unit_base_price, quantity),
            all_category_counts,
            evaluation_time,
            promo_code: None,
        }
    }

    /// Attach a promotional code
    #[must_use]
    pub fn with_promo_code(mut self, promo_code: impl Into<String>) -> Self {
        self.promo_code = Some(promo_code.into());
        self
    }
}

/// Outcome of evaluating one discount strategy
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiscountResult {
    /// Stable identifier of the discount kind
    pub discount_type: String,
    /// Human-readable discount name
    pub display_name: String,
    /// Amount taken off the base total (never negative)
    pub amount: Decimal,
    /// Rate the amount was computed with
    pub rate: Decimal,
    /// Whether the discount counts toward the total
    pub applied: bool,
    /// Why the discount was or was not applied
    pub reason: String,
}

impl DiscountResult {
    /// A discount that reduces the total
    #[must_use]
    pub fn applied(
        discount_type: &str,
        display_name: &str,
        amount: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            discount_type: discount_type.to_string(),
            display_name: display_name.to_string(),
            amount,
            rate,
            applied: true,
            reason: "Discount applied successfully".to_string(),
        }
    }

    /// A strategy that ended up not discounting anything
    #[must_use]
    pub fn no_discount(reason: impl Into<String>) -> Self {
        Self {
            discount_type: String::new(),
            display_name: String::new(),
            amount: Decimal::ZERO,
            rate: Decimal::ZERO,
            applied: false,
            reason: reason.into(),
        }
    }
}

/// Applied discounts for one category, in strategy priority order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscountSummary {
    applied: SmallVec<[DiscountResult; 2]>,
    total_discount_amount: Decimal,
}

impl DiscountSummary {
    /// Summarize applied results; the total is their plain sum
    #[must_use]
    pub fn new(applied: SmallVec<[DiscountResult; 2]>) -> Self {
        let total_discount_amount = applied.iter().map(|result| result.amount).sum();
        Self {
            applied,
            total_discount_amount,
        }
    }

    /// Applied results in priority order
    #[must_use]
    pub fn applied(&self) -> &[DiscountResult] {
        &self.applied
    }

    /// Sum of all applied amounts
    #[must_use]
    pub const fn total_discount_amount(&self) -> Decimal {
        self.total_discount_amount
    }

    /// Whether any discount applied
    #[must_use]
    pub fn has_discounts(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// A pluggable discount rule
///
/// Strategies are registered once with a [`DiscountEngine`], which orders them by
/// descending [`priority`](DiscountStrategy::priority). Priority only affects the
/// order results appear in; every strategy sees the same base total.
pub trait DiscountStrategy: Send + Sync {
    /// Whether the strategy should be evaluated for `context`
    fn is_applicable(&self, context: &DiscountContext) -> bool;

    /// Compute the discount for `context`
    fn evaluate(&self, context: &DiscountContext) -> DiscountResult;

    /// Ordering key, higher first
    fn priority(&self) -> i32;

    /// Stable identifier of the discount kind
    fn discount_type(&self) -> &str;

    /// Human-readable discount name
    fn display_name(&self) -> &str;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn context(unit_base_price: Decimal, quantity: u32) -> DiscountContext {
        DiscountContext::new(
            TicketCategory::Adult,
            quantity,
            unit_base_price,
            CategoryCounts::new(),
            Utc::now(),
        )
    }

    #[test]
    fn test_context_derives_base_total() {
        assert_eq!(context(dec!(12.50), 4).base_total_cost, dec!(50.00));
    }

    #[test]
    fn test_context_base_total_saturates() {
        assert_eq!(context(Decimal::MAX, 2).base_total_cost, Decimal::MAX);
    }

    #[test]
    fn test_summary_sums_applied_amounts() {
        let summary = DiscountSummary::new(SmallVec::from_vec(vec![
            DiscountResult::applied("SENIOR_DISCOUNT", "Senior Discount", dec!(5.25), dec!(0.30)),
            DiscountResult::applied("BULK_DISCOUNT", "Bulk Discount", dec!(1.75), dec!(0.10)),
        ]));

        assert!(summary.has_discounts());
        assert_eq!(summary.total_discount_amount(), dec!(7.00));
        assert_eq!(summary.applied()[1].discount_type, "BULK_DISCOUNT");
        assert_eq!(DiscountSummary::default().total_discount_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_result_serializes_for_reporting() {
        let json = serde_json::to_value(DiscountResult::no_discount("Below threshold")).unwrap();

        assert_eq!(json["applied"], false);
        assert_eq!(json["reason"], "Below threshold");
    }
}
