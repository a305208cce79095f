//! Working memory of a rule session.

use cinema_pricing_core::{TicketCalculation, TicketCategory, round_money};
use rust_decimal::Decimal;
use smallvec::SmallVec;

/// One ticket category being priced
///
/// Rules read and refine the fact until the finalizing rule sets
/// [`final_price`](Self::final_price).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingFact {
    /// Category priced
    pub category: TicketCategory,
    /// Number of tickets in the category
    pub quantity: u32,
    /// Unit price × quantity, once the base-price rule has fired
    pub base_total: Option<Decimal>,
    /// Sum of every discount amount asserted so far
    pub discount_total: Decimal,
    /// Discount type ids in the order their rules fired
    pub applied_discounts: SmallVec<[&'static str; 2]>,
    /// Rounded, non-negative total once finalized
    pub final_price: Option<Decimal>,
}

impl PricingFact {
    /// Fresh fact for `quantity` tickets of `category`
    #[must_use]
    pub fn new(category: TicketCategory, quantity: u32) -> Self {
        Self {
            category,
            quantity,
            base_total: None,
            discount_total: Decimal::ZERO,
            applied_discounts: SmallVec::new(),
            final_price: None,
        }
    }

    /// Record a discount against the base total
    pub fn apply_discount(&mut self, discount_type: &'static str, amount: Decimal) {
        self.discount_total += amount;
        self.applied_discounts.push(discount_type);
    }

    /// Whether a base total is known and the fact is not yet finalized
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.base_total.is_some() && self.final_price.is_none()
    }

    /// Base total less discounts, clamped at zero and rounded to cents
    #[must_use]
    pub fn settled_price(&self) -> Decimal {
        let discounted = self.base_total.unwrap_or(Decimal::ZERO) - self.discount_total;
        round_money(discounted.max(Decimal::ZERO))
    }

    /// Priced line for the fact
    ///
    /// A fact that no rule finalized is settled here.
    #[must_use]
    pub fn into_ticket(self) -> TicketCalculation {
        let total_cost = self.final_price.unwrap_or_else(|| {
            tracing::warn!(category = %self.category, "Fact left unfinalized, settling price");
            self.settled_price()
        });
        TicketCalculation::new(
            self.category,
            self.quantity,
            total_cost,
            !self.applied_discounts.is_empty(),
        )
    }
}
