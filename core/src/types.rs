//! Domain types for ticket pricing.
//!
//! Value objects shared by both pricing backends: ticket categories, customers,
//! age ranges, bulk discount rules and the per-transaction calculation results.

use crate::error::{ConfigurationError, PricingError};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Money
// ============================================================================

/// Number of decimal places kept at every monetary output boundary
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary amount half-up to cents.
///
/// Amounts reaching this function are never negative, so rounding midpoints
/// away from zero is the same as rounding them up.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

// ============================================================================
// Identifiers
// ============================================================================

/// Caller-supplied identifier of one pricing transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    /// Creates a `TransactionId` from its raw value
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Ticket Category
// ============================================================================

/// Admission category a customer is priced under
///
/// Variant order is the declaration order used to break ties between
/// overlapping age ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketCategory {
    /// Standard adult admission
    Adult,
    /// Senior citizen admission
    Senior,
    /// Teenager admission
    Teen,
    /// Child admission
    Children,
}

impl TicketCategory {
    /// All categories, in declaration order
    pub const ALL: [Self; 4] = [Self::Adult, Self::Senior, Self::Teen, Self::Children];

    /// Canonical display name, also used to order ticket lines in results
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Adult => "Adult",
            Self::Senior => "Senior",
            Self::Teen => "Teen",
            Self::Children => "Children",
        }
    }

    /// Upper-case name used in environment variable keys and on the wire
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Adult => "ADULT",
            Self::Senior => "SENIOR",
            Self::Teen => "TEEN",
            Self::Children => "CHILDREN",
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TicketCategory {
    type Err = ConfigurationError;

    /// Parses a category name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigurationError::UnknownCategory(s.to_string()))
    }
}

/// Number of customers per category in one transaction
pub type CategoryCounts = BTreeMap<TicketCategory, u32>;

// ============================================================================
// Customer
// ============================================================================

/// A customer admitted in a transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer name (must not be blank)
    pub name: String,
    /// Age in years (must not be negative)
    pub age: i32,
}

impl Customer {
    /// Creates a new `Customer`
    #[must_use]
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    /// Checks the customer is priceable.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidInput`] if the name is blank or the age is negative.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.name.trim().is_empty() {
            return Err(PricingError::InvalidInput(
                "Customer name cannot be null or empty".to_string(),
            ));
        }
        if self.age < 0 {
            return Err(PricingError::InvalidInput(format!(
                "Customer age cannot be negative: {}",
                self.age
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Age Range
// ============================================================================

/// Inclusive age bounds for one ticket category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    /// Lowest age in the range
    pub min: i32,
    /// Highest age in the range
    pub max: i32,
}

impl AgeRange {
    /// Creates a new `AgeRange`
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Whether `age` falls inside the bounds
    #[must_use]
    pub const fn contains(&self, age: i32) -> bool {
        age >= self.min && age <= self.max
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

// ============================================================================
// Bulk Discount Rule
// ============================================================================

/// Quantity-triggered percentage discount for one category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDiscountRule {
    /// Category the rule applies to
    pub category: TicketCategory,
    /// Minimum quantity that triggers the discount
    pub threshold: u32,
    /// Fraction taken off the base total (0.25 = 25% off)
    pub rate: Decimal,
}

impl BulkDiscountRule {
    /// Creates a new `BulkDiscountRule`
    #[must_use]
    pub const fn new(category: TicketCategory, threshold: u32, rate: Decimal) -> Self {
        Self {
            category,
            threshold,
            rate,
        }
    }

    /// Whether the rule triggers for `quantity` tickets of `category`
    #[must_use]
    pub fn matches(&self, category: TicketCategory, quantity: u32) -> bool {
        self.category == category && quantity >= self.threshold
    }
}

// ============================================================================
// Calculation Results
// ============================================================================

/// Priced line for one ticket category
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCalculation {
    /// Category priced
    pub category: TicketCategory,
    /// Number of tickets in the category
    pub quantity: u32,
    /// Total after discounts, rounded to cents
    pub total_cost: Decimal,
    /// Whether at least one discount reduced the total
    pub discount_applied: bool,
}

impl TicketCalculation {
    /// Creates a new `TicketCalculation`
    #[must_use]
    pub const fn new(
        category: TicketCategory,
        quantity: u32,
        total_cost: Decimal,
        discount_applied: bool,
    ) -> Self {
        Self {
            category,
            quantity,
            total_cost,
            discount_applied,
        }
    }
}

/// Priced transaction returned to the caller
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCalculation {
    transaction_id: TransactionId,
    ticket_calculations: Vec<TicketCalculation>,
    total_cost: Decimal,
}

impl TransactionCalculation {
    /// Assembles the result from per-category lines.
    ///
    /// Lines are ordered by category display name. The total is the sum of the
    /// already-rounded line totals, rounded half-up to cents once more.
    #[must_use]
    pub fn from_tickets(
        transaction_id: TransactionId,
        mut ticket_calculations: Vec<TicketCalculation>,
    ) -> Self {
        ticket_calculations.sort_by(|a, b| {
            a.category
                .display_name()
                .cmp(b.category.display_name())
        });

        let total_cost = round_money(
            ticket_calculations
                .iter()
                .map(|ticket| ticket.total_cost)
                .sum(),
        );

        Self {
            transaction_id,
            ticket_calculations,
            total_cost,
        }
    }

    /// Transaction the result belongs to
    #[must_use]
    pub const fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    /// Per-category lines, ordered by display name
    #[must_use]
    pub fn ticket_calculations(&self) -> &[TicketCalculation] {
        &self.ticket_calculations
    }

    /// Line for `category`, if any customer fell into it
    #[must_use]
    pub fn ticket(&self, category: TicketCategory) -> Option<&TicketCalculation> {
        self.ticket_calculations
            .iter()
            .find(|ticket| ticket.category == category)
    }

    /// Transaction total, rounded to cents
    #[must_use]
    pub const fn total_cost(&self) -> Decimal {
        self.total_cost
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(dec!(11.245)), dec!(11.25));
        assert_eq!(round_money(dec!(11.244)), dec!(11.24));
        assert_eq!(round_money(dec!(0.005)), dec!(0.01));
        assert_eq!(round_money(dec!(17.5)), dec!(17.50));
    }

    #[test]
    fn test_category_parse_ignores_case() {
        assert_eq!("children".parse::<TicketCategory>().unwrap(), TicketCategory::Children);
        assert_eq!("SENIOR".parse::<TicketCategory>().unwrap(), TicketCategory::Senior);
        assert_eq!(" Teen ".parse::<TicketCategory>().unwrap(), TicketCategory::Teen);
        assert!(matches!(
            "toddler".parse::<TicketCategory>(),
            Err(ConfigurationError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_category_serializes_as_code() {
        let json = serde_json::to_string(&TicketCategory::Children).unwrap();
        assert_eq!(json, "\"CHILDREN\"");
    }

    #[test]
    fn test_customer_validation() {
        assert!(Customer::new("Ada", 0).validate().is_ok());
        assert!(matches!(
            Customer::new("   ", 30).validate(),
            Err(PricingError::InvalidInput(_))
        ));
        assert!(matches!(
            Customer::new("Bob", -1).validate(),
            Err(PricingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_age_range_bounds_are_inclusive() {
        let range = AgeRange::new(11, 17);
        assert!(!range.contains(10));
        assert!(range.contains(11));
        assert!(range.contains(17));
        assert!(!range.contains(18));
        assert_eq!(range.to_string(), "11-17");
    }

    #[test]
    fn test_bulk_rule_threshold_is_inclusive() {
        let rule = BulkDiscountRule::new(TicketCategory::Children, 3, dec!(0.25));
        assert!(!rule.matches(TicketCategory::Children, 2));
        assert!(rule.matches(TicketCategory::Children, 3));
        assert!(!rule.matches(TicketCategory::Teen, 5));
    }

    #[test]
    fn test_transaction_orders_by_display_name_and_totals() {
        let calculation = TransactionCalculation::from_tickets(
            TransactionId::new(7),
            vec![
                TicketCalculation::new(TicketCategory::Teen, 1, dec!(12.00), false),
                TicketCalculation::new(TicketCategory::Adult, 1, dec!(25.00), false),
                TicketCalculation::new(TicketCategory::Children, 3, dec!(11.25), true),
            ],
        );

        let order: Vec<_> = calculation
            .ticket_calculations()
            .iter()
            .map(|ticket| ticket.category)
            .collect();
        assert_eq!(
            order,
            vec![TicketCategory::Adult, TicketCategory::Children, TicketCategory::Teen]
        );
        assert_eq!(calculation.total_cost(), dec!(48.25));
        assert_eq!(calculation.transaction_id(), TransactionId::new(7));
    }

    #[test]
    fn test_total_is_rounded_again_over_line_sum() {
        let calculation = TransactionCalculation::from_tickets(
            TransactionId::new(8),
            vec![
                TicketCalculation::new(TicketCategory::Adult, 1, dec!(10.004), false),
                TicketCalculation::new(TicketCategory::Teen, 1, dec!(10.001), false),
            ],
        );

        assert_eq!(calculation.total_cost(), dec!(20.01));
    }
}
