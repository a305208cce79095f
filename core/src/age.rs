//! Age to ticket category resolution.

use crate::error::PricingError;
use crate::types::{AgeRange, CategoryCounts, Customer, TicketCategory};
use std::collections::BTreeMap;

/// Maps ages to ticket categories using the configured inclusive ranges
///
/// Ranges are checked in category declaration order (Adult, Senior, Teen,
/// Children). A well-formed configuration partitions the non-negative ages so
/// exactly one range matches; if ranges overlap, the first category in that
/// order wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeRangeResolver {
    ranges: Vec<(TicketCategory, AgeRange)>,
}

impl AgeRangeResolver {
    /// Creates a resolver from the configured ranges
    #[must_use]
    pub fn new(ranges: &BTreeMap<TicketCategory, AgeRange>) -> Self {
        Self {
            ranges: ranges.iter().map(|(category, range)| (*category, *range)).collect(),
        }
    }

    /// Resolve the ticket category for `age`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidAge`] if `age` is negative, or
    /// [`PricingError::UnresolvableAge`] if no configured range contains it.
    pub fn resolve(&self, age: i32) -> Result<TicketCategory, PricingError> {
        if age < 0 {
            return Err(PricingError::InvalidAge { age });
        }

        self.ranges
            .iter()
            .find(|(_, range)| range.contains(age))
            .map(|(category, _)| *category)
            .ok_or_else(|| {
                tracing::warn!(age, "No ticket category configured for age");
                PricingError::UnresolvableAge { age }
            })
    }

    /// Resolve every customer and count them per category.
    ///
    /// # Errors
    ///
    /// Propagates the first resolution failure.
    pub fn count_categories(&self, customers: &[Customer]) -> Result<CategoryCounts, PricingError> {
        let mut counts = CategoryCounts::new();
        for customer in customers {
            *counts.entry(self.resolve(customer.age)?).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
