//! Base price lookup per ticket category.

use crate::error::ConfigurationError;
use crate::types::TicketCategory;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Largest unit price a category may be configured with
///
/// Keeps `price × quantity` within `Decimal` range for any `u32` quantity.
#[must_use]
pub fn max_base_price() -> Decimal {
    Decimal::new(1_000_000, 0)
}

/// `unit_price × quantity`, saturating at [`Decimal::MAX`]
///
/// Never saturates for prices accepted by [`BasePriceTable::from_prices`].
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .unwrap_or(Decimal::MAX)
}

/// Undiscounted unit price of every ticket category
///
/// Built once from configuration; lookup is total because every category
/// must be priced for construction to succeed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BasePriceTable {
    adult: Decimal,
    senior: Decimal,
    teen: Decimal,
    children: Decimal,
}

impl BasePriceTable {
    /// Builds the table from per-category prices.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingBasePrice`] if a category has no price,
    /// [`ConfigurationError::NegativeBasePrice`] if a price is below zero, or
    /// [`ConfigurationError::ExcessiveBasePrice`] if a price exceeds [`max_base_price`].
    pub fn from_prices(
        prices: &BTreeMap<TicketCategory, Decimal>,
    ) -> Result<Self, ConfigurationError> {
        let lookup = |category: TicketCategory| -> Result<Decimal, ConfigurationError> {
            let price = prices
                .get(&category)
                .copied()
                .ok_or(ConfigurationError::MissingBasePrice { category })?;
            if price < Decimal::ZERO {
                return Err(ConfigurationError::NegativeBasePrice { category, price });
            }
            let max = max_base_price();
            if price > max {
                return Err(ConfigurationError::ExcessiveBasePrice {
                    category,
                    price,
                    max,
                });
            }
            Ok(price)
        };

        Ok(Self {
            adult: lookup(TicketCategory::Adult)?,
            senior: lookup(TicketCategory::Senior)?,
            teen: lookup(TicketCategory::Teen)?,
            children: lookup(TicketCategory::Children)?,
        })
    }

    /// Unit base price of `category`
    #[must_use]
    pub const fn price_for(&self, category: TicketCategory) -> Decimal {
        match category {
            TicketCategory::Adult => self.adult,
            TicketCategory::Senior => self.senior,
            TicketCategory::Teen => self.teen,
            TicketCategory::Children => self.children,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn full_prices() -> BTreeMap<TicketCategory, Decimal> {
        BTreeMap::from([
            (TicketCategory::Adult, dec!(25.00)),
            (TicketCategory::Senior, dec!(25.00)),
            (TicketCategory::Teen, dec!(12.00)),
            (TicketCategory::Children, dec!(5.00)),
        ])
    }

    #[test]
    fn test_price_lookup() {
        let table = BasePriceTable::from_prices(&full_prices()).unwrap();
        assert_eq!(table.price_for(TicketCategory::Adult), dec!(25.00));
        assert_eq!(table.price_for(TicketCategory::Teen), dec!(12.00));
        assert_eq!(table.price_for(TicketCategory::Children), dec!(5.00));
    }

    #[test]
    fn test_missing_price_fails_construction() {
        let mut prices = full_prices();
        prices.remove(&TicketCategory::Teen);

        assert_eq!(
            BasePriceTable::from_prices(&prices),
            Err(ConfigurationError::MissingBasePrice {
                category: TicketCategory::Teen
            })
        );
    }

    #[test]
    fn test_negative_price_fails_construction() {
        let mut prices = full_prices();
        prices.insert(TicketCategory::Adult, dec!(-1));

        assert!(matches!(
            BasePriceTable::from_prices(&prices),
            Err(ConfigurationError::NegativeBasePrice { .. })
        ));
    }

    #[test]
    fn test_price_above_maximum_fails_construction() {
        let mut prices = full_prices();
        prices.insert(TicketCategory::Adult, Decimal::MAX);

        assert_eq!(
            BasePriceTable::from_prices(&prices),
            Err(ConfigurationError::ExcessiveBasePrice {
                category: TicketCategory::Adult,
                price: Decimal::MAX,
                max: max_base_price(),
            })
        );

        prices.insert(TicketCategory::Adult, max_base_price());
        let table = BasePriceTable::from_prices(&prices).unwrap();
        assert_eq!(table.price_for(TicketCategory::Adult), dec!(1000000));
    }

    #[test]
    fn test_line_total_at_maximum_fits_for_any_quantity() {
        assert_eq!(
            line_total(max_base_price(), u32::MAX),
            dec!(1000000) * Decimal::from(u32::MAX)
        );
        assert_eq!(line_total(dec!(17.50), 3), dec!(52.50));
    }

    #[test]
    fn test_line_total_saturates_instead_of_panicking() {
        assert_eq!(line_total(Decimal::MAX, 2), Decimal::MAX);
    }
}
