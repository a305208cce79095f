//! Pricing configuration.
//!
//! Raw [`PricingSettings`] are loaded from environment variables or a JSON document
//! with sensible defaults, then normalized exactly once into an immutable
//! [`PricingConfiguration`] that every pricing call reads from.

use crate::error::ConfigurationError;
use crate::price::BasePriceTable;
use crate::types::{AgeRange, BulkDiscountRule, TicketCategory};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Category that receives a bulk discount when none is configured
pub const DEFAULT_BULK_CATEGORY: TicketCategory = TicketCategory::Children;
/// Quantity threshold of the default bulk discount
pub const DEFAULT_BULK_THRESHOLD: u32 = 3;

/// Rate of the default bulk discount (25% off)
#[must_use]
pub fn default_bulk_rate() -> Decimal {
    Decimal::new(25, 2)
}

/// Default senior discount rate (30% off)
#[must_use]
pub fn default_senior_discount_rate() -> Decimal {
    Decimal::new(30, 2)
}

/// Age ranges used when none are configured
#[must_use]
pub fn default_age_ranges() -> BTreeMap<TicketCategory, AgeRange> {
    BTreeMap::from([
        (TicketCategory::Children, AgeRange::new(0, 10)),
        (TicketCategory::Teen, AgeRange::new(11, 17)),
        (TicketCategory::Adult, AgeRange::new(18, 64)),
        (TicketCategory::Senior, AgeRange::new(65, i32::MAX)),
    ])
}

/// Pricing backend selected at composition time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingBackend {
    /// Direct discount-strategy composition
    #[default]
    Standard,
    /// Forward-chaining production rules
    Rules,
}

impl FromStr for PricingBackend {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "strategy" => Ok(Self::Standard),
            "rules" | "rule" => Ok(Self::Rules),
            _ => Err(ConfigurationError::InvalidValue {
                key: "engine".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PricingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Rules => write!(f, "rules"),
        }
    }
}

/// Raw bulk discount entry as it appears in settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDiscountSettings {
    /// Category name, case-insensitive
    pub category: String,
    /// Minimum quantity that triggers the discount
    #[serde(alias = "quantity_threshold", alias = "quantity")]
    pub quantity_threshold: u32,
    /// Fraction taken off the base total
    #[serde(alias = "discountRate")]
    pub rate: Decimal,
}

/// Raw pricing settings, before validation and normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingSettings {
    /// Unit base price per category name
    #[serde(rename = "basePrice", alias = "basePrices")]
    pub base_prices: BTreeMap<String, Decimal>,
    /// Inclusive age range per category name (defaults injected when empty)
    pub age_ranges: BTreeMap<String, AgeRange>,
    /// Bulk discounts in priority order (default rule injected when empty)
    pub bulk_discounts: Vec<BulkDiscountSettings>,
    /// Fraction taken off senior tickets
    pub senior_discount_rate: Decimal,
    /// Backend used to evaluate prices
    pub engine: PricingBackend,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            base_prices: BTreeMap::from([
                ("adult".to_string(), Decimal::new(2500, 2)),
                ("senior".to_string(), Decimal::new(1750, 2)),
                ("teen".to_string(), Decimal::new(1500, 2)),
                ("children".to_string(), Decimal::new(500, 2)),
            ]),
            age_ranges: BTreeMap::new(),
            bulk_discounts: Vec::new(),
            senior_discount_rate: default_senior_discount_rate(),
            engine: PricingBackend::Standard,
        }
    }
}

impl PricingSettings {
    /// Load settings from environment variables.
    ///
    /// Recognized variables:
    ///
    /// - `PRICING_{ADULT,SENIOR,TEEN,CHILDREN}_BASE_PRICE`
    /// - `PRICING_SENIOR_DISCOUNT_RATE`
    /// - `PRICING_BULK_DISCOUNTS`: `category:threshold:rate`, comma-separated
    /// - `PRICING_AGE_RANGES`: `category:min-max`, comma-separated
    /// - `PRICING_ENGINE`: `standard` or `rules`
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidValue`] if a variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup (see [`Self::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidValue`] if a present value is unparseable.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        for category in TicketCategory::ALL {
            let key = format!("PRICING_{}_BASE_PRICE", category.code());
            if let Some(raw) = lookup(&key) {
                let price = parse_value(&key, &raw)?;
                settings
                    .base_prices
                    .insert(category.code().to_lowercase(), price);
            }
        }

        if let Some(raw) = lookup("PRICING_SENIOR_DISCOUNT_RATE") {
            settings.senior_discount_rate = parse_value("PRICING_SENIOR_DISCOUNT_RATE", &raw)?;
        }

        if let Some(raw) = lookup("PRICING_BULK_DISCOUNTS") {
            settings.bulk_discounts = parse_bulk_discounts(&raw)?;
        }

        if let Some(raw) = lookup("PRICING_AGE_RANGES") {
            settings.age_ranges = parse_age_ranges(&raw)?;
        }

        if let Some(raw) = lookup("PRICING_ENGINE") {
            settings.engine = raw.parse().map_err(|_| ConfigurationError::InvalidValue {
                key: "PRICING_ENGINE".to_string(),
                value: raw.clone(),
            })?;
        }

        Ok(settings)
    }

    /// Parse settings from a JSON document; absent sections keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Parse`] if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigurationError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigurationError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

fn parse_bulk_discounts(raw: &str) -> Result<Vec<BulkDiscountSettings>, ConfigurationError> {
    const KEY: &str = "PRICING_BULK_DISCOUNTS";

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let parts: Vec<&str> = entry.split(':').collect();
            let [category, threshold, rate] = parts.as_slice() else {
                return Err(ConfigurationError::InvalidValue {
                    key: KEY.to_string(),
                    value: entry.to_string(),
                });
            };
            Ok(BulkDiscountSettings {
                category: (*category).trim().to_string(),
                quantity_threshold: parse_value(KEY, threshold)?,
                rate: parse_value(KEY, rate)?,
            })
        })
        .collect()
}

fn parse_age_ranges(raw: &str) -> Result<BTreeMap<String, AgeRange>, ConfigurationError> {
    const KEY: &str = "PRICING_AGE_RANGES";

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = || ConfigurationError::InvalidValue {
                key: KEY.to_string(),
                value: entry.to_string(),
            };
            let (category, bounds) = entry.split_once(':').ok_or_else(invalid)?;
            let (min, max) = bounds.split_once('-').ok_or_else(invalid)?;
            let range = AgeRange::new(parse_value(KEY, min)?, parse_value(KEY, max)?);
            Ok((category.trim().to_lowercase(), range))
        })
        .collect()
}

/// Validated, normalized pricing configuration
///
/// Immutable once built; share it behind an `Arc` across concurrent pricing calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingConfiguration {
    base_prices: BasePriceTable,
    age_ranges: BTreeMap<TicketCategory, AgeRange>,
    bulk_discounts: Vec<BulkDiscountRule>,
    senior_discount_rate: Decimal,
    backend: PricingBackend,
}

impl PricingConfiguration {
    /// Validate and normalize raw settings.
    ///
    /// This is the only place defaults are injected: the default age ranges when
    /// none are configured, and the default bulk discount (children, 3+ tickets,
    /// 25% off) when no bulk discount is configured.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a category name is unknown or names a
    /// category twice, a base price is missing or out of range, an age range is
    /// empty or negative, a rate lies outside `[0, 1]`, or a bulk threshold is zero.
    pub fn from_settings(settings: &PricingSettings) -> Result<Self, ConfigurationError> {
        let prices = unique_by_category(
            "basePrice",
            settings
                .base_prices
                .iter()
                .map(|(name, price)| {
                    let category = name.parse::<TicketCategory>()?;
                    Ok::<_, ConfigurationError>((name.as_str(), category, *price))
                }),
        )?;
        let base_prices = BasePriceTable::from_prices(&prices)?;

        let age_ranges = if settings.age_ranges.is_empty() {
            tracing::info!(
                ranges = "children 0-10, teen 11-17, adult 18-64, senior 65+",
                "No age ranges configured, using defaults"
            );
            default_age_ranges()
        } else {
            unique_by_category(
                "ageRanges",
                settings.age_ranges.iter().map(|(name, range)| {
                    let category = name.parse::<TicketCategory>()?;
                    if range.min < 0 || range.min > range.max {
                        return Err(ConfigurationError::InvalidAgeRange {
                            category,
                            min: range.min,
                            max: range.max,
                        });
                    }
                    Ok((name.as_str(), category, *range))
                }),
            )?
        };

        validate_rate(settings.senior_discount_rate)?;

        let mut bulk_discounts = settings
            .bulk_discounts
            .iter()
            .map(|entry| {
                let category = entry.category.parse::<TicketCategory>()?;
                if entry.quantity_threshold == 0 {
                    return Err(ConfigurationError::InvalidThreshold { category });
                }
                validate_rate(entry.rate)?;
                Ok(BulkDiscountRule::new(
                    category,
                    entry.quantity_threshold,
                    entry.rate,
                ))
            })
            .collect::<Result<Vec<_>, ConfigurationError>>()?;

        if bulk_discounts.is_empty() {
            tracing::info!(
                rule = "children 3+ tickets @ 25% off",
                "No bulk discounts configured, using default"
            );
            bulk_discounts.push(BulkDiscountRule::new(
                DEFAULT_BULK_CATEGORY,
                DEFAULT_BULK_THRESHOLD,
                default_bulk_rate(),
            ));
        }

        Ok(Self {
            base_prices,
            age_ranges,
            bulk_discounts,
            senior_discount_rate: settings.senior_discount_rate,
            backend: settings.engine,
        })
    }

    /// Unit base prices
    #[must_use]
    pub const fn base_prices(&self) -> &BasePriceTable {
        &self.base_prices
    }

    /// Age range per category, iterated in category declaration order
    #[must_use]
    pub const fn age_ranges(&self) -> &BTreeMap<TicketCategory, AgeRange> {
        &self.age_ranges
    }

    /// Bulk discount rules in configured order
    #[must_use]
    pub fn bulk_discounts(&self) -> &[BulkDiscountRule] {
        &self.bulk_discounts
    }

    /// First configured bulk rule that triggers for `quantity` tickets of `category`.
    ///
    /// Configured order wins over the size of the discount.
    #[must_use]
    pub fn bulk_rule_for(
        &self,
        category: TicketCategory,
        quantity: u32,
    ) -> Option<&BulkDiscountRule> {
        self.bulk_discounts
            .iter()
            .find(|rule| rule.matches(category, quantity))
    }

    /// Fraction taken off senior tickets
    #[must_use]
    pub const fn senior_discount_rate(&self) -> Decimal {
        self.senior_discount_rate
    }

    /// Backend selected for this configuration
    #[must_use]
    pub const fn backend(&self) -> PricingBackend {
        self.backend
    }
}

/// Key category names case-insensitively; two names for one category are rejected.
fn unique_by_category<'a, V>(
    key: &str,
    entries: impl IntoIterator<Item = Result<(&'a str, TicketCategory, V), ConfigurationError>>,
) -> Result<BTreeMap<TicketCategory, V>, ConfigurationError> {
    let mut by_category = BTreeMap::new();
    for entry in entries {
        let (name, category, value) = entry?;
        if by_category.insert(category, value).is_some() {
            return Err(ConfigurationError::InvalidValue {
                key: key.to_string(),
                value: format!("duplicate category {name}"),
            });
        }
    }
    Ok(by_category)
}

fn validate_rate(rate: Decimal) -> Result<(), ConfigurationError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ConfigurationError::InvalidDiscountRate { rate });
    }
    Ok(())
}
