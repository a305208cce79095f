//! Error types for pricing and configuration

use crate::types::TicketCategory;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by a single pricing call
///
/// None of these are transient: the same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The request was rejected before any computation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An age below zero reached the age resolver
    #[error("Age cannot be negative: {age}")]
    InvalidAge {
        /// Offending age
        age: i32,
    },

    /// No configured age range contains the age (configuration gap)
    #[error("No ticket category configured for age {age}")]
    UnresolvableAge {
        /// Age that fell into the gap
        age: i32,
    },
}

/// Errors raised while building the pricing configuration at startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A category has no base price
    #[error("Missing base price for category {category}")]
    MissingBasePrice {
        /// Category without a price
        category: TicketCategory,
    },

    /// A base price is negative
    #[error("Base price for {category} cannot be negative: {price}")]
    NegativeBasePrice {
        /// Category with the bad price
        category: TicketCategory,
        /// Configured price
        price: Decimal,
    },

    /// A base price exceeds the supported maximum
    #[error("Base price for {category} exceeds {max}: {price}")]
    ExcessiveBasePrice {
        /// Category with the bad price
        category: TicketCategory,
        /// Configured price
        price: Decimal,
        /// Largest accepted price
        max: Decimal,
    },

    /// An age range is empty or starts below zero
    #[error("Invalid age range for {category}: {min}-{max}")]
    InvalidAgeRange {
        /// Category owning the range
        category: TicketCategory,
        /// Configured lower bound
        min: i32,
        /// Configured upper bound
        max: i32,
    },

    /// A discount rate lies outside `[0, 1]`
    #[error("Discount rate must be between 0 and 1, got {rate}")]
    InvalidDiscountRate {
        /// Configured rate
        rate: Decimal,
    },

    /// A bulk discount has a zero quantity threshold
    #[error("Bulk discount threshold for {category} must be at least 1")]
    InvalidThreshold {
        /// Category owning the rule
        category: TicketCategory,
    },

    /// A category name did not match any ticket category
    #[error("Unknown ticket category: {0}")]
    UnknownCategory(String),

    /// A setting could not be parsed
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Setting key (environment variable or field)
        key: String,
        /// Raw value that failed to parse
        value: String,
    },

    /// A settings document could not be parsed
    #[error("Failed to parse pricing settings: {0}")]
    Parse(String),
}
