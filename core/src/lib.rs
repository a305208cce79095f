//! # Cinema Pricing Core
//!
//! Prices a batch of movie admissions for one transaction.
//!
//! Each customer's age resolves to a [`TicketCategory`]; each category is priced
//! from a base-price table, reduced by every applicable discount strategy, and
//! rounded half-up to cents; the lines are summed and rounded again into the
//! transaction total.
//!
//! ## Components
//!
//! - [`AgeRangeResolver`]: age → category over configured inclusive ranges
//! - [`BasePriceTable`]: category → unit price
//! - [`discount`]: the [`DiscountStrategy`] capability, the senior and bulk
//!   strategies, and the [`DiscountEngine`] that composes them
//! - [`CategoryPricingStrategy`]: base price + discounts for one category
//! - [`PricingEngine`]: the whole transaction; [`StandardPricingEngine`] is the
//!   direct strategy-composition backend (a rule-based backend lives in
//!   `cinema-pricing-rules`)
//!
//! ## Example
//!
//! ```
//! use cinema_pricing_core::{
//!     Customer, PricingConfiguration, PricingEngine, PricingSettings, StandardPricingEngine,
//!     TransactionId,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PricingConfiguration::from_settings(&PricingSettings::default())?;
//! let engine = StandardPricingEngine::from_config(&config);
//!
//! let calculation = engine.calculate_price(
//!     TransactionId::new(1),
//!     &[Customer::new("Ada", 36), Customer::new("Grace", 9)],
//! )?;
//!
//! assert_eq!(calculation.total_cost().to_string(), "30.00");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod age;
pub mod api;
pub mod config;
pub mod discount;
pub mod environment;
pub mod error;
pub mod price;
pub mod pricing;
pub mod types;

pub use age::AgeRangeResolver;
pub use api::{CustomerRequest, PricingRequest, PricingResponse, TicketResponse};
pub use config::{BulkDiscountSettings, PricingBackend, PricingConfiguration, PricingSettings};
pub use discount::{
    DiscountContext, DiscountEngine, DiscountResult, DiscountStrategy, DiscountSummary,
};
pub use environment::{Clock, SystemClock};
pub use error::{ConfigurationError, PricingError};
pub use price::{BasePriceTable, line_total, max_base_price};
pub use pricing::{
    CategoryPricingStrategy, PricingEngine, StandardPricingEngine, StandardPricingStrategy,
    validate_customers,
};
pub use types::*;
