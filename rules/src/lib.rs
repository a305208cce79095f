//! # Cinema Pricing Rules
//!
//! A forward-chaining production-rule backend for [`PricingEngine`].
//!
//! Each ticket category in a transaction becomes a pricing fact. A rule
//! session repeatedly fires the highest-salience activated rule until no
//! rule is activated; each rule fires at most once per fact. The standard rules
//! set the base total, assert the senior and bulk discounts against it, and
//! finalize the rounded, non-negative price.
//!
//! ## Example
//!
//! ```
//! use cinema_pricing_core::{
//!     Customer, PricingConfiguration, PricingEngine, PricingSettings, TransactionId,
//! };
//! use cinema_pricing_rules::RulesPricingEngine;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(PricingConfiguration::from_settings(&PricingSettings::default())?);
//! let engine = RulesPricingEngine::new(&config);
//!
//! let calculation = engine.calculate_price(TransactionId::new(1), &[Customer::new("Ada", 36)])?;
//! assert_eq!(calculation.total_cost().to_string(), "25.00");
//! # Ok(())
//! # }
//! ```
//!
//! [`PricingEngine`]: cinema_pricing_core::PricingEngine

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod fact;
mod rule;
mod session;

pub use engine::RulesPricingEngine;
