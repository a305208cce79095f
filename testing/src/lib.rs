//! # Cinema Pricing Testing
//!
//! Testing utilities shared by every pricing backend.
//!
//! This crate provides:
//! - A deterministic [`Clock`] for discount evaluation timestamps
//! - The reference configuration used throughout the test suites
//! - A Given-When-Then builder for pricing a transaction ([`PricingTest`])
//! - proptest strategies for ages and customers
//! - A scenario suite any [`PricingEngine`](cinema_pricing_core::PricingEngine)
//!   must pass
//!
//! ## Example
//!
//! ```
//! use cinema_pricing_core::StandardPricingEngine;
//! use cinema_pricing_testing::{reference_config, suite, test_clock};
//! use std::sync::Arc;
//!
//! let engine = StandardPricingEngine::with_clock(&reference_config(), Arc::new(test_clock()));
//! suite::assert_reference_scenarios(&engine);
//! ```

#![allow(clippy::module_name_repetitions)]

use chrono::{DateTime, Utc};
use cinema_pricing_core::environment::Clock;

pub mod pricing_test;
pub mod suite;

/// Mock implementations of environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, so every discount context built during a
    /// test carries the same evaluation timestamp.
    ///
    /// # Example
    ///
    /// ```
    /// use cinema_pricing_testing::mocks::FixedClock;
    /// use cinema_pricing_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Reference configuration and customer builders
pub mod fixtures {
    use cinema_pricing_core::{Customer, PricingConfiguration, PricingSettings};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    /// Settings the reference scenarios are priced against
    ///
    /// Adult 25.00, Senior 25.00 (30% off), Teen 12.00, Children 5.00, default age
    /// ranges and the default children bulk discount (3+ tickets, 25% off).
    #[must_use]
    pub fn reference_settings() -> PricingSettings {
        PricingSettings {
            base_prices: BTreeMap::from([
                ("adult".to_string(), dec!(25.00)),
                ("senior".to_string(), dec!(25.00)),
                ("teen".to_string(), dec!(12.00)),
                ("children".to_string(), dec!(5.00)),
            ]),
            senior_discount_rate: dec!(0.30),
            ..PricingSettings::default()
        }
    }

    /// Validated [`reference_settings`], ready to share between engines
    ///
    /// # Panics
    ///
    /// Panics if the reference settings stop validating.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn reference_config() -> Arc<PricingConfiguration> {
        Arc::new(
            PricingConfiguration::from_settings(&reference_settings())
                .expect("reference settings should always validate"),
        )
    }

    /// Settings whose discounted lines land on half a cent
    ///
    /// Senior 17.50 at 33% off and Children 5.01 with the default bulk discount.
    #[must_use]
    pub fn rounding_settings() -> PricingSettings {
        PricingSettings {
            base_prices: BTreeMap::from([
                ("adult".to_string(), dec!(25.00)),
                ("senior".to_string(), dec!(17.50)),
                ("teen".to_string(), dec!(12.00)),
                ("children".to_string(), dec!(5.01)),
            ]),
            senior_discount_rate: dec!(0.33),
            ..PricingSettings::default()
        }
    }

    /// Validated [`rounding_settings`]
    ///
    /// # Panics
    ///
    /// Panics if the rounding settings stop validating.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn rounding_config() -> Arc<PricingConfiguration> {
        Arc::new(
            PricingConfiguration::from_settings(&rounding_settings())
                .expect("rounding settings should always validate"),
        )
    }

    /// Customers from `(name, age)` pairs
    #[must_use]
    pub fn customers(pairs: &[(&str, i32)]) -> Vec<Customer> {
        pairs
            .iter()
            .map(|(name, age)| Customer::new(*name, *age))
            .collect()
    }

    /// `count` customers of the same age
    #[must_use]
    pub fn party_of(count: usize, age: i32) -> Vec<Customer> {
        (0..count)
            .map(|i| Customer::new(format!("guest-{i}"), age))
            .collect()
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use cinema_pricing_core::{Customer, TransactionId};
    use proptest::prelude::*;

    /// Oldest age the generators produce
    pub const MAX_AGE: i32 = 120;

    /// Ages on either side of every default range boundary
    pub const BOUNDARY_AGES: [i32; 7] = [0, 10, 11, 17, 18, 64, 65];

    /// Any valid age
    pub fn age() -> impl Strategy<Value = i32> {
        0..=MAX_AGE
    }

    /// An age sitting on a default range boundary
    pub fn boundary_age() -> impl Strategy<Value = i32> {
        proptest::sample::select(BOUNDARY_AGES.to_vec())
    }

    /// A valid customer
    pub fn customer() -> impl Strategy<Value = Customer> {
        ("[A-Za-z][A-Za-z ]{0,15}", age()).prop_map(|(name, age)| Customer::new(name, age))
    }

    /// Between one and `max` valid customers
    pub fn customers(max: usize) -> impl Strategy<Value = Vec<Customer>> {
        proptest::collection::vec(customer(), 1..=max.max(1))
    }

    /// A transaction of valid customers with an arbitrary id
    pub fn transaction(max: usize) -> impl Strategy<Value = (TransactionId, Vec<Customer>)> {
        (any::<i64>(), customers(max))
            .prop_map(|(id, customers)| (TransactionId::new(id), customers))
    }
}

/// Install a test-writer tracing subscriber once per process
///
/// Later calls are no-ops, so every test may call it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinema_pricing=debug")),
        )
        .try_init();
}

// Re-export commonly used items
pub use fixtures::{
    customers, party_of, reference_config, reference_settings, rounding_config, rounding_settings,
};
pub use mocks::{FixedClock, test_clock};
pub use pricing_test::PricingTest;
