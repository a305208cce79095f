//! # Cinema Pricing CLI
//!
//! Composition root: picks a [`PricingEngine`] backend for a configuration and
//! runs a JSON pricing request through it.
//!
//! ```text
//! JSON request ──► PricingRequest::into_parts ──► PricingEngine
//!              ──► PricingResponse ──► JSON
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use anyhow::Context;
use cinema_pricing_core::{
    PricingBackend, PricingConfiguration, PricingEngine, PricingRequest, PricingResponse,
    StandardPricingEngine,
};
use cinema_pricing_rules::RulesPricingEngine;
use std::sync::Arc;

/// Build the engine for `backend` over `config`
#[must_use]
pub fn build_engine(
    config: Arc<PricingConfiguration>,
    backend: PricingBackend,
) -> Arc<dyn PricingEngine> {
    let engine: Arc<dyn PricingEngine> = match backend {
        PricingBackend::Standard => Arc::new(StandardPricingEngine::from_config(&config)),
        PricingBackend::Rules => Arc::new(RulesPricingEngine::new(&config)),
    };
    tracing::info!(backend = engine.name(), "Pricing engine ready");
    engine
}

/// Price one JSON request.
///
/// # Errors
///
/// Fails if the request is not valid JSON, is rejected as invalid input, or
/// contains an age no configured range covers.
pub fn price_request(engine: &dyn PricingEngine, input: &str) -> anyhow::Result<PricingResponse> {
    let request: PricingRequest =
        serde_json::from_str(input).context("Malformed pricing request")?;
    let (transaction_id, customers) = request.into_parts()?;

    let calculation = engine
        .calculate_price(transaction_id, &customers)
        .with_context(|| format!("Failed to price transaction {transaction_id}"))?;

    Ok(PricingResponse::from(&calculation))
}

/// Price one JSON request and render the response as pretty JSON.
///
/// # Errors
///
/// See [`price_request`].
pub fn run(input: &str, engine: &dyn PricingEngine) -> anyhow::Result<String> {
    let response = price_request(engine, input)?;
    serde_json::to_string_pretty(&response).context("Failed to serialize pricing response")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cinema_pricing_core::{PricingError, PricingSettings};

    fn config() -> Arc<PricingConfiguration> {
        Arc::new(PricingConfiguration::from_settings(&PricingSettings::default()).unwrap())
    }

    #[test]
    fn test_build_engine_selects_backend() {
        assert_eq!(build_engine(config(), PricingBackend::Standard).name(), "standard");
        assert_eq!(build_engine(config(), PricingBackend::Rules).name(), "rules");
    }

    #[test]
    fn test_malformed_json() {
        let engine = build_engine(config(), PricingBackend::Standard);

        let error = price_request(engine.as_ref(), "{ not json").unwrap_err();

        assert!(error.to_string().contains("Malformed pricing request"));
    }

    #[test]
    fn test_invalid_input_keeps_its_type() {
        let engine = build_engine(config(), PricingBackend::Rules);

        let error = price_request(engine.as_ref(), r#"{ "transactionId": 1, "customers": [] }"#)
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<PricingError>(),
            Some(PricingError::InvalidInput(_))
        ));
    }
}
