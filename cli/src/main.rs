//! Cinema Pricing
//!
//! Prices one JSON ticket request and prints the JSON response.
//!
//! # Usage
//!
//! ```bash
//! # From a file
//! cinema-pricing request.json
//!
//! # From stdin, with the rule-based backend
//! echo '{"transactionId":1,"customers":[{"name":"Ada","age":36}]}' \
//!     | PRICING_ENGINE=rules cinema-pricing
//! ```
//!
//! Configuration comes from `PRICING_*` environment variables (a `.env` file is
//! honoured). Logs go to stderr; set `RUST_LOG` to change the level.

use anyhow::Context;
use cinema_pricing_cli::{build_engine, run};
use cinema_pricing_core::{PricingConfiguration, PricingSettings};
use std::io::Read;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinema_pricing=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = PricingSettings::from_env().context("Failed to read pricing settings")?;
    let config = PricingConfiguration::from_settings(&settings)
        .context("Invalid pricing configuration")?;
    tracing::info!(
        backend = %config.backend(),
        bulk_discounts = config.bulk_discounts().len(),
        senior_discount_rate = %config.senior_discount_rate(),
        "Configuration loaded"
    );

    let backend = config.backend();
    let engine = build_engine(Arc::new(config), backend);

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read request from {path}"))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read request from stdin")?;
            buffer
        }
    };

    println!("{}", run(&input, engine.as_ref())?);
    Ok(())
}
