//! [`PricingEngine`] backed by the rule base.

use crate::fact::PricingFact;
use crate::session::RuleBase;
use cinema_pricing_core::{
    AgeRangeResolver, Customer, PricingConfiguration, PricingEngine, PricingError,
    TransactionCalculation, TransactionId, validate_customers,
};
use std::sync::Arc;

/// Rule-based backend
///
/// Produces the same calculation as the standard backend for every
/// configuration; only the evaluation model differs.
#[derive(Debug)]
pub struct RulesPricingEngine {
    resolver: AgeRangeResolver,
    rules: RuleBase,
}

impl RulesPricingEngine {
    /// Engine over the configured ranges with the standard rules
    #[must_use]
    pub fn new(config: &Arc<PricingConfiguration>) -> Self {
        Self {
            resolver: AgeRangeResolver::new(config.age_ranges()),
            rules: RuleBase::standard(config),
        }
    }

    /// Rules in agenda order
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.rule_names()
    }
}

impl PricingEngine for RulesPricingEngine {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn calculate_price(
        &self,
        transaction_id: TransactionId,
        customers: &[Customer],
    ) -> Result<TransactionCalculation, PricingError> {
        validate_customers(customers)?;
        tracing::debug!(
            transaction_id = %transaction_id,
            customers = customers.len(),
            "Calculating ticket prices with rules"
        );

        let facts = self
            .resolver
            .count_categories(customers)?
            .into_iter()
            .map(|(category, quantity)| PricingFact::new(category, quantity))
            .collect();

        let mut session = self.rules.session(facts);
        let fired = session.fire_all_rules();

        let tickets = session
            .into_facts()
            .into_iter()
            .map(PricingFact::into_ticket)
            .collect();

        let calculation = TransactionCalculation::from_tickets(transaction_id, tickets);
        tracing::debug!(
            transaction_id = %transaction_id,
            fired,
            total = %calculation.total_cost(),
            "Transaction priced"
        );
        Ok(calculation)
    }
}
