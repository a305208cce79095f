//! Rule base and forward-chaining sessions.
//!
//! A [`RuleBase`] is built once and shared; each pricing call opens its own
//! [`RuleSession`] over fresh facts, so sessions never share working memory.

use crate::fact::PricingFact;
use crate::rule::{Rule, standard_rules};
use cinema_pricing_core::PricingConfiguration;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Salience-ordered rules
///
/// Equal saliences keep registration order.
pub struct RuleBase {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleBase {
    /// Register `rules` and fix their agenda order
    #[must_use]
    pub fn new(mut rules: Vec<Box<dyn Rule>>) -> Self {
        rules.sort_by_key(|rule| Reverse(rule.salience()));

        let base = Self { rules };
        tracing::info!(
            count = base.rules.len(),
            rules = %base.rule_names().join(", "),
            "Initialized pricing rules"
        );
        base
    }

    /// Rule base with the four pricing rules drawn from `config`
    #[must_use]
    pub fn standard(config: &Arc<PricingConfiguration>) -> Self {
        Self::new(standard_rules(config))
    }

    /// Rule names in agenda order
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Open a session over `facts`
    #[must_use]
    pub fn session(&self, facts: Vec<PricingFact>) -> RuleSession<'_> {
        RuleSession {
            rules: &self.rules,
            facts,
            fired: HashSet::new(),
        }
    }
}

impl fmt::Debug for RuleBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleBase")
            .field("rules", &self.rule_names())
            .finish()
    }
}

/// Working memory plus agenda for one pricing call
///
/// Refraction: a rule fires at most once per fact, even if it stays activated.
pub struct RuleSession<'a> {
    rules: &'a [Box<dyn Rule>],
    facts: Vec<PricingFact>,
    fired: HashSet<(usize, usize)>,
}

impl RuleSession<'_> {
    /// Highest-salience activation that has not fired yet, as `(rule, fact)` indices
    fn next_activation(&self) -> Option<(usize, usize)> {
        self.rules.iter().enumerate().find_map(|(rule_index, rule)| {
            self.facts
                .iter()
                .enumerate()
                .find(|(fact_index, fact)| {
                    !self.fired.contains(&(rule_index, *fact_index)) && rule.matches(fact)
                })
                .map(|(fact_index, _)| (rule_index, fact_index))
        })
    }

    /// Fire activations until none remain; returns the number of firings.
    ///
    /// Every firing re-evaluates the agenda, so a rule activated by an earlier
    /// firing is picked up in salience order.
    pub fn fire_all_rules(&mut self) -> usize {
        let mut fired = 0;
        while let Some((rule_index, fact_index)) = self.next_activation() {
            let rule = &self.rules[rule_index];
            let fact = &mut self.facts[fact_index];
            tracing::trace!(rule = rule.name(), category = %fact.category, "Firing rule");
            rule.fire(fact);
            self.fired.insert((rule_index, fact_index));
            fired += 1;
        }
        tracing::debug!(fired, facts = self.facts.len(), "Rule session quiescent");
        fired
    }

    /// Close the session and take its facts
    #[must_use]
    pub fn into_facts(self) -> Vec<PricingFact> {
        self.facts
    }
}
