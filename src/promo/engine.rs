//! Rule engine — ordered, isolated evaluation of a team's promotions.

use tracing::{debug, warn};

use crate::game::GameSummary;
use crate::promo::rules::PromotionRule;

/// Outcome of one rule against one game summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionResult {
    pub rule_name: String,
    pub triggered: bool,
    /// Diagnostic recorded when the trigger failed to evaluate; such a rule
    /// is reported as not triggered.
    pub note: Option<String>,
}

/// Evaluate a team's rules in declaration order.
///
/// Order is significant and preserved in the output. Each trigger is
/// evaluated independently: an evaluation error is recorded on its own
/// result and never aborts the siblings. An unplayed game short-circuits
/// every rule to not-triggered without evaluating any trigger — triggers
/// are defined over played games only.
pub fn evaluate(summary: &GameSummary, rules: &[PromotionRule]) -> Vec<PromotionResult> {
    if !summary.played {
        return rules
            .iter()
            .map(|rule| PromotionResult {
                rule_name: rule.name.clone(),
                triggered: false,
                note: None,
            })
            .collect();
    }

    rules
        .iter()
        .map(|rule| match rule.trigger.evaluate(summary) {
            Ok(triggered) => {
                debug!(rule = %rule.name, triggered, "Rule evaluated");
                PromotionResult {
                    rule_name: rule.name.clone(),
                    triggered,
                    note: None,
                }
            }
            Err(e) => {
                warn!(rule = %rule.name, error = %e, "Rule failed to evaluate");
                PromotionResult {
                    rule_name: rule.name.clone(),
                    triggered: false,
                    note: Some(e.to_string()),
                }
            }
        })
        .collect()
}
