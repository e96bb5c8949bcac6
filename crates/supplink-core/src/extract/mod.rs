//! Supplier extraction from accounting narrations.

pub mod document;
pub mod ignore;
pub mod rules;
pub mod sanitize;
pub mod text;
pub mod validate;
pub mod whitelist;

pub use document::extract_document_number;
pub use ignore::IgnoreFilter;
pub use rules::{default_rules, ExtractionRule, RuleOutcome};

use tracing::{debug, warn};

use crate::error::FailureReason;
use crate::journal::ErrorJournal;
use crate::models::config::ExtractionConfig;
use crate::models::supplier::{ExtractionCandidate, NarrationContext};

/// Runs the ignore filter and the rule cascade over narrations.
///
/// The extractor holds no per-call state; failures go to the journal passed
/// by the caller.
#[derive(Debug, Clone)]
pub struct SupplierExtractor {
    rules: Vec<ExtractionRule>,
    ignore: IgnoreFilter,
}

impl Default for SupplierExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SupplierExtractor {
    /// Create an extractor with the built-in rule table.
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    /// Create an extractor with the built-in rules and configured extras.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_ignore_filter(
            IgnoreFilter::new().with_extra_phrases(&config.extra_ignore_phrases),
        )
    }

    /// Create an extractor with a custom rule table. Rules are ordered by
    /// priority; equal priorities keep their relative order.
    pub fn with_rules(mut rules: Vec<ExtractionRule>) -> Self {
        rules.sort_by_key(|rule| rule.priority);
        Self {
            rules,
            ignore: IgnoreFilter::new(),
        }
    }

    /// Replace the ignore filter.
    pub fn with_ignore_filter(mut self, ignore: IgnoreFilter) -> Self {
        self.ignore = ignore;
        self
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    pub fn is_ignored(&self, narration: &str) -> bool {
        self.ignore.is_ignored(narration)
    }

    /// Extract a supplier candidate from a narration.
    ///
    /// Returns `None` for ignored narrations (nothing is recorded) and for
    /// failures (a record is appended to `journal`).
    pub fn extract(
        &self,
        narration: &str,
        context: Option<&NarrationContext>,
        journal: &mut ErrorJournal,
    ) -> Option<ExtractionCandidate> {
        if narration.trim().is_empty() {
            warn!("Skipping blank narration");
            journal.record_failure(narration, context, FailureReason::MalformedInput, Vec::new());
            return None;
        }

        if let Some(phrase) = self.ignore.matching_phrase(narration) {
            debug!("Narration ignored (matched '{}')", phrase);
            return None;
        }

        let mut attempted = Vec::with_capacity(self.rules.len());
        let mut matched_any = false;

        for rule in &self.rules {
            attempted.push(rule.name.to_string());

            match rule.apply(narration) {
                RuleOutcome::NoMatch => {
                    debug!("Rule {} did not match", rule.name);
                }
                RuleOutcome::Rejected { captured } => {
                    matched_any = true;
                    debug!("Rule {} matched but rejected '{}'", rule.name, captured);
                }
                RuleOutcome::Accepted(candidate) => {
                    debug!(
                        "Rule {} extracted '{}' ({}, confidence {:.2})",
                        rule.name, candidate.name, candidate.entity_type, candidate.confidence
                    );
                    return Some(candidate);
                }
            }
        }

        let reason = if matched_any {
            FailureReason::ValidationRejected
        } else {
            FailureReason::NoPatternMatched
        };
        debug!("No supplier extracted: {}", reason);
        journal.record_failure(narration, context, reason, attempted);

        None
    }
}
