//! Session-scoped record of narrations that produced no supplier.

use std::fmt::Write as _;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FailureReason;
use crate::models::supplier::{excerpt, NarrationContext};

/// Default number of narration characters kept per record.
pub const DEFAULT_EXCERPT_LEN: usize = 120;

/// Row context as recorded: missing values are defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureContext {
    pub date: Option<NaiveDate>,
    /// Absolute value of the movement amount, zero if unknown.
    pub amount: Decimal,
    pub document: String,
}

impl From<Option<&NarrationContext>> for FailureContext {
    fn from(context: Option<&NarrationContext>) -> Self {
        match context {
            Some(ctx) => Self {
                date: ctx.date,
                amount: ctx.amount.map(|a| a.abs()).unwrap_or(Decimal::ZERO),
                document: ctx.document.clone().unwrap_or_default(),
            },
            None => Self::default(),
        }
    }
}

/// One failed extraction attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Start of the narration.
    pub narration: String,
    pub context: FailureContext,
    pub reason: FailureReason,
    /// Rule names tried, in evaluation order.
    pub attempted_rules: Vec<String>,
}

/// Collects failures for one import session. Records accumulate until
/// [`ErrorJournal::clear`] is called.
#[derive(Debug, Clone)]
pub struct ErrorJournal {
    records: Vec<FailureRecord>,
    excerpt_len: usize,
}

impl Default for ErrorJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorJournal {
    pub fn new() -> Self {
        Self::with_excerpt_len(DEFAULT_EXCERPT_LEN)
    }

    pub fn with_excerpt_len(excerpt_len: usize) -> Self {
        Self {
            records: Vec::new(),
            excerpt_len,
        }
    }

    pub fn append(&mut self, record: FailureRecord) {
        self.records.push(record);
    }

    /// Build and append a record, truncating the narration to the
    /// configured excerpt length.
    pub fn record_failure(
        &mut self,
        narration: &str,
        context: Option<&NarrationContext>,
        reason: FailureReason,
        attempted_rules: Vec<String>,
    ) {
        self.append(FailureRecord {
            narration: excerpt(narration.trim(), self.excerpt_len),
            context: FailureContext::from(context),
            reason,
            attempted_rules,
        });
    }

    pub fn records(&self) -> &[FailureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Human-readable report: a count header, then one block per failure.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Extraction failures: {}", self.records.len());

        for (idx, record) in self.records.iter().enumerate() {
            let date = record
                .context
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            let document = if record.context.document.is_empty() {
                "-"
            } else {
                record.context.document.as_str()
            };
            let rules = if record.attempted_rules.is_empty() {
                "-".to_string()
            } else {
                record.attempted_rules.join(", ")
            };

            let _ = writeln!(out);
            let _ = writeln!(out, "#{} {}", idx + 1, record.reason);
            let _ = writeln!(out, "  narration: {}", record.narration);
            let _ = writeln!(
                out,
                "  date: {}  amount: {}  document: {}",
                date, record.context.amount, document
            );
            let _ = writeln!(out, "  rules: {}", rules);
        }

        out
    }
}
