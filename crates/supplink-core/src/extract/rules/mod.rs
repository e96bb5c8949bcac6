//! Declarative extraction rules for the narration cascade.
//!
//! Each rule pairs a matcher with a name-capture strategy, an optional
//! document group, a priority tier, a base confidence and the validation
//! mode its output must pass. The cascade sorts rules by tier (stable, so
//! ties keep declaration order) and stops at the first accepted candidate.

pub mod patterns;

use std::fmt;

use regex::{Captures, Regex};

use crate::models::supplier::{EntityType, ExtractionCandidate};

use super::document::extract_document_number;
use super::sanitize::sanitize_name;
use super::validate::validate;
use super::whitelist::{self, WHITELIST_CONFIDENCE};
use patterns::{
    CONTAMINATED_PREFIX, CONTAMINATED_REPEATED, DOUBLE_DASH, REPEATED_SPAN, SINGLE_PF, SINGLE_PJ,
    SPLIT_SUFFIX, TAX_ID_PREFIXED,
};

/// How a rule finds its match in the narration.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Delegates to the whitelist matcher.
    Whitelist,
    /// Regex match. Every `(a, b)` pair in `repeats` must capture the same
    /// text (trimmed, case-insensitive); matches that do not are skipped.
    Pattern {
        regex: &'static Regex,
        repeats: &'static [(usize, usize)],
    },
}

/// How the supplier name is built from a match.
#[derive(Clone, Copy)]
pub enum NameCapture {
    /// A single capture group.
    Group(usize),
    /// A function combining several groups.
    Combine(fn(&Captures<'_>) -> String),
}

impl fmt::Debug for NameCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(idx) => write!(f, "Group({idx})"),
            Self::Combine(_) => f.write_str("Combine(..)"),
        }
    }
}

/// One entry of the cascade.
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    pub name: &'static str,
    pub matcher: Matcher,
    pub name_capture: NameCapture,
    pub document_group: Option<usize>,
    pub tax_id_group: Option<usize>,
    /// Lower tiers are tried first.
    pub priority: u8,
    /// Confidence assigned to accepted candidates (0.0 - 1.0).
    pub confidence: f32,
    /// PJ or PF validation applied to the sanitized name.
    pub mode: EntityType,
}

/// Result of applying a single rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// The rule did not match the narration.
    NoMatch,
    /// The rule matched but the captured name failed sanitizing or validation.
    Rejected { captured: String },
    /// The rule produced a valid candidate.
    Accepted(ExtractionCandidate),
}

impl ExtractionRule {
    /// A regex rule capturing the name from `group`.
    pub fn pattern(
        name: &'static str,
        regex: &'static Regex,
        group: usize,
        priority: u8,
        confidence: f32,
        mode: EntityType,
    ) -> Self {
        Self {
            name,
            matcher: Matcher::Pattern { regex, repeats: &[] },
            name_capture: NameCapture::Group(group),
            document_group: None,
            tax_id_group: None,
            priority,
            confidence,
            mode,
        }
    }

    /// The synthetic priority-zero rule backed by the whitelist.
    pub fn whitelist() -> Self {
        Self {
            name: "WHITELIST",
            matcher: Matcher::Whitelist,
            name_capture: NameCapture::Group(0),
            document_group: None,
            tax_id_group: None,
            priority: 0,
            confidence: WHITELIST_CONFIDENCE,
            mode: EntityType::LegalEntity,
        }
    }

    pub fn with_repeats(mut self, pairs: &'static [(usize, usize)]) -> Self {
        if let Matcher::Pattern { repeats, .. } = &mut self.matcher {
            *repeats = pairs;
        }
        self
    }

    pub fn with_combined_name(mut self, combine: fn(&Captures<'_>) -> String) -> Self {
        self.name_capture = NameCapture::Combine(combine);
        self
    }

    pub fn with_document_group(mut self, group: usize) -> Self {
        self.document_group = Some(group);
        self
    }

    pub fn with_tax_id_group(mut self, group: usize) -> Self {
        self.tax_id_group = Some(group);
        self
    }

    /// Apply the rule to a narration.
    pub fn apply(&self, narration: &str) -> RuleOutcome {
        let (regex, repeats) = match &self.matcher {
            Matcher::Whitelist => return self.apply_whitelist(narration),
            Matcher::Pattern { regex, repeats } => (*regex, *repeats),
        };

        let Some(caps) = find_repeated(regex, narration, repeats) else {
            return RuleOutcome::NoMatch;
        };

        let captured = match self.name_capture {
            NameCapture::Group(idx) => group_text(&caps, idx).unwrap_or_default(),
            NameCapture::Combine(combine) => combine(&caps),
        };

        let name = sanitize_name(&captured);
        if name.is_empty() || !validate(&name, self.mode) {
            return RuleOutcome::Rejected { captured };
        }

        let document = self
            .document_group
            .and_then(|idx| group_text(&caps, idx))
            .unwrap_or_default();
        let tax_id = self.tax_id_group.and_then(|idx| group_text(&caps, idx));

        RuleOutcome::Accepted(
            ExtractionCandidate::new(name, document, self.mode, self.name, self.confidence)
                .with_tax_id(tax_id),
        )
    }

    fn apply_whitelist(&self, narration: &str) -> RuleOutcome {
        let Some(hit) = whitelist::match_narration(narration) else {
            return RuleOutcome::NoMatch;
        };

        if !validate(&hit.name, self.mode) {
            return RuleOutcome::Rejected { captured: hit.name };
        }

        let document = hit
            .document
            .unwrap_or_else(|| extract_document_number(narration));

        RuleOutcome::Accepted(ExtractionCandidate::new(
            hit.name,
            document,
            self.mode,
            self.name,
            self.confidence,
        ))
    }
}

/// The built-in cascade, in declaration order.
pub fn default_rules() -> Vec<ExtractionRule> {
    use EntityType::{LegalEntity, NaturalPerson};

    vec![
        ExtractionRule::whitelist(),
        ExtractionRule::pattern("REPEATED_PJ", &REPEATED_SPAN, 2, 1, 0.98, LegalEntity)
            .with_repeats(&[(1, 3), (2, 4)])
            .with_document_group(1),
        ExtractionRule::pattern("TAX_ID_PREFIXED", &TAX_ID_PREFIXED, 2, 2, 0.93, LegalEntity)
            .with_tax_id_group(1),
        ExtractionRule::pattern("SINGLE_PJ", &SINGLE_PJ, 2, 2, 0.95, LegalEntity)
            .with_document_group(1),
        ExtractionRule::pattern("DOUBLE_DASH", &DOUBLE_DASH, 2, 3, 0.92, LegalEntity)
            .with_document_group(1),
        ExtractionRule::pattern(
            "CONTAMINATED_REPEATED",
            &CONTAMINATED_REPEATED,
            4,
            4,
            0.88,
            LegalEntity,
        )
        .with_repeats(&[(2, 3), (1, 4)])
        .with_document_group(2),
        ExtractionRule::pattern("SPLIT_SUFFIX", &SPLIT_SUFFIX, 2, 4, 0.86, LegalEntity)
            .with_combined_name(join_name_and_suffix)
            .with_document_group(1),
        ExtractionRule::pattern(
            "CONTAMINATED_PREFIX",
            &CONTAMINATED_PREFIX,
            2,
            4,
            0.80,
            LegalEntity,
        )
        .with_document_group(1),
        ExtractionRule::pattern("REPEATED_PF", &REPEATED_SPAN, 2, 5, 0.85, NaturalPerson)
            .with_repeats(&[(1, 3), (2, 4)])
            .with_document_group(1),
        ExtractionRule::pattern("SINGLE_PF", &SINGLE_PF, 2, 6, 0.75, NaturalPerson)
            .with_document_group(1),
    ]
}

fn join_name_and_suffix(caps: &Captures<'_>) -> String {
    format!("{} {}", &caps[2], &caps[3])
}

/// First match of `regex` at or after each position whose `repeats` groups
/// agree. Overlapping starts are tried so that an unrelated earlier span
/// cannot hide a later repeated one.
pub fn find_repeated<'t>(
    regex: &Regex,
    text: &'t str,
    repeats: &[(usize, usize)],
) -> Option<Captures<'t>> {
    let mut start = 0;
    while start <= text.len() {
        let caps = regex.captures_at(text, start)?;
        if repeats.iter().all(|&(a, b)| same_group_text(&caps, a, b)) {
            return Some(caps);
        }
        let whole = caps.get(0)?;
        let step = text[whole.start()..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        start = whole.start() + step;
    }
    None
}

fn same_group_text(caps: &Captures<'_>, a: usize, b: usize) -> bool {
    match (caps.get(a), caps.get(b)) {
        (Some(x), Some(y)) => {
            x.as_str().trim().to_uppercase() == y.as_str().trim().to_uppercase()
        }
        _ => false,
    }
}

fn group_text(caps: &Captures<'_>, idx: usize) -> Option<String> {
    caps.get(idx)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}
