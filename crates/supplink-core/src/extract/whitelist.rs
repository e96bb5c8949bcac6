//! Known-supplier whitelist: recognition and spelling canonicalization.
//!
//! Matching is plain substring containment on the upper-cased narration, with
//! no word-boundary check. Short aliases such as `EBC` can therefore fire
//! inside unrelated words (`WEBCAM`); callers rely on this behavior.

use lazy_static::lazy_static;
use regex::Regex;

use super::sanitize::sanitize_name;

/// Alias to canonical display name. Longest aliases first so that the most
/// specific spelling wins; every canonical name is also an alias of itself.
pub const KNOWN_SUPPLIERS: &[(&str, &str)] = &[
    ("EMPRESA BRASILEIRA DE COSMETICOS", "EMPRESA BRASILEIRA DE COSMETICOS"),
    ("ACTION TECHNOLOGY", "ACTION TECHNOLOGY"),
    ("ACTION TECH", "ACTION TECHNOLOGY"),
    ("BEAUTY FAIR", "BEAUTY FAIR"),
    ("CHOSEI", "CHOSEI"),
    ("TAIFF", "TAIFF"),
    ("EBC", "EMPRESA BRASILEIRA DE COSMETICOS"),
];

/// Confidence of every whitelist hit.
pub const WHITELIST_CONFIDENCE: f32 = 0.99;

struct AliasTemplates {
    alias: &'static str,
    /// "123456 ... ALIAS ..." up to the next dash.
    document_then_name: Regex,
    /// "- ... ALIAS ... -" (or from the start of the narration).
    free_span: Regex,
}

lazy_static! {
    static ref TEMPLATES: Vec<AliasTemplates> = KNOWN_SUPPLIERS
        .iter()
        .map(|(alias, _)| {
            let escaped = regex::escape(alias);
            AliasTemplates {
                alias,
                document_then_name: Regex::new(&format!(
                    r"(?i)(\d{{4,}})\s*[:;]?\s*([^-\d]*?{escaped}[^-]*)"
                ))
                .unwrap(),
                free_span: Regex::new(&format!(r"(?i)(?:^|-)\s*([^-]*?{escaped}[^-]*)")).unwrap(),
            }
        })
        .collect();
}

/// Text recovered around a whitelist alias.
#[derive(Debug, Clone, PartialEq)]
pub struct WhitelistHit {
    /// Alias that triggered the hit.
    pub alias: &'static str,
    /// Canonical display name.
    pub name: String,
    /// Document number captured by the document-then-name template, if any.
    pub document: Option<String>,
}

/// First known alias contained in `text`, longest first.
pub fn find_alias(text: &str) -> Option<&'static str> {
    let upper = text.to_uppercase();
    KNOWN_SUPPLIERS
        .iter()
        .map(|(alias, _)| *alias)
        .find(|alias| upper.contains(alias))
}

/// Whether `text` contains any whitelist alias.
pub fn contains_known_supplier(text: &str) -> bool {
    find_alias(text).is_some()
}

/// Map a name to its canonical spelling.
///
/// Names without a known alias come back normalized but otherwise unchanged.
/// Applying this twice yields the same value.
pub fn canonicalize(name: &str) -> String {
    let upper = crate::models::supplier::normalize_name(name);
    KNOWN_SUPPLIERS
        .iter()
        .find(|(alias, _)| upper.contains(alias))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(upper)
}

/// Recognize a known supplier in a narration.
///
/// Tries the document-then-name template, then the free span template, then
/// the bare alias; the first recovered text that survives sanitizing is
/// canonicalized.
pub fn match_narration(narration: &str) -> Option<WhitelistHit> {
    let alias = find_alias(narration)?;
    let templates = TEMPLATES.iter().find(|t| t.alias == alias)?;

    if let Some(caps) = templates.document_then_name.captures(narration) {
        let sanitized = sanitize_name(&caps[2]);
        if contains_known_supplier(&sanitized) {
            return Some(WhitelistHit {
                alias,
                name: canonicalize(&sanitized),
                document: Some(caps[1].to_string()),
            });
        }
    }

    if let Some(caps) = templates.free_span.captures(narration) {
        let sanitized = sanitize_name(&caps[1]);
        if contains_known_supplier(&sanitized) {
            return Some(WhitelistHit {
                alias,
                name: canonicalize(&sanitized),
                document: None,
            });
        }
    }

    Some(WhitelistHit {
        alias,
        name: canonicalize(alias),
        document: None,
    })
}
