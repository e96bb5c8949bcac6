//! Supplier records and the ephemeral values produced while extracting them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A supplier record as held by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    /// Stable unique code (unique among active and inactive records).
    pub code: String,

    /// Canonical display name: upper-case, trimmed, single-spaced.
    pub name: String,

    /// Tax identifier (CNPJ/CPF), digits and separators as captured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// Created by the resolver rather than by a person.
    pub auto_created: bool,

    /// Inactive suppliers are never matched but still reserve their code.
    pub active: bool,

    /// Start of the narration the supplier was extracted from.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub origin_excerpt: String,

    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a supplier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupplier {
    pub code: String,
    pub name: String,
    pub tax_id: Option<String>,
    pub auto_created: bool,
    pub origin_excerpt: String,
}

impl NewSupplier {
    /// Materialize the record, stamping it active and created now.
    pub fn into_supplier(self) -> Supplier {
        Supplier {
            code: self.code,
            name: normalize_name(&self.name),
            tax_id: self.tax_id,
            auto_created: self.auto_created,
            active: true,
            origin_excerpt: self.origin_excerpt,
            created_at: Utc::now(),
        }
    }
}

/// Legal classification of a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// Pessoa jurídica (legal entity).
    #[serde(rename = "PJ")]
    LegalEntity,
    /// Pessoa física (natural person).
    #[serde(rename = "PF")]
    NaturalPerson,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LegalEntity => "PJ",
            Self::NaturalPerson => "PF",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A supplier name recovered from a narration, not yet resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionCandidate {
    /// Sanitized (and possibly canonicalized) name.
    pub name: String,

    /// Document number captured next to the name, empty if none.
    pub document: String,

    /// PJ or PF.
    pub entity_type: EntityType,

    /// Name of the rule that produced the candidate.
    pub rule: String,

    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,

    /// Tax identifier captured in front of the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

impl ExtractionCandidate {
    pub fn new(
        name: impl Into<String>,
        document: impl Into<String>,
        entity_type: EntityType,
        rule: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            name: name.into(),
            document: document.into(),
            entity_type,
            rule: rule.into(),
            confidence: confidence.clamp(0.0, 1.0),
            tax_id: None,
        }
    }

    pub fn with_tax_id(mut self, tax_id: Option<String>) -> Self {
        self.tax_id = tax_id;
        self
    }
}

/// Row context supplied by the import loop alongside a narration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrationContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Movement amount; the journal records its absolute value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl NarrationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }
}

/// Canonical form of a supplier name: upper-case, trimmed, single-spaced.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// First `max_chars` characters of `text`.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  beauty   fair\teventos "), "BEAUTY FAIR EVENTOS");
        assert_eq!(normalize_name("joão da silva"), "JOÃO DA SILVA");
    }

    #[test]
    fn test_normalize_name_idempotent() {
        let once = normalize_name(" Acme  comércio ltda ");
        assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("AÇÃO LTDA", 3), "AÇÃ");
        assert_eq!(excerpt("ABC", 10), "ABC");
    }

    #[test]
    fn test_candidate_confidence_clamped() {
        let high = ExtractionCandidate::new("X", "", EntityType::LegalEntity, "R", 1.7);
        let low = ExtractionCandidate::new("X", "", EntityType::LegalEntity, "R", -0.2);
        assert_eq!(high.confidence, 1.0);
        assert_eq!(low.confidence, 0.0);
    }

    #[test]
    fn test_entity_type_serializes_as_short_code() {
        let json = serde_json::to_string(&EntityType::NaturalPerson).unwrap();
        assert_eq!(json, "\"PF\"");
    }
}
