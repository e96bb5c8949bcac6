//! Legal-entity (PJ) and natural-person (PF) validation of sanitized names.
//!
//! The PJ rule is deliberately permissive: a formal suffix or any enterprise
//! indicator word is enough, so some borderline names are accepted.

use crate::models::supplier::EntityType;

use super::rules::patterns::{ENTERPRISE_INDICATORS, FORMAL_SUFFIX};
use super::text::{fold_accents, is_connective};
use super::whitelist::contains_known_supplier;

const MIN_NAME_LEN: usize = 5;
const PF_MIN_WORDS: usize = 2;
const PF_MAX_WORDS: usize = 7;

/// Validate `name` in the given mode.
pub fn validate(name: &str, mode: EntityType) -> bool {
    match mode {
        EntityType::LegalEntity => is_legal_entity(name),
        EntityType::NaturalPerson => is_natural_person(name),
    }
}

/// Whether the name carries a formal legal-entity termination.
pub fn has_formal_suffix(name: &str) -> bool {
    FORMAL_SUFFIX.is_match(name)
}

/// Whether the name contains a generic enterprise indicator word.
pub fn has_enterprise_indicator(name: &str) -> bool {
    let folded = fold_accents(&name.to_uppercase());
    folded
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| ENTERPRISE_INDICATORS.contains(&word))
}

/// PJ: at least 5 characters, some business marker, and a substantive word.
pub fn is_legal_entity(name: &str) -> bool {
    if name.chars().count() < MIN_NAME_LEN {
        return false;
    }

    let marked = contains_known_supplier(name)
        || has_formal_suffix(name)
        || has_enterprise_indicator(name);
    if !marked {
        return false;
    }

    name.split_whitespace()
        .any(|word| word.chars().count() >= 2 && !is_connective(word))
}

/// PF: 2 to 7 words, no business marker, and at least 60% name-like words.
pub fn is_natural_person(name: &str) -> bool {
    if name.chars().count() < MIN_NAME_LEN {
        return false;
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() < PF_MIN_WORDS || words.len() > PF_MAX_WORDS {
        return false;
    }

    if has_formal_suffix(name) || has_enterprise_indicator(name) {
        return false;
    }

    let name_like = words
        .iter()
        .filter(|word| is_capitalized_word(word) || is_connective(word))
        .count();

    name_like * 10 >= words.len() * 6
}

fn is_capitalized_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let rest: Vec<char> = chars.collect();
            !rest.is_empty() && rest.iter().all(|c| c.is_alphabetic())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::rules::patterns::PJ_SUFFIXES;

    #[test]
    fn test_pj_with_suffix() {
        for name in [
            "ACME LTDA",
            "ACME LTDA.",
            "ACME S.A.",
            "ACME S A",
            "ACME S/A",
            "ACME ME",
            "ACME EPP",
            "ACME EIRELI",
            "JOSE PEREIRA MEI",
            "PADARIA DO ZE MICROEMPRESA",
        ] {
            assert!(is_legal_entity(name), "{name}");
        }
    }

    #[test]
    fn test_every_listed_suffix_passes() {
        for suffix in PJ_SUFFIXES {
            for name in [format!("ACME {suffix}"), format!("ACME-{suffix}")] {
                assert!(is_legal_entity(&name), "{name}");
            }
        }
        assert!(is_legal_entity("ACME LTDA-ME"));
        assert!(is_legal_entity("PADARIA PAO QUENTE LTDA-EPP"));
    }

    #[test]
    fn test_pj_with_indicator_only() {
        assert!(is_legal_entity("RAPIDO TRANSPORTES"));
        assert!(is_legal_entity("ACME SERVIÇOS"));
    }

    #[test]
    fn test_pj_with_whitelist_token() {
        assert!(is_legal_entity("BEAUTY FAIR"));
        assert!(is_legal_entity("TAIFF"));
    }

    #[test]
    fn test_pj_rejections() {
        assert!(!is_legal_entity("LTDA"));
        assert!(!is_legal_entity("JOAO DA SILVA"));
        assert!(!is_legal_entity("ACME BRASIL"));
    }

    #[test]
    fn test_pf_valid() {
        assert!(is_natural_person("JOÃO DA SILVA"));
        assert!(is_natural_person("MARIA OLIVEIRA"));
        assert!(is_natural_person("Ana Maria de Souza"));
        assert!(is_natural_person("JOSE DE SA"));
    }

    #[test]
    fn test_pf_word_count_bounds() {
        assert!(!is_natural_person("MARIANA"));
        assert!(!is_natural_person("A B C D E F G H"));
        assert!(is_natural_person("JOSE MARIA DE SOUZA DOS SANTOS NETO"));
    }

    #[test]
    fn test_pf_rejects_business_terms() {
        assert!(!is_natural_person("JOAO SILVA ME"));
        assert!(!is_natural_person("SILVA TRANSPORTES"));
    }

    #[test]
    fn test_pf_requires_name_like_words() {
        assert!(!is_natural_person("NF 12345 678"));
        assert!(!is_natural_person("joao 123 456"));
    }

    #[test]
    fn test_validate_dispatches_on_mode() {
        assert!(validate("ACME LTDA", EntityType::LegalEntity));
        assert!(!validate("ACME LTDA", EntityType::NaturalPerson));
    }
}
