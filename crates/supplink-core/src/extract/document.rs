//! Document-number recovery from a narration.

use super::rules::find_repeated;
use super::rules::patterns::{DOC_AFTER_SUFFIX, DOC_DELIMITED, DOC_FREE, REPEATED_SPAN};

/// Best-effort document number. Tries, in order: the number of a repeated
/// "- N NAME - N NAME" span, a number right after a legal-entity suffix, a
/// number delimited by ':' or ';', and finally any 4 to 8 digit number.
/// Returns an empty string when nothing qualifies.
pub fn extract_document_number(narration: &str) -> String {
    if let Some(caps) = find_repeated(&REPEATED_SPAN, narration, &[(1, 3)]) {
        return caps[1].to_string();
    }

    if let Some(caps) = DOC_AFTER_SUFFIX.captures(narration) {
        return caps[1].to_string();
    }

    if let Some(caps) = DOC_DELIMITED.captures(narration) {
        if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
            return m.as_str().to_string();
        }
    }

    DOC_FREE
        .captures(narration)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_number_wins_over_free_number() {
        assert_eq!(
            extract_document_number("NF 5555 - 123 ACME LTDA - 123 ACME LTDA"),
            "123"
        );
    }

    #[test]
    fn test_repeated_person_span() {
        assert_eq!(
            extract_document_number("- 99999: JOÃO DA SILVA - 99999: JOÃO DA SILVA"),
            "99999"
        );
    }

    #[test]
    fn test_after_suffix() {
        assert_eq!(extract_document_number("ACME LTDA 445566 PAGTO"), "445566");
    }

    #[test]
    fn test_delimited_before_free() {
        assert_eq!(extract_document_number("TAXA 2024 NF: 12345"), "12345");
        assert_eq!(extract_document_number("TAXA 2024 7788; ACME"), "7788");
    }

    #[test]
    fn test_free_number() {
        assert_eq!(
            extract_document_number("ALUGUEL - 123456 BEAUTY FAIR EVENTOS LTDA - 2024/07"),
            "123456"
        );
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(extract_document_number("SEM NUMERO"), "");
        assert_eq!(extract_document_number("NF 12"), "");
    }
}
