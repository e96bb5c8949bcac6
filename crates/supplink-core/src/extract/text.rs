//! Small text helpers shared by the sanitizer, validator and resolver.

use super::rules::patterns::CONNECTIVES;

/// Replace Portuguese accented letters with their base letter.
pub fn fold_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ç' => 'C',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Whether `word` is a connective (case-insensitive).
pub fn is_connective(word: &str) -> bool {
    let upper = word.to_uppercase();
    CONNECTIVES.contains(&upper.as_str())
}

/// Tokens of length >= 2 that are not connectives, in order.
pub fn significant_tokens(name: &str) -> Vec<&str> {
    name.split_whitespace()
        .filter(|w| w.chars().count() >= 2 && !is_connective(w))
        .collect()
}
