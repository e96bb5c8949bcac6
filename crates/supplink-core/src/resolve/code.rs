//! Supplier code generation.
//!
//! A code is `PREFIX` + 4 hex digits of the name's SHA-256, e.g. `BFE1A2F`.
//! On collision a two-digit counter is appended, and after 99 collisions a
//! time-derived `AUTO` code is used.

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::extract::text::{fold_accents, significant_tokens};

const MAX_INITIALS: usize = 4;
const MIN_INITIALS: usize = 3;
const FALLBACK_LEN: usize = 4;
const HASH_LEN: usize = 4;
const MAX_COUNTER: u32 = 99;

/// Initials of up to four significant tokens. With fewer than three
/// initials, they are padded to four characters with the name's following
/// alphanumerics, then with `X`.
pub fn code_prefix(name: &str) -> String {
    let folded = fold_accents(&name.to_uppercase());

    let mut prefix: String = significant_tokens(&folded)
        .iter()
        .take(MAX_INITIALS)
        .filter_map(|token| token.chars().next())
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if prefix.len() >= MIN_INITIALS {
        return prefix;
    }

    // the first initial is the name's first alphanumeric in the common case
    let skip = usize::from(!prefix.is_empty());
    let missing = FALLBACK_LEN - prefix.len();
    prefix.extend(
        folded
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .skip(skip)
            .take(missing),
    );
    while prefix.len() < FALLBACK_LEN {
        prefix.push('X');
    }
    prefix
}

/// First four upper-case hex digits of the SHA-256 of `name`.
pub fn name_hash(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    let digest = format!("{:X}", hasher.finalize());
    digest[..HASH_LEN].to_string()
}

/// Deterministic base code for a name, before collision handling.
pub fn base_code(name: &str) -> String {
    format!("{}{}", code_prefix(name), name_hash(name))
}

/// Generate a code for `name` that `exists` reports as free.
///
/// `exists` must cover active and inactive suppliers.
pub fn generate_code<E>(
    name: &str,
    mut exists: impl FnMut(&str) -> Result<bool, E>,
) -> Result<String, E> {
    let base = base_code(name);
    if !exists(&base)? {
        return Ok(base);
    }

    for counter in 1..=MAX_COUNTER {
        let code = format!("{base}{counter:02}");
        if !exists(&code)? {
            return Ok(code);
        }
    }

    let mut stamp = Utc::now().timestamp_millis();
    loop {
        let code = format!("AUTO{stamp}");
        if !exists(&code)? {
            return Ok(code);
        }
        stamp += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::convert::Infallible;

    fn generate(name: &str, taken: &HashSet<String>) -> String {
        generate_code::<Infallible>(name, |code| Ok(taken.contains(code))).unwrap()
    }

    #[test]
    fn test_prefix_from_initials() {
        assert_eq!(code_prefix("BEAUTY FAIR EVENTOS LTDA"), "BFEL");
        assert_eq!(code_prefix("AUTOPEL AUTOMACAO COMERCIAL E INFORMATICA LTDA"), "AACI");
        assert_eq!(code_prefix("JOÃO DA SILVA SOUZA"), "JSS");
    }

    #[test]
    fn test_prefix_padded_after_initials() {
        assert_eq!(code_prefix("TAIFF"), "TAIF");
        assert_eq!(code_prefix("ACME LTDA"), "ALCM");
        assert_eq!(code_prefix("3M"), "3MXX");
        assert_eq!(code_prefix("- X -"), "XXXX");
    }

    #[test]
    fn test_hash_is_four_upper_hex() {
        let hash = name_hash("BEAUTY FAIR");
        assert_eq!(hash.len(), 4);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn test_deterministic() {
        let taken = HashSet::new();
        assert_eq!(generate("ACME LTDA", &taken), generate("ACME LTDA", &taken));
        assert_eq!(generate("ACME LTDA", &taken), base_code("ACME LTDA"));
    }

    #[test]
    fn test_collision_gets_counter() {
        let mut taken = HashSet::new();
        let first = generate("ACME LTDA", &taken);
        taken.insert(first.clone());

        let second = generate("ACME LTDA", &taken);
        assert_ne!(first, second);
        assert_eq!(second, format!("{first}01"));

        taken.insert(second.clone());
        assert_eq!(generate("ACME LTDA", &taken), format!("{first}02"));
    }

    #[test]
    fn test_exhausted_counter_falls_back_to_auto() {
        let base = base_code("ACME LTDA");
        let mut taken: HashSet<String> = (1..=99).map(|n| format!("{base}{n:02}")).collect();
        taken.insert(base);

        let code = generate("ACME LTDA", &taken);
        assert!(code.starts_with("AUTO"));
    }

    #[test]
    fn test_store_error_propagates() {
        let result = generate_code("ACME LTDA", |_| Err::<bool, &str>("down"));
        assert_eq!(result, Err("down"));
    }
}
