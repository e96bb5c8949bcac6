//! Narrations that never refer to a supplier.

/// Context-specific phrases, checked first.
pub const CONTEXT_PHRASES: &[&str] = &[
    "DESPESA DESLOCAMENTO",
    "VLR REF FRETES_RATEIO",
    "ESTORNO PARA ABERTURA POR RATEIO",
    "TRANSF AUTORIZ ENTRE AGS",
    "RECUPERAÇÃO DESP FORNECEDORES PIX",
    "REEDIV",
];

/// General non-supplier phrases: internal module postings, tax-credit
/// reversals, provisions and reclassifications.
pub const GENERAL_PHRASES: &[&str] = &[
    "INTEGRAÇÃO MÓDULO FISCAL",
    "INTEGRAÇÃO MÓDULO FINANCEIRO",
    "INTEGRAÇÃO MÓDULO ORÇAMENTO",
    "CRÉDITO DE ICMS",
    "CREDITO DE ICMS",
    "ESTORNO - LANÇADO VIA REQUISIÇÃO",
    "RECLASSIFICAÇÃO",
    "PROVISÃO DESP",
    "PROVISAO DESP",
];

/// Case-insensitive substring filter over the built-in phrase lists plus any
/// configured extras.
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter {
    extra: Vec<String>,
}

impl IgnoreFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append phrases checked after the built-in lists.
    pub fn with_extra_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra.extend(
            phrases
                .into_iter()
                .map(|p| p.as_ref().trim().to_uppercase())
                .filter(|p| !p.is_empty()),
        );
        self
    }

    /// The first phrase found in the narration, if any.
    pub fn matching_phrase(&self, narration: &str) -> Option<&str> {
        let upper = narration.to_uppercase();

        let builtin = CONTEXT_PHRASES
            .iter()
            .chain(GENERAL_PHRASES.iter())
            .find(|phrase| upper.contains(**phrase));
        if let Some(phrase) = builtin {
            return Some(*phrase);
        }

        self.extra
            .iter()
            .find(|phrase| upper.contains(phrase.as_str()))
            .map(String::as_str)
    }

    pub fn is_ignored(&self, narration: &str) -> bool {
        self.matching_phrase(narration).is_some()
    }
}
