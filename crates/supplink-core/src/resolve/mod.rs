//! Supplier resolution against the store.
//!
//! The extraction path only uses exact lookup followed by creation; fuzzy
//! lookup and suggestions are explicit calls.

pub mod code;
pub mod similarity;

use tracing::info;

use crate::extract::text::significant_tokens;
use crate::models::config::ResolverConfig;
use crate::models::supplier::{excerpt, normalize_name, ExtractionCandidate, NewSupplier, Supplier};
use crate::store::{Result, SupplierStore};

use code::generate_code;
use similarity::jaccard;

/// Outcome of [`SupplierResolver::resolve_or_suggest`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// An active supplier has exactly this name.
    Found(Supplier),
    /// Ranked similar suppliers, best first. May be empty.
    Suggestions(Vec<(Supplier, f64)>),
}

/// Resolves candidates to supplier records, creating them on demand.
pub struct SupplierResolver<S> {
    store: S,
    config: ResolverConfig,
}

impl<S: SupplierStore> SupplierResolver<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, ResolverConfig::default())
    }

    pub fn with_config(store: S, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Active supplier with exactly this canonical name.
    pub fn find_exact(&self, name: &str) -> Result<Option<Supplier>> {
        self.store.find_active_by_name(&normalize_name(name))
    }

    /// First pooled supplier whose similarity to `name` exceeds `threshold`.
    ///
    /// The pool is the active suppliers containing the first two significant
    /// tokens of the name, bounded by `candidate_limit`.
    pub fn find_similar(&self, name: &str, threshold: f64) -> Result<Option<Supplier>> {
        let target = normalize_name(name);
        let pool = self.candidate_pool(&target, 2)?;

        let found = pool
            .into_iter()
            .find(|supplier| jaccard(&target, &supplier.name) > threshold);
        if let Some(supplier) = &found {
            info!("Similar supplier found: {} ({})", supplier.code, supplier.name);
        }
        Ok(found)
    }

    /// [`find_similar`](Self::find_similar) with the configured threshold.
    pub fn find_fuzzy(&self, name: &str) -> Result<Option<Supplier>> {
        self.find_similar(name, self.config.fuzzy_threshold)
    }

    /// Suppliers scoring at least `min_score`, best first, ties by name.
    pub fn suggest(&self, name: &str, min_score: f64, limit: usize) -> Result<Vec<(Supplier, f64)>> {
        let target = normalize_name(name);
        let pool = self.candidate_pool(&target, 1)?;

        let mut scored: Vec<(Supplier, f64)> = pool
            .into_iter()
            .map(|supplier| {
                let score = jaccard(&target, &supplier.name);
                (supplier, score)
            })
            .filter(|(_, score)| *score >= min_score)
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.name.cmp(&b.0.name)));
        scored.truncate(limit);
        Ok(scored)
    }

    /// Exact match, or ranked suggestions. Never creates a supplier.
    pub fn resolve_or_suggest(&self, name: &str) -> Result<Resolution> {
        if let Some(supplier) = self.find_exact(name)? {
            return Ok(Resolution::Found(supplier));
        }
        let suggestions = self.suggest(
            name,
            self.config.suggestion_threshold,
            self.config.suggestion_limit,
        )?;
        Ok(Resolution::Suggestions(suggestions))
    }

    /// Return the active supplier named like the candidate, or create one.
    ///
    /// Created suppliers are flagged auto-created and keep an excerpt of the
    /// narration they came from.
    pub fn resolve_or_create(
        &mut self,
        candidate: &ExtractionCandidate,
        narration: &str,
    ) -> Result<Supplier> {
        let name = normalize_name(&candidate.name);
        if let Some(existing) = self.store.find_active_by_name(&name)? {
            return Ok(existing);
        }

        let store = &self.store;
        let code = generate_code(&name, |code| store.code_exists(code))?;

        let supplier = self.store.create(NewSupplier {
            code,
            name,
            tax_id: candidate.tax_id.clone(),
            auto_created: true,
            origin_excerpt: excerpt(narration, self.config.origin_excerpt_len),
        })?;

        info!(
            "Created supplier {} ({}) from rule {}",
            supplier.code, supplier.name, candidate.rule
        );
        Ok(supplier)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Up to `candidate_limit` active suppliers containing the first
    /// `tokens` significant tokens of `target`.
    fn candidate_pool(&self, target: &str, tokens: usize) -> Result<Vec<Supplier>> {
        let keys: Vec<&str> = significant_tokens(target).into_iter().take(tokens).collect();
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        self.store
            .find_active_containing(&keys, self.config.candidate_limit)
    }
}
