//! Import session: extractor, resolver and journal driven together.

use tracing::warn;

use crate::error::{FailureReason, Result};
use crate::extract::SupplierExtractor;
use crate::journal::{ErrorJournal, FailureRecord};
use crate::models::config::SupplinkConfig;
use crate::models::supplier::{NarrationContext, Supplier};
use crate::resolve::SupplierResolver;
use crate::store::SupplierStore;

/// One import run. Failures accumulate in the session journal until
/// [`ImportSession::clear_errors`] is called.
pub struct ImportSession<S> {
    extractor: SupplierExtractor,
    resolver: SupplierResolver<S>,
    journal: ErrorJournal,
}

impl<S: SupplierStore> ImportSession<S> {
    pub fn new(extractor: SupplierExtractor, resolver: SupplierResolver<S>) -> Self {
        Self {
            extractor,
            resolver,
            journal: ErrorJournal::new(),
        }
    }

    /// Build a session from configuration around `store`.
    pub fn from_config(store: S, config: &SupplinkConfig) -> Self {
        Self {
            extractor: SupplierExtractor::from_config(&config.extraction),
            resolver: SupplierResolver::with_config(store, config.resolver.clone()),
            journal: ErrorJournal::with_excerpt_len(config.extraction.journal_excerpt_len),
        }
    }

    /// Extract and resolve the supplier of one narration.
    ///
    /// `Ok(None)` means the narration was ignored or recorded as a failure.
    /// Store failures are returned as errors.
    pub fn process(
        &mut self,
        narration: &str,
        context: Option<&NarrationContext>,
    ) -> Result<Option<Supplier>> {
        let Some(candidate) = self.extractor.extract(narration, context, &mut self.journal) else {
            return Ok(None);
        };
        let supplier = self.resolver.resolve_or_create(&candidate, narration)?;
        Ok(Some(supplier))
    }

    /// Record a narration that could not be read as text.
    ///
    /// `narration` is whatever could be recovered from the input.
    pub fn record_malformed(&mut self, narration: &str, context: Option<&NarrationContext>) {
        warn!("Malformed narration: {}", narration);
        self.journal
            .record_failure(narration, context, FailureReason::MalformedInput, Vec::new());
    }

    pub fn errors(&self) -> &[FailureRecord] {
        self.journal.records()
    }

    pub fn clear_errors(&mut self) {
        self.journal.clear();
    }

    pub fn report(&self) -> String {
        self.journal.report()
    }

    pub fn extractor(&self) -> &SupplierExtractor {
        &self.extractor
    }

    pub fn resolver(&self) -> &SupplierResolver<S> {
        &self.resolver
    }

    pub fn into_resolver(self) -> SupplierResolver<S> {
        self.resolver
    }
}
