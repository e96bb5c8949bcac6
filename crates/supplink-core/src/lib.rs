//! Core library for supplier extraction from accounting narrations.
//!
//! This crate provides:
//! - An ignore filter for narrations that never name a supplier
//! - A priority-ordered rule cascade with a known-supplier whitelist override
//! - Name sanitizing and legal-entity / natural-person validation
//! - Supplier resolution (exact, fuzzy, suggestions) and code generation
//! - A session-scoped error journal and an import session driver

pub mod error;
pub mod extract;
pub mod journal;
pub mod models;
pub mod resolve;
pub mod session;
pub mod store;

pub use error::{FailureReason, Result, StoreError, SupplinkError};
pub use extract::{extract_document_number, ExtractionRule, SupplierExtractor};
pub use journal::{ErrorJournal, FailureContext, FailureRecord};
pub use models::config::SupplinkConfig;
pub use models::supplier::{EntityType, ExtractionCandidate, NarrationContext, NewSupplier, Supplier};
pub use resolve::{Resolution, SupplierResolver};
pub use session::ImportSession;
pub use store::{InMemoryStore, SupplierStore};
