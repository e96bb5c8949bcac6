//! Storage seam for supplier records.

mod memory;

pub use memory::InMemoryStore;

use crate::error::StoreError;
use crate::models::supplier::{NewSupplier, Supplier};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Lookup and creation of supplier records.
///
/// Names passed in are canonical (see [`normalize_name`]); implementations
/// compare them as-is.
///
/// [`normalize_name`]: crate::models::supplier::normalize_name
pub trait SupplierStore {
    /// Active supplier whose canonical name equals `name`.
    fn find_active_by_name(&self, name: &str) -> Result<Option<Supplier>>;

    /// Up to `limit` active suppliers whose name contains every fragment.
    fn find_active_containing(&self, fragments: &[&str], limit: usize) -> Result<Vec<Supplier>>;

    /// Whether any supplier, active or inactive, uses `code`.
    fn code_exists(&self, code: &str) -> Result<bool>;

    /// Persist a new supplier.
    fn create(&mut self, supplier: NewSupplier) -> Result<Supplier>;
}
