//! The published catalog store.
//!
//! Holds the current [`PublishedCatalog`] version per (insurer, product)
//! pair. Publication is the only mutating operation in the engine: a draft
//! is validated, given the next version number, and swapped in atomically,
//! so concurrent quote evaluations always see either the old complete
//! version or the new complete version.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{EngineError, EngineResult};

use super::published::PublishedCatalog;
use super::types::RuleCatalog;
use super::validator::validate;

/// Identifies the catalog of one (insurer, product) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogId {
    /// The insurer.
    pub insurer_id: String,
    /// The product.
    pub product_id: String,
}

/// Thread-safe registry of the current catalog version per
/// (insurer, product) pair.
///
/// Readers take the lock only long enough to clone an `Arc` out; evaluation
/// itself runs entirely on the immutable snapshot.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalogs: RwLock<HashMap<CatalogId, Arc<PublishedCatalog>>>,
}

impl CatalogStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a draft and, on success, publishes it as the next version.
    ///
    /// The draft's own version field is ignored; versions are assigned here,
    /// monotonically per (insurer, product), starting at 1. On validation
    /// failure the previous version (if any) remains live and the full
    /// [`ValidationReport`] is returned in the error.
    ///
    /// [`ValidationReport`]: crate::catalog::ValidationReport
    pub fn publish(&self, draft: RuleCatalog) -> EngineResult<Arc<PublishedCatalog>> {
        let report = validate(&draft);
        if !report.is_valid() {
            return Err(EngineError::ValidationFailed { report });
        }

        let id = CatalogId {
            insurer_id: draft.insurer_id.clone(),
            product_id: draft.product_id.clone(),
        };

        let mut catalogs = self.catalogs.write().unwrap_or_else(|e| e.into_inner());
        let next_version = catalogs.get(&id).map_or(1, |current| current.version() + 1);

        let mut catalog = draft;
        catalog.version = next_version;
        let published = Arc::new(PublishedCatalog::new(catalog));
        catalogs.insert(id, Arc::clone(&published));

        Ok(published)
    }

    /// Returns the current published version for an (insurer, product)
    /// pair, if one exists.
    pub fn current(&self, insurer_id: &str, product_id: &str) -> Option<Arc<PublishedCatalog>> {
        let id = CatalogId {
            insurer_id: insurer_id.to_string(),
            product_id: product_id.to_string(),
        };
        let catalogs = self.catalogs.read().unwrap_or_else(|e| e.into_inner());
        catalogs.get(&id).cloned()
    }
}
