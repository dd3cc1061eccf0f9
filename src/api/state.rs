//! Application state for the rating engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::catalog::CatalogStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// store holding the current published catalog version per
/// (insurer, product) pair.
#[derive(Clone)]
pub struct AppState {
    /// The published catalog store.
    store: Arc<CatalogStore>,
}

impl AppState {
    /// Creates a new application state with an empty catalog store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(CatalogStore::new()),
        }
    }

    /// Creates a new application state around an existing store.
    pub fn with_store(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Returns a reference to the catalog store.
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Required for axum state.
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_store() {
        let state = AppState::new();
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.store, &clone.store));
    }
}
