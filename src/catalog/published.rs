//! Published catalog snapshots.
//!
//! A [`PublishedCatalog`] is the read-side view the evaluator works against:
//! range tiers pre-sorted for binary search and a label index built once per
//! version so categorical lookup is O(1) on the per-quote path.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::types::{normalize_label, DimensionKey, RuleCatalog, TierSet};

/// An immutable, evaluation-ready catalog version.
///
/// Publishing sorts every numeric dimension's tiers by their lower bound and
/// indexes every categorical and binary dimension's labels. The snapshot is
/// shared across concurrent quote evaluations behind an `Arc` and is never
/// mutated afterwards.
#[derive(Debug)]
pub struct PublishedCatalog {
    catalog: RuleCatalog,
    label_index: HashMap<DimensionKey, HashMap<String, usize>>,
    published_at: DateTime<Utc>,
}

impl PublishedCatalog {
    /// Builds an evaluation-ready snapshot from a catalog.
    ///
    /// Callers normally obtain published catalogs from
    /// [`CatalogStore::publish`], which validates the draft first;
    /// constructing one directly skips validation.
    ///
    /// [`CatalogStore::publish`]: crate::catalog::CatalogStore::publish
    pub fn new(mut catalog: RuleCatalog) -> Self {
        for dimension in catalog.dimensions.values_mut() {
            if let TierSet::Range(tiers) = &mut dimension.tiers {
                tiers.sort_by(|a, b| a.from.cmp(&b.from));
            }
        }

        let mut label_index = HashMap::new();
        for (key, dimension) in &catalog.dimensions {
            match &dimension.tiers {
                TierSet::Categorical(tiers) => {
                    let map = tiers
                        .iter()
                        .enumerate()
                        .map(|(index, tier)| (normalize_label(&tier.label), index))
                        .collect();
                    label_index.insert(*key, map);
                }
                TierSet::Binary(tiers) => {
                    let map = tiers
                        .iter()
                        .enumerate()
                        .map(|(index, tier)| (tier.choice.as_str().to_string(), index))
                        .collect();
                    label_index.insert(*key, map);
                }
                TierSet::Range(_) => {}
            }
        }

        Self {
            catalog,
            label_index,
            published_at: Utc::now(),
        }
    }

    /// Returns the underlying catalog.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Returns the catalog version.
    pub fn version(&self) -> u32 {
        self.catalog.version
    }

    /// Returns when this version was published.
    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// Returns the label→tier index for a categorical or binary dimension.
    pub(crate) fn label_index(&self, key: DimensionKey) -> Option<&HashMap<String, usize>> {
        self.label_index.get(&key)
    }
}
