//! Draft catalog validation.
//!
//! This module checks the invariants a catalog must satisfy before it can be
//! published: numeric tiers must not overlap and must end open-ended, and
//! categorical labels must be unique across buckets. Validation collects
//! every violation rather than stopping at the first, so an editor can fix a
//! whole catalog in one pass.

use crate::error::ConfigurationError;

use super::types::{
    normalize_label, BinaryChoiceTier, CategoricalTier, DimensionKey, RangeTier, RuleCatalog,
    TierSet, UpperBound,
};
use std::collections::HashSet;

/// The outcome of validating a draft catalog.
///
/// Errors block publishing; warnings do not, but are surfaced so an editor
/// can decide whether a finite gap or an empty dimension is intentional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Violations that prevent the draft from being published.
    pub errors: Vec<ConfigurationError>,
    /// Findings that are reported but do not block publishing.
    pub warnings: Vec<ConfigurationError>,
}

impl ValidationReport {
    /// Returns true if the draft may be published.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates a draft catalog against the publish invariants.
///
/// Every dimension in the draft is checked, including inactive ones: an
/// inactive dimension is still part of the snapshot and may be re-activated
/// by a later edit, so structural defects in it are reported now.
///
/// # Example
///
/// ```
/// use rating_engine::catalog::{validate, RuleCatalog};
/// use std::collections::BTreeMap;
///
/// let empty = RuleCatalog {
///     insurer_id: "ins_001".to_string(),
///     product_id: "car".to_string(),
///     version: 0,
///     dimensions: BTreeMap::new(),
/// };
/// assert!(validate(&empty).is_valid());
/// ```
pub fn validate(catalog: &RuleCatalog) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (key, dimension) in &catalog.dimensions {
        if dimension.tiers.is_empty() {
            if dimension.active {
                report
                    .warnings
                    .push(ConfigurationError::EmptyDimension { dimension: *key });
            }
            continue;
        }

        match &dimension.tiers {
            TierSet::Range(tiers) => validate_range(*key, tiers, &mut report),
            TierSet::Categorical(tiers) => validate_categorical(*key, tiers, &mut report),
            TierSet::Binary(tiers) => validate_binary(*key, tiers, &mut report),
        }
    }

    report
}

/// Checks ordering, overlap, gap, and open-ended invariants for one numeric
/// dimension.
fn validate_range(key: DimensionKey, tiers: &[RangeTier], report: &mut ValidationReport) {
    let mut sorted: Vec<&RangeTier> = tiers.iter().collect();
    sorted.sort_by(|a, b| a.from.cmp(&b.from));

    let mut has_open_ended = false;
    for (i, tier) in sorted.iter().enumerate() {
        if tier.to.is_open_ended() {
            has_open_ended = true;
            // An open-ended tier anywhere but last swallows every tier after it.
            if let Some(next) = sorted.get(i + 1) {
                report.errors.push(ConfigurationError::OverlappingRange {
                    dimension: key,
                    first: tier.span(),
                    second: next.span(),
                });
            }
        }
    }

    for pair in sorted.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if let UpperBound::Finite(to) = lower.to {
            if to > upper.from {
                report.errors.push(ConfigurationError::OverlappingRange {
                    dimension: key,
                    first: lower.span(),
                    second: upper.span(),
                });
            } else if to < upper.from {
                // A finite hole is legal but almost always a misconfiguration.
                report.warnings.push(ConfigurationError::GapInRange {
                    dimension: key,
                    gap_from: to,
                    gap_to: upper.from,
                });
            }
        }
    }

    if !has_open_ended {
        report
            .errors
            .push(ConfigurationError::MissingOpenEndedTier { dimension: key });
    }
}

/// Checks that no label appears in more than one tier of a categorical
/// dimension, regardless of which risk bucket each occurrence points at.
fn validate_categorical(
    key: DimensionKey,
    tiers: &[CategoricalTier],
    report: &mut ValidationReport,
) {
    let mut seen = HashSet::new();
    for tier in tiers {
        if !seen.insert(normalize_label(&tier.label)) {
            report
                .errors
                .push(ConfigurationError::DuplicateCategoricalLabel {
                    dimension: key,
                    label: tier.label.clone(),
                });
        }
    }
}

/// Checks that each yes/no election is priced by at most one tier.
fn validate_binary(key: DimensionKey, tiers: &[BinaryChoiceTier], report: &mut ValidationReport) {
    let mut seen = HashSet::new();
    for tier in tiers {
        if !seen.insert(tier.choice) {
            report
                .errors
                .push(ConfigurationError::DuplicateCategoricalLabel {
                    dimension: key,
                    label: tier.choice.as_str().to_string(),
                });
        }
    }
}
