//! Error types for the rating engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate,
//! split along the boundary the engine cares about: configuration problems
//! found while validating a draft catalog, and evaluation problems scoped to
//! a single quote.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::catalog::{DimensionKey, ValidationReport};

/// The main error type for the rating engine.
///
/// All fallible operations at the engine boundary return this type.
///
/// # Example
///
/// ```
/// use rating_engine::error::EngineError;
///
/// let error = EngineError::CatalogNotFound {
///     insurer_id: "ins_001".to_string(),
///     product_id: "car".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "no published catalog for insurer 'ins_001' and product 'car'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No published catalog version exists for the requested insurer/product.
    #[error("no published catalog for insurer '{insurer_id}' and product '{product_id}'")]
    CatalogNotFound {
        /// The insurer the catalog was requested for.
        insurer_id: String,
        /// The product the catalog was requested for.
        product_id: String,
    },

    /// A draft catalog file was not found at the specified path.
    #[error("catalog file not found: {path}")]
    CatalogFileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A draft catalog could not be parsed from its wire representation.
    #[error("failed to parse draft catalog: {message}")]
    CatalogParseError {
        /// A description of the parse failure.
        message: String,
    },

    /// A draft catalog failed validation and was not published.
    #[error("draft catalog failed validation with {} error(s)", report.errors.len())]
    ValidationFailed {
        /// The full validation report, listing every violation found.
        report: ValidationReport,
    },

    /// A quote evaluation failed.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// A type alias for Results that return [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;

/// An error raised while evaluating a single quote.
///
/// These errors are scoped to one quote only and indicate a gap between the
/// quote's attributes and the published configuration. They are surfaced to
/// the caller as a conservative `NO_QUOTE` outcome, never silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The context value falls below the lowest configured `from` bound.
    #[error("no matching tier in dimension '{dimension}' for value {value}")]
    NoMatchingTier {
        /// The dimension that was being resolved.
        dimension: DimensionKey,
        /// The context value that did not match any tier.
        value: Decimal,
    },

    /// The context supplied a label outside the configured domain.
    #[error("unknown label '{label}' in dimension '{dimension}'")]
    UnknownLabel {
        /// The dimension that was being resolved.
        dimension: DimensionKey,
        /// The label that is not present in any configured bucket.
        label: String,
    },
}

/// A violation found while validating a draft catalog.
///
/// Validation collects every violation in the draft rather than stopping at
/// the first, so an editor can fix a whole catalog in one pass. Whether a
/// violation blocks publishing is decided by the [`ValidationReport`] it is
/// reported in: overlaps, duplicate labels, and missing open-ended tiers are
/// errors; finite gaps and empty dimensions are warnings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Two tiers of a numeric dimension cover intersecting ranges.
    #[error("overlapping tiers in dimension '{dimension}': {first} and {second}")]
    OverlappingRange {
        /// The dimension containing the overlap.
        dimension: DimensionKey,
        /// The lower of the two overlapping tiers, as `from..to`.
        first: String,
        /// The higher of the two overlapping tiers, as `from..to`.
        second: String,
    },

    /// A finite hole between two adjacent tiers that no tier covers.
    #[error("gap in dimension '{dimension}': no tier covers {gap_from} to {gap_to}")]
    GapInRange {
        /// The dimension containing the gap.
        dimension: DimensionKey,
        /// The inclusive start of the uncovered range.
        gap_from: Decimal,
        /// The exclusive end of the uncovered range.
        gap_to: Decimal,
    },

    /// The same label is assigned to more than one tier of a categorical
    /// dimension.
    #[error("duplicate label '{label}' in dimension '{dimension}'")]
    DuplicateCategoricalLabel {
        /// The dimension containing the duplicate.
        dimension: DimensionKey,
        /// The label that appears more than once.
        label: String,
    },

    /// A numeric dimension has no open-ended last tier, leaving large inputs
    /// unmatched.
    #[error("dimension '{dimension}' has no open-ended tier")]
    MissingOpenEndedTier {
        /// The dimension missing an open-ended tier.
        dimension: DimensionKey,
    },

    /// An active dimension has no tiers at all.
    #[error("dimension '{dimension}' is active but has no tiers")]
    EmptyDimension {
        /// The dimension with no tiers.
        dimension: DimensionKey,
    },
}

impl ConfigurationError {
    /// Returns a stable machine-readable code for this violation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OverlappingRange { .. } => "OVERLAPPING_RANGE",
            Self::GapInRange { .. } => "GAP_IN_RANGE",
            Self::DuplicateCategoricalLabel { .. } => "DUPLICATE_CATEGORICAL_LABEL",
            Self::MissingOpenEndedTier { .. } => "MISSING_OPEN_ENDED_TIER",
            Self::EmptyDimension { .. } => "EMPTY_DIMENSION",
        }
    }

    /// Returns the dimension the violation was found in.
    pub fn dimension(&self) -> DimensionKey {
        match self {
            Self::OverlappingRange { dimension, .. }
            | Self::GapInRange { dimension, .. }
            | Self::DuplicateCategoricalLabel { dimension, .. }
            | Self::MissingOpenEndedTier { dimension }
            | Self::EmptyDimension { dimension } => *dimension,
        }
    }
}
