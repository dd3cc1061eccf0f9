//! Rule catalog types, loading, validation, and storage.
//!
//! The catalog lifecycle runs left to right through this module: a draft is
//! parsed from the Configuration Store wire format ([`loader`]), checked
//! against the publish invariants ([`validator`]), and swapped in as the new
//! immutable current version ([`store`]).

mod loader;
mod published;
mod store;
mod types;
mod validator;

pub use loader::{DraftCatalog, DraftDimension, DraftTier, WirePricingType};
pub use published::PublishedCatalog;
pub use store::{CatalogId, CatalogStore};
pub use types::{
    BinaryChoice, BinaryChoiceTier, CategoricalTier, Dimension, DimensionKey, DimensionKind,
    PricingType, QuoteOption, RangeTier, RiskBucket, RuleCatalog, TierSet, UpperBound,
};
pub use validator::{validate, ValidationReport};
