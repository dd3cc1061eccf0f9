//! Draft catalog loading from the Configuration Store wire format.
//!
//! The Configuration Store exports each dimension as an array of loosely
//! shaped tier rows whose field names vary by screen (`from_months`,
//! `from_years`, `from_amount`, `loading_discount`, `cover_option`, ...).
//! This module is the only place those spellings, the legacy `999` and
//! `null` open-ended sentinels, and the `FIXED_RATE` pricing alias are
//! accepted; everything past [`DraftCatalog::into_catalog`] works on the
//! strongly-typed [`RuleCatalog`] model.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    BinaryChoice, BinaryChoiceTier, CategoricalTier, Dimension, DimensionKey, DimensionKind,
    PricingType, QuoteOption, RangeTier, RiskBucket, RuleCatalog, TierSet, UpperBound,
};

/// Pricing type as spelled by the Configuration Store.
///
/// `FIXED_RATE` is a legacy spelling some screens still emit; it is treated
/// as `FIXED_AMOUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WirePricingType {
    /// A signed fraction of the base premium.
    Percentage,
    /// Legacy alias of `FIXED_AMOUNT`.
    FixedRate,
    /// A signed absolute currency amount.
    FixedAmount,
}

impl From<WirePricingType> for PricingType {
    fn from(wire: WirePricingType) -> Self {
        match wire {
            WirePricingType::Percentage => PricingType::Percentage,
            WirePricingType::FixedRate | WirePricingType::FixedAmount => PricingType::FixedAmount,
        }
    }
}

/// One tier row as exported by the Configuration Store.
///
/// The struct is a union of the range, categorical, and binary row shapes;
/// which fields are required is decided by the dimension the row belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftTier {
    /// Lower bound of a range row.
    #[serde(
        default,
        alias = "from_amount",
        alias = "from_months",
        alias = "from_years"
    )]
    pub from: Option<Decimal>,
    /// Upper bound of a range row; absent or `null` means open-ended.
    #[serde(default, alias = "to_amount", alias = "to_months", alias = "to_years")]
    pub to: Option<Decimal>,
    /// Label of a categorical row.
    #[serde(default, alias = "name")]
    pub label: Option<String>,
    /// Risk bucket of a categorical row.
    #[serde(default)]
    pub risk_bucket: Option<RiskBucket>,
    /// Election of a binary row.
    #[serde(default, alias = "cover_option")]
    pub choice: Option<BinaryChoice>,
    /// How the row's value is applied.
    pub pricing_type: WirePricingType,
    /// The signed loading or discount.
    #[serde(alias = "loading_discount")]
    pub value: Decimal,
    /// The quoting outcome the row votes for.
    pub quote_option: QuoteOption,
    /// Position of the row in the configuration screen.
    #[serde(default)]
    pub display_order: Option<u32>,
    /// Rows toggled off in the screen are dropped at load.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// One dimension as exported by the Configuration Store.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftDimension {
    /// Whether the dimension participates in evaluation.
    #[serde(default = "default_true", alias = "is_active")]
    pub active: bool,
    /// The dimension's tier rows.
    #[serde(default)]
    pub tiers: Vec<DraftTier>,
}

/// A complete draft catalog as exported by the Configuration Store.
///
/// The draft is untrusted until it has passed [`validate`] and been
/// published; any `version` the store attaches is ignored, versions are
/// assigned by the [`CatalogStore`] at publish.
///
/// [`validate`]: crate::catalog::validate
/// [`CatalogStore`]: crate::catalog::CatalogStore
#[derive(Debug, Clone, Deserialize)]
pub struct DraftCatalog {
    /// The insurer the draft belongs to.
    pub insurer_id: String,
    /// The product the draft belongs to.
    pub product_id: String,
    /// The dimensions of the draft, keyed by wire name.
    #[serde(default)]
    pub dimensions: BTreeMap<DimensionKey, DraftDimension>,
}

fn default_true() -> bool {
    true
}

/// The legacy "and above" sentinel used by month/year screens.
fn is_legacy_open_ended(key: DimensionKey, to: Decimal) -> bool {
    key.uses_month_or_year_units() && to == Decimal::from(999)
}

impl DraftCatalog {
    /// Parses a draft catalog from a YAML document.
    ///
    /// # Example
    ///
    /// ```
    /// use rating_engine::catalog::DraftCatalog;
    ///
    /// let yaml = r#"
    /// insurer_id: ins_001
    /// product_id: car
    /// dimensions:
    ///   project_duration:
    ///     tiers:
    ///       - { from_months: 0, to_months: 12, pricing_type: PERCENTAGE, value: "-0.05", quote_option: AUTO_QUOTE }
    ///       - { from_months: 12, to_months: 999, pricing_type: PERCENTAGE, value: "0.10", quote_option: QUOTE_AND_REFER }
    /// "#;
    /// let draft = DraftCatalog::from_yaml(yaml).unwrap();
    /// assert_eq!(draft.insurer_id, "ins_001");
    /// ```
    pub fn from_yaml(content: &str) -> EngineResult<Self> {
        serde_yaml::from_str(content).map_err(|e| EngineError::CatalogParseError {
            message: e.to_string(),
        })
    }

    /// Parses a draft catalog from a JSON document.
    pub fn from_json(content: &str) -> EngineResult<Self> {
        serde_json::from_str(content).map_err(|e| EngineError::CatalogParseError {
            message: e.to_string(),
        })
    }

    /// Loads a draft catalog from a `.yaml`, `.yml`, or `.json` file.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::CatalogFileNotFound {
            path: path_str.clone(),
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            _ => Err(EngineError::CatalogParseError {
                message: format!("unsupported catalog file extension: {}", path_str),
            }),
        }
    }

    /// Converts the draft into the strongly-typed catalog model.
    ///
    /// Normalizations applied here: inactive rows are dropped, `null` and
    /// legacy `999` upper bounds become [`UpperBound::OpenEnded`],
    /// `FIXED_RATE` becomes [`PricingType::FixedAmount`], and missing
    /// display orders fall back to row position. Rows missing a field their
    /// dimension kind requires fail with
    /// [`EngineError::CatalogParseError`].
    pub fn into_catalog(self) -> EngineResult<RuleCatalog> {
        let mut dimensions = BTreeMap::new();

        for (key, draft) in self.dimensions {
            let active_rows: Vec<(usize, DraftTier)> = draft
                .tiers
                .into_iter()
                .enumerate()
                .filter(|(_, row)| row.is_active)
                .collect();

            let tiers = match key.kind() {
                DimensionKind::Range => {
                    TierSet::Range(convert_range_rows(key, active_rows)?)
                }
                DimensionKind::Categorical => {
                    TierSet::Categorical(convert_categorical_rows(key, active_rows)?)
                }
                DimensionKind::Binary => {
                    TierSet::Binary(convert_binary_rows(key, active_rows)?)
                }
            };

            dimensions.insert(
                key,
                Dimension {
                    active: draft.active,
                    tiers,
                },
            );
        }

        Ok(RuleCatalog {
            insurer_id: self.insurer_id,
            product_id: self.product_id,
            version: 0,
            dimensions,
        })
    }
}

fn convert_range_rows(
    key: DimensionKey,
    rows: Vec<(usize, DraftTier)>,
) -> EngineResult<Vec<RangeTier>> {
    rows.into_iter()
        .map(|(index, row)| {
            let from = row.from.ok_or_else(|| EngineError::CatalogParseError {
                message: format!("dimension '{}': range tier {} has no lower bound", key, index),
            })?;
            let to = match row.to {
                None => UpperBound::OpenEnded,
                Some(to) if is_legacy_open_ended(key, to) => UpperBound::OpenEnded,
                Some(to) => UpperBound::Finite(to),
            };
            Ok(RangeTier {
                from,
                to,
                pricing_type: row.pricing_type.into(),
                value: row.value,
                quote_option: row.quote_option,
                display_order: row.display_order.unwrap_or(index as u32 + 1),
            })
        })
        .collect()
}

fn convert_categorical_rows(
    key: DimensionKey,
    rows: Vec<(usize, DraftTier)>,
) -> EngineResult<Vec<CategoricalTier>> {
    rows.into_iter()
        .map(|(index, row)| {
            let label = row.label.ok_or_else(|| EngineError::CatalogParseError {
                message: format!("dimension '{}': tier {} has no label", key, index),
            })?;
            let risk_bucket = row
                .risk_bucket
                .ok_or_else(|| EngineError::CatalogParseError {
                    message: format!(
                        "dimension '{}': tier '{}' has no risk bucket",
                        key, label
                    ),
                })?;
            Ok(CategoricalTier {
                label,
                risk_bucket,
                pricing_type: row.pricing_type.into(),
                value: row.value,
                quote_option: row.quote_option,
            })
        })
        .collect()
}

fn convert_binary_rows(
    key: DimensionKey,
    rows: Vec<(usize, DraftTier)>,
) -> EngineResult<Vec<BinaryChoiceTier>> {
    rows.into_iter()
        .map(|(index, row)| {
            let choice = row.choice.ok_or_else(|| EngineError::CatalogParseError {
                message: format!("dimension '{}': tier {} has no cover option", key, index),
            })?;
            Ok(BinaryChoiceTier {
                choice,
                pricing_type: row.pricing_type.into(),
                value: row.value,
                quote_option: row.quote_option,
            })
        })
        .collect()
}
