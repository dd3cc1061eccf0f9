//! Core catalog types for the rating engine.
//!
//! This module contains the strongly-typed rating rule structures that make
//! up a [`RuleCatalog`]: the three tier kinds (range, categorical, binary),
//! the dimensions that group them, and the enums describing pricing effects
//! and quoting outcomes.

use rust_decimal::Decimal;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How a tier's `value` is applied to the base premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingType {
    /// `value` is a signed fraction of the base premium (loading positive,
    /// discount negative).
    Percentage,
    /// `value` is a signed absolute currency amount.
    FixedAmount,
}

/// The quoting outcome a single tier votes for.
///
/// Variants are ordered by strictness, so the strictest applicable outcome
/// is simply the maximum:
///
/// ```
/// use rating_engine::catalog::QuoteOption;
///
/// assert!(QuoteOption::NoQuote > QuoteOption::QuoteAndRefer);
/// assert!(QuoteOption::QuoteAndRefer > QuoteOption::AutoQuote);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteOption {
    /// The quote may be issued without underwriter involvement.
    AutoQuote,
    /// The quote is produced but referred to an underwriter.
    QuoteAndRefer,
    /// The quote is declined.
    NoQuote,
}

/// The upper bound of a range tier.
///
/// `OpenEnded` is an explicit marker distinct from any finite number; it
/// only appears on the last tier of a dimension and makes that tier match
/// every value at or above its `from`. Serialized as the finite number or
/// `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpperBound {
    /// A finite, exclusive upper bound.
    Finite(Decimal),
    /// No upper bound; the tier matches everything from `from` upward.
    OpenEnded,
}

impl UpperBound {
    /// Returns true if this bound is open-ended.
    pub fn is_open_ended(&self) -> bool {
        matches!(self, UpperBound::OpenEnded)
    }
}

impl fmt::Display for UpperBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpperBound::Finite(value) => write!(f, "{}", value),
            UpperBound::OpenEnded => Ok(()),
        }
    }
}

impl Serialize for UpperBound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UpperBound::Finite(value) => serializer.serialize_some(value),
            UpperBound::OpenEnded => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for UpperBound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bound = Option::<Decimal>::deserialize(deserializer)?;
        Ok(bound.map_or(UpperBound::OpenEnded, UpperBound::Finite))
    }
}

/// One row of a numeric rating dimension.
///
/// A tier covers the half-open interval `[from, to)`; the open-ended tier
/// covers `[from, ∞)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeTier {
    /// The inclusive lower bound of the tier.
    pub from: Decimal,
    /// The exclusive upper bound, or open-ended for the last tier.
    pub to: UpperBound,
    /// How `value` is applied to the base premium.
    pub pricing_type: PricingType,
    /// The signed loading (positive) or discount (negative).
    pub value: Decimal,
    /// The quoting outcome this tier votes for.
    pub quote_option: QuoteOption,
    /// Position of the tier in the configuration screen.
    pub display_order: u32,
}

impl RangeTier {
    /// Returns true if `x` falls within this tier.
    pub fn matches(&self, x: Decimal) -> bool {
        x >= self.from
            && match self.to {
                UpperBound::Finite(to) => x < to,
                UpperBound::OpenEnded => true,
            }
    }

    /// Returns the tier's interval as a `from..to` string for reporting.
    ///
    /// The open-ended tier renders as `from..`.
    pub fn span(&self) -> String {
        format!("{}..{}", self.from, self.to)
    }
}

/// The risk bucket a categorical label is assigned to.
///
/// Insurers may define buckets beyond the four standard ones; unknown
/// bucket names deserialize into `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBucket {
    /// Low risk.
    Low,
    /// Moderate risk.
    Moderate,
    /// High risk.
    High,
    /// Very high risk.
    VeryHigh,
    /// An insurer-defined bucket outside the standard set.
    #[serde(untagged)]
    Custom(String),
}

/// One row of a categorical rating dimension (soil type, security
/// arrangement, and similar classifications).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalTier {
    /// The configured label (e.g., `"Clay"`). Matching is case-insensitive.
    pub label: String,
    /// The risk bucket the label is assigned to.
    pub risk_bucket: RiskBucket,
    /// How `value` is applied to the base premium.
    pub pricing_type: PricingType,
    /// The signed loading (positive) or discount (negative).
    pub value: Decimal,
    /// The quoting outcome this tier votes for.
    pub quote_option: QuoteOption,
}

/// A yes/no election on a quote (e.g., cross liability cover).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryChoice {
    /// The cover is elected.
    #[serde(alias = "Yes", alias = "YES")]
    Yes,
    /// The cover is declined.
    #[serde(alias = "No", alias = "NO")]
    No,
}

impl BinaryChoice {
    /// Returns the choice as its canonical lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryChoice::Yes => "yes",
            BinaryChoice::No => "no",
        }
    }
}

/// One row of a binary rating dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryChoiceTier {
    /// The election this tier prices.
    pub choice: BinaryChoice,
    /// How `value` is applied to the base premium.
    pub pricing_type: PricingType,
    /// The signed loading (positive) or discount (negative).
    pub value: Decimal,
    /// The quoting outcome this tier votes for.
    pub quote_option: QuoteOption,
}

/// The kind of tiers a dimension holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    /// Numeric tiers resolved by range matching.
    Range,
    /// Labelled tiers resolved by label lookup.
    Categorical,
    /// Yes/no tiers resolved by the quote's election.
    Binary,
}

/// The ordered tiers of one dimension, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierSet {
    /// Numeric range tiers.
    Range(Vec<RangeTier>),
    /// Categorical label tiers.
    Categorical(Vec<CategoricalTier>),
    /// Binary choice tiers.
    Binary(Vec<BinaryChoiceTier>),
}

impl TierSet {
    /// Returns the kind of tiers this set holds.
    pub fn kind(&self) -> DimensionKind {
        match self {
            TierSet::Range(_) => DimensionKind::Range,
            TierSet::Categorical(_) => DimensionKind::Categorical,
            TierSet::Binary(_) => DimensionKind::Binary,
        }
    }

    /// Returns the number of tiers in the set.
    pub fn len(&self) -> usize {
        match self {
            TierSet::Range(tiers) => tiers.len(),
            TierSet::Categorical(tiers) => tiers.len(),
            TierSet::Binary(tiers) => tiers.len(),
        }
    }

    /// Returns true if the set holds no tiers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One rating dimension: an ordered collection of tiers of a single kind.
///
/// Inactive dimensions are kept in the catalog (so an editor can toggle them
/// back on) but contribute nothing to evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// Whether the dimension participates in evaluation.
    pub active: bool,
    /// The dimension's tiers.
    pub tiers: TierSet,
}

macro_rules! dimension_keys {
    ($( $variant:ident => ($name:literal, $kind:ident) ),+ $(,)?) => {
        /// Identifies one rating dimension of the catalog.
        ///
        /// Each key has a fixed [`DimensionKind`] that determines which
        /// quote attribute it is resolved against.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum DimensionKey {
            $(
                #[doc = $name]
                $variant,
            )+
        }

        impl DimensionKey {
            /// Every dimension key, in catalog evaluation order.
            pub const ALL: &'static [DimensionKey] = &[$(DimensionKey::$variant),+];

            /// Returns the kind of tiers this dimension holds.
            pub fn kind(&self) -> DimensionKind {
                match self {
                    $(DimensionKey::$variant => DimensionKind::$kind,)+
                }
            }

            /// Returns the key's snake_case wire name.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(DimensionKey::$variant => $name,)+
                }
            }
        }
    };
}

dimension_keys! {
    ProjectDuration => ("project_duration", Range),
    MaintenancePeriod => ("maintenance_period", Range),
    ContractorExperience => ("contractor_experience", Range),
    ClaimsFrequency => ("claims_frequency", Range),
    ClaimAmount => ("claim_amount", Range),
    ContractorCount => ("contractor_count", Range),
    SubcontractorCount => ("subcontractor_count", Range),
    SumInsured => ("sum_insured", Range),
    ProjectValue => ("project_value", Range),
    ContractWorks => ("contract_works", Range),
    Plant => ("plant", Range),
    TemporaryWorks => ("temporary_works", Range),
    OtherMaterials => ("other_materials", Range),
    PrincipalProperty => ("principal_property", Range),
    PolicyLimit => ("policy_limit", Range),
    Deductible => ("deductible", Range),
    SoilType => ("soil_type", Categorical),
    SecurityArrangement => ("security_arrangement", Categorical),
    LocationHazard => ("location_hazard", Categorical),
    CrossLiability => ("cross_liability", Binary),
    ClausePricing => ("clause_pricing", Categorical),
}

impl DimensionKey {
    /// Returns true if the dimension's values are months or years.
    ///
    /// The legacy configuration screens used a literal `999` to mean
    /// "and above" on these dimensions; the catalog loader normalizes that
    /// sentinel to [`UpperBound::OpenEnded`].
    pub fn uses_month_or_year_units(&self) -> bool {
        matches!(
            self,
            DimensionKey::ProjectDuration
                | DimensionKey::MaintenancePeriod
                | DimensionKey::ContractorExperience
        )
    }
}

impl fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes a categorical label for comparison and lookup.
///
/// Labels are matched ignoring case and surrounding whitespace, both when
/// checking uniqueness at validation time and when resolving a quote's
/// label at evaluation time.
pub(crate) fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// One immutable, versioned snapshot of all rating rules for an
/// (insurer, product) pair.
///
/// A catalog is never mutated after publish: every edit builds a new draft
/// that must pass validation before it becomes the next version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCatalog {
    /// The insurer the catalog belongs to.
    pub insurer_id: String,
    /// The product the catalog belongs to.
    pub product_id: String,
    /// The catalog version, assigned at publish.
    pub version: u32,
    /// The rating dimensions, keyed for deterministic iteration order.
    pub dimensions: BTreeMap<DimensionKey, Dimension>,
}

impl RuleCatalog {
    /// Returns the dimension for `key`, if configured.
    pub fn dimension(&self, key: DimensionKey) -> Option<&Dimension> {
        self.dimensions.get(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tier(from: &str, to: Option<&str>) -> RangeTier {
        RangeTier {
            from: dec(from),
            to: to.map_or(UpperBound::OpenEnded, |t| UpperBound::Finite(dec(t))),
            pricing_type: PricingType::Percentage,
            value: dec("0.05"),
            quote_option: QuoteOption::AutoQuote,
            display_order: 1,
        }
    }

    #[test]
    fn test_range_tier_matches_half_open_interval() {
        let t = tier("12", Some("24"));
        assert!(t.matches(dec("12")));
        assert!(t.matches(dec("23.9")));
        assert!(!t.matches(dec("24")));
        assert!(!t.matches(dec("11.9")));
    }

    #[test]
    fn test_open_ended_tier_matches_everything_above_from() {
        let t = tier("60", None);
        assert!(t.matches(dec("60")));
        assert!(t.matches(dec("999999")));
        assert!(!t.matches(dec("59.99")));
    }

    #[test]
    fn test_span_rendering() {
        assert_eq!(tier("12", Some("24")).span(), "12..24");
        assert_eq!(tier("60", None).span(), "60..");
    }

    #[test]
    fn test_upper_bound_serializes_as_number_or_null() {
        let finite = serde_json::to_string(&UpperBound::Finite(dec("24"))).unwrap();
        assert_eq!(finite, "\"24\"");
        let open = serde_json::to_string(&UpperBound::OpenEnded).unwrap();
        assert_eq!(open, "null");
    }

    #[test]
    fn test_upper_bound_deserializes_null_as_open_ended() {
        let open: UpperBound = serde_json::from_str("null").unwrap();
        assert_eq!(open, UpperBound::OpenEnded);
        let finite: UpperBound = serde_json::from_str("\"24\"").unwrap();
        assert_eq!(finite, UpperBound::Finite(dec("24")));
    }

    #[test]
    fn test_quote_option_strictness_order() {
        let decisions = [
            QuoteOption::AutoQuote,
            QuoteOption::NoQuote,
            QuoteOption::QuoteAndRefer,
        ];
        assert_eq!(decisions.iter().max(), Some(&QuoteOption::NoQuote));
    }

    #[test]
    fn test_quote_option_wire_names() {
        assert_eq!(
            serde_json::to_string(&QuoteOption::QuoteAndRefer).unwrap(),
            "\"QUOTE_AND_REFER\""
        );
        let parsed: QuoteOption = serde_json::from_str("\"NO_QUOTE\"").unwrap();
        assert_eq!(parsed, QuoteOption::NoQuote);
    }

    #[test]
    fn test_pricing_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&PricingType::FixedAmount).unwrap(),
            "\"FIXED_AMOUNT\""
        );
        let parsed: PricingType = serde_json::from_str("\"PERCENTAGE\"").unwrap();
        assert_eq!(parsed, PricingType::Percentage);
    }

    #[test]
    fn test_risk_bucket_standard_and_custom() {
        let high: RiskBucket = serde_json::from_str("\"very_high\"").unwrap();
        assert_eq!(high, RiskBucket::VeryHigh);

        let custom: RiskBucket = serde_json::from_str("\"coastal\"").unwrap();
        assert_eq!(custom, RiskBucket::Custom("coastal".to_string()));
        assert_eq!(serde_json::to_string(&custom).unwrap(), "\"coastal\"");
    }

    #[test]
    fn test_binary_choice_accepts_title_case() {
        let yes: BinaryChoice = serde_json::from_str("\"Yes\"").unwrap();
        assert_eq!(yes, BinaryChoice::Yes);
        assert_eq!(serde_json::to_string(&yes).unwrap(), "\"yes\"");
    }

    #[test]
    fn test_dimension_key_kinds() {
        assert_eq!(DimensionKey::ProjectDuration.kind(), DimensionKind::Range);
        assert_eq!(DimensionKey::SoilType.kind(), DimensionKind::Categorical);
        assert_eq!(DimensionKey::CrossLiability.kind(), DimensionKind::Binary);
        assert_eq!(DimensionKey::ClausePricing.kind(), DimensionKind::Categorical);
    }

    #[test]
    fn test_dimension_key_wire_name_round_trip() {
        for key in DimensionKey::ALL {
            let json = serde_json::to_string(key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
            let parsed: DimensionKey = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, *key);
        }
    }

    #[test]
    fn test_month_unit_dimensions() {
        assert!(DimensionKey::ProjectDuration.uses_month_or_year_units());
        assert!(DimensionKey::ContractorExperience.uses_month_or_year_units());
        assert!(!DimensionKey::SumInsured.uses_month_or_year_units());
    }

    #[test]
    fn test_tier_set_kind_and_len() {
        let set = TierSet::Range(vec![tier("0", Some("12")), tier("12", None)]);
        assert_eq!(set.kind(), DimensionKind::Range);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());

        let empty = TierSet::Categorical(vec![]);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_rule_catalog_serde_round_trip() {
        let mut dimensions = BTreeMap::new();
        dimensions.insert(
            DimensionKey::ProjectDuration,
            Dimension {
                active: true,
                tiers: TierSet::Range(vec![tier("0", Some("12")), tier("12", None)]),
            },
        );
        dimensions.insert(
            DimensionKey::SoilType,
            Dimension {
                active: false,
                tiers: TierSet::Categorical(vec![CategoricalTier {
                    label: "Clay".to_string(),
                    risk_bucket: RiskBucket::High,
                    pricing_type: PricingType::Percentage,
                    value: dec("0.1"),
                    quote_option: QuoteOption::QuoteAndRefer,
                }]),
            },
        );

        let catalog = RuleCatalog {
            insurer_id: "ins_001".to_string(),
            product_id: "car".to_string(),
            version: 3,
            dimensions,
        };

        let json = serde_json::to_string(&catalog).unwrap();
        let parsed: RuleCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }
}
