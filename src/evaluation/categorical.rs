//! Categorical and binary tier resolution.
//!
//! Labels resolve through the per-catalog-version index built at publish,
//! so the per-quote path is a single hash lookup. A label outside the
//! configured domain is a caller input error and is reported, never
//! silently defaulted.

use std::collections::HashMap;

use crate::catalog::{BinaryChoice, BinaryChoiceTier, CategoricalTier, DimensionKey};
use crate::error::EvaluationError;

/// Resolves a label to its tier in one categorical dimension.
///
/// Matching ignores case and surrounding whitespace, mirroring how labels
/// are indexed at publish.
///
/// # Errors
///
/// Returns [`EvaluationError::UnknownLabel`] when the label is not present
/// in any configured bucket.
pub fn resolve_categorical_tier<'a>(
    key: DimensionKey,
    index: &HashMap<String, usize>,
    tiers: &'a [CategoricalTier],
    label: &str,
) -> Result<&'a CategoricalTier, EvaluationError> {
    index
        .get(&label.trim().to_lowercase())
        .and_then(|&tier_index| tiers.get(tier_index))
        .ok_or_else(|| EvaluationError::UnknownLabel {
            dimension: key,
            label: label.to_string(),
        })
}

/// Resolves a yes/no election to its tier in one binary dimension.
///
/// # Errors
///
/// Returns [`EvaluationError::UnknownLabel`] when the catalog does not
/// price the supplied election (e.g., only a "yes" tier is configured and
/// the quote elected "no").
pub fn resolve_binary_tier<'a>(
    key: DimensionKey,
    index: &HashMap<String, usize>,
    tiers: &'a [BinaryChoiceTier],
    choice: BinaryChoice,
) -> Result<&'a BinaryChoiceTier, EvaluationError> {
    index
        .get(choice.as_str())
        .and_then(|&tier_index| tiers.get(tier_index))
        .ok_or_else(|| EvaluationError::UnknownLabel {
            dimension: key,
            label: choice.as_str().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PricingType, QuoteOption, RiskBucket};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn soil_tiers() -> Vec<CategoricalTier> {
        vec![
            CategoricalTier {
                label: "Rock".to_string(),
                risk_bucket: RiskBucket::Low,
                pricing_type: PricingType::Percentage,
                value: dec("-0.05"),
                quote_option: QuoteOption::AutoQuote,
            },
            CategoricalTier {
                label: "Clay".to_string(),
                risk_bucket: RiskBucket::High,
                pricing_type: PricingType::Percentage,
                value: dec("0.15"),
                quote_option: QuoteOption::QuoteAndRefer,
            },
        ]
    }

    fn soil_index() -> HashMap<String, usize> {
        HashMap::from([("rock".to_string(), 0), ("clay".to_string(), 1)])
    }

    /// CR-001: a configured label resolves to its tier
    #[test]
    fn test_known_label_resolves() {
        let tiers = soil_tiers();
        let tier =
            resolve_categorical_tier(DimensionKey::SoilType, &soil_index(), &tiers, "Clay")
                .unwrap();
        assert_eq!(tier.risk_bucket, RiskBucket::High);
        assert_eq!(tier.value, dec("0.15"));
    }

    /// CR-002: lookup ignores case and whitespace
    #[test]
    fn test_lookup_is_case_insensitive() {
        let tiers = soil_tiers();
        let tier =
            resolve_categorical_tier(DimensionKey::SoilType, &soil_index(), &tiers, "  CLAY ")
                .unwrap();
        assert_eq!(tier.label, "Clay");
    }

    /// CR-003: an unconfigured label is an UnknownLabel error
    #[test]
    fn test_unknown_label_fails() {
        let tiers = soil_tiers();
        let result =
            resolve_categorical_tier(DimensionKey::SoilType, &soil_index(), &tiers, "Basalt");
        match result {
            Err(EvaluationError::UnknownLabel { dimension, label }) => {
                assert_eq!(dimension, DimensionKey::SoilType);
                assert_eq!(label, "Basalt");
            }
            other => panic!("expected UnknownLabel, got {:?}", other),
        }
    }

    /// CR-004: a priced election resolves to its tier
    #[test]
    fn test_binary_choice_resolves() {
        let tiers = vec![
            BinaryChoiceTier {
                choice: BinaryChoice::Yes,
                pricing_type: PricingType::Percentage,
                value: dec("0.02"),
                quote_option: QuoteOption::AutoQuote,
            },
            BinaryChoiceTier {
                choice: BinaryChoice::No,
                pricing_type: PricingType::Percentage,
                value: dec("0"),
                quote_option: QuoteOption::AutoQuote,
            },
        ];
        let index = HashMap::from([("yes".to_string(), 0), ("no".to_string(), 1)]);

        let tier =
            resolve_binary_tier(DimensionKey::CrossLiability, &index, &tiers, BinaryChoice::Yes)
                .unwrap();
        assert_eq!(tier.value, dec("0.02"));
    }

    /// CR-005: an unpriced election is an UnknownLabel error
    #[test]
    fn test_unpriced_election_fails() {
        let tiers = vec![BinaryChoiceTier {
            choice: BinaryChoice::Yes,
            pricing_type: PricingType::Percentage,
            value: dec("0.02"),
            quote_option: QuoteOption::AutoQuote,
        }];
        let index = HashMap::from([("yes".to_string(), 0)]);

        let result =
            resolve_binary_tier(DimensionKey::CrossLiability, &index, &tiers, BinaryChoice::No);
        match result {
            Err(EvaluationError::UnknownLabel { label, .. }) => assert_eq!(label, "no"),
            other => panic!("expected UnknownLabel, got {:?}", other),
        }
    }
}
