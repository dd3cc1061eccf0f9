//! Range tier resolution.
//!
//! This module resolves a quote's numeric attribute to the single matching
//! tier of one dimension. Tiers are pre-sorted by their lower bound at
//! publish time, so resolution is a binary search.

use rust_decimal::Decimal;

use crate::catalog::{DimensionKey, RangeTier};
use crate::error::EvaluationError;

/// Resolves `x` to the matching tier of one numeric dimension.
///
/// `tiers` must be sorted ascending by `from` (guaranteed for published
/// catalogs). The matching tier is the one with the greatest `from <= x`
/// whose interval still contains `x`.
///
/// # Errors
///
/// Returns [`EvaluationError::NoMatchingTier`] when `x` is below the lowest
/// configured `from` (a legal lower gap) or falls into a finite hole the
/// validator let through as a warning. The open-ended last tier guarantees
/// there is never an upper gap.
pub fn resolve_range_tier<'a>(
    key: DimensionKey,
    tiers: &'a [RangeTier],
    x: Decimal,
) -> Result<&'a RangeTier, EvaluationError> {
    let candidate_index = tiers.partition_point(|tier| tier.from <= x);
    let candidate = candidate_index
        .checked_sub(1)
        .and_then(|index| tiers.get(index));

    match candidate {
        Some(tier) if tier.matches(x) => Ok(tier),
        _ => Err(EvaluationError::NoMatchingTier {
            dimension: key,
            value: x,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PricingType, QuoteOption, UpperBound};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tier(from: &str, to: Option<&str>, order: u32) -> RangeTier {
        RangeTier {
            from: dec(from),
            to: to.map_or(UpperBound::OpenEnded, |t| UpperBound::Finite(dec(t))),
            pricing_type: PricingType::Percentage,
            value: dec("0.05"),
            quote_option: QuoteOption::AutoQuote,
            display_order: order,
        }
    }

    fn duration_tiers() -> Vec<RangeTier> {
        vec![
            tier("0", Some("12"), 1),
            tier("12", Some("24"), 2),
            tier("24", Some("60"), 3),
            tier("60", None, 4),
        ]
    }

    /// RR-001: a value inside an interior tier resolves to it
    #[test]
    fn test_value_resolves_to_containing_tier() {
        let tiers = duration_tiers();
        let tier = resolve_range_tier(DimensionKey::ProjectDuration, &tiers, dec("18")).unwrap();
        assert_eq!(tier.span(), "12..24");
    }

    /// RR-002: the lower bound is inclusive, the upper exclusive
    #[test]
    fn test_boundaries_are_half_open() {
        let tiers = duration_tiers();
        let at_from = resolve_range_tier(DimensionKey::ProjectDuration, &tiers, dec("12")).unwrap();
        assert_eq!(at_from.span(), "12..24");

        let at_to = resolve_range_tier(DimensionKey::ProjectDuration, &tiers, dec("24")).unwrap();
        assert_eq!(at_to.span(), "24..60");
    }

    /// RR-003: the open-ended tier catches every large value
    #[test]
    fn test_open_ended_tier_catches_large_values() {
        let tiers = duration_tiers();
        let tier =
            resolve_range_tier(DimensionKey::ProjectDuration, &tiers, dec("480")).unwrap();
        assert_eq!(tier.span(), "60..");
    }

    /// RR-004: a value below the lowest `from` is a NoMatchingTier error
    #[test]
    fn test_value_below_lowest_from_fails() {
        let tiers = vec![tier("6", Some("24"), 1), tier("24", None, 2)];
        let result = resolve_range_tier(DimensionKey::ProjectDuration, &tiers, dec("3"));
        match result {
            Err(EvaluationError::NoMatchingTier { dimension, value }) => {
                assert_eq!(dimension, DimensionKey::ProjectDuration);
                assert_eq!(value, dec("3"));
            }
            other => panic!("expected NoMatchingTier, got {:?}", other),
        }
    }

    /// RR-005: a value inside a finite hole is a NoMatchingTier error
    #[test]
    fn test_value_in_gap_fails() {
        let tiers = vec![tier("0", Some("12"), 1), tier("18", None, 2)];
        let result = resolve_range_tier(DimensionKey::ProjectDuration, &tiers, dec("15"));
        assert!(matches!(
            result,
            Err(EvaluationError::NoMatchingTier { .. })
        ));
    }

    /// RR-006: resolution over an empty dimension fails
    #[test]
    fn test_empty_dimension_fails() {
        let result = resolve_range_tier(DimensionKey::ProjectDuration, &[], dec("10"));
        assert!(matches!(
            result,
            Err(EvaluationError::NoMatchingTier { .. })
        ));
    }

    /// RR-007: every value at or above the lowest `from` of a gapless
    /// dimension matches exactly one tier
    #[test]
    fn test_total_coverage_above_lowest_from() {
        let tiers = duration_tiers();
        for raw in ["0", "11.99", "12", "23", "24", "59.5", "60", "10000"] {
            let x = dec(raw);
            let matched: Vec<&RangeTier> = tiers.iter().filter(|t| t.matches(x)).collect();
            assert_eq!(matched.len(), 1, "value {} matched {} tiers", x, matched.len());
            let resolved =
                resolve_range_tier(DimensionKey::ProjectDuration, &tiers, x).unwrap();
            assert_eq!(resolved.span(), matched[0].span());
        }
    }
}
