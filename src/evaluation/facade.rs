//! Quote evaluation facade.
//!
//! Orchestrates the resolvers, composer, and decision resolver for one
//! quote: a single synchronous pass over the catalog's dimensions that
//! resolves each relevant attribute, collects the tier contributions, and
//! returns the composed adjustment and final decision.

use rust_decimal::Decimal;

use crate::catalog::{
    BinaryChoiceTier, CategoricalTier, DimensionKey, PricingType, PublishedCatalog, RangeTier,
    TierSet,
};
use crate::error::EvaluationError;
use crate::models::{AdjustmentResult, QuoteContext, TierContribution};

use super::categorical::{resolve_binary_tier, resolve_categorical_tier};
use super::composer::compose;
use super::decision::resolve_decision;
use super::range::resolve_range_tier;

/// Evaluates one quote against a published catalog version.
///
/// For every active dimension whose attribute is present in the context,
/// the matching tier is resolved and its pricing effect and quoting vote
/// collected; dimensions that are inactive, empty, or not represented in
/// the context are skipped. The pass is pure and deterministic: the same
/// catalog version and context always produce the same result, and no
/// dimension is evaluated twice.
///
/// # Errors
///
/// Returns the first [`EvaluationError`] encountered: a numeric attribute
/// below the dimension's lowest bound ([`NoMatchingTier`]) or a label
/// outside the configured domain ([`UnknownLabel`]). Both mean the quote
/// cannot be priced against this configuration; callers surface them as a
/// `NO_QUOTE` outcome rather than assuming a neutral contribution.
///
/// [`NoMatchingTier`]: EvaluationError::NoMatchingTier
/// [`UnknownLabel`]: EvaluationError::UnknownLabel
pub fn evaluate_quote(
    published: &PublishedCatalog,
    context: &QuoteContext,
) -> Result<AdjustmentResult, EvaluationError> {
    let base_premium = context.base_premium;
    let mut contributions: Vec<TierContribution> = Vec::new();

    for (key, dimension) in &published.catalog().dimensions {
        if !dimension.active || dimension.tiers.is_empty() {
            continue;
        }

        match &dimension.tiers {
            TierSet::Range(tiers) => {
                let Some(x) = context.range_value(*key) else {
                    continue;
                };
                let tier = resolve_range_tier(*key, tiers, x)?;
                contributions.push(range_contribution(*key, tier, x, base_premium));
            }
            TierSet::Categorical(tiers) => {
                let Some(index) = published.label_index(*key) else {
                    continue;
                };
                if *key == DimensionKey::ClausePricing {
                    for clause in &context.selected_clauses {
                        let tier = resolve_categorical_tier(*key, index, tiers, clause)?;
                        contributions.push(categorical_contribution(
                            *key,
                            tier,
                            clause,
                            base_premium,
                        ));
                    }
                } else if let Some(label) = context.label(*key) {
                    let tier = resolve_categorical_tier(*key, index, tiers, label)?;
                    contributions.push(categorical_contribution(*key, tier, label, base_premium));
                }
            }
            TierSet::Binary(tiers) => {
                let Some(choice) = context.cross_liability else {
                    continue;
                };
                let Some(index) = published.label_index(*key) else {
                    continue;
                };
                let tier = resolve_binary_tier(*key, index, tiers, choice)?;
                contributions.push(binary_contribution(*key, tier, base_premium));
            }
        }
    }

    let totals = compose(base_premium, &contributions);
    let decision = resolve_decision(contributions.iter().map(|c| c.quote_option));

    Ok(AdjustmentResult {
        total_percentage: totals.total_percentage,
        total_fixed: totals.total_fixed,
        final_premium: totals.final_premium,
        contributions,
        decision,
    })
}

/// The signed premium delta a tier produces against a base premium.
fn contribution_amount(pricing_type: PricingType, value: Decimal, base_premium: Decimal) -> Decimal {
    match pricing_type {
        PricingType::Percentage => base_premium * value,
        PricingType::FixedAmount => value,
    }
}

fn range_contribution(
    key: DimensionKey,
    tier: &RangeTier,
    x: Decimal,
    base_premium: Decimal,
) -> TierContribution {
    TierContribution {
        dimension: key,
        tier: tier.span(),
        input: serde_json::json!(x),
        pricing_type: tier.pricing_type,
        value: tier.value,
        amount: contribution_amount(tier.pricing_type, tier.value, base_premium),
        quote_option: tier.quote_option,
    }
}

fn categorical_contribution(
    key: DimensionKey,
    tier: &CategoricalTier,
    label: &str,
    base_premium: Decimal,
) -> TierContribution {
    TierContribution {
        dimension: key,
        tier: tier.label.clone(),
        input: serde_json::json!(label),
        pricing_type: tier.pricing_type,
        value: tier.value,
        amount: contribution_amount(tier.pricing_type, tier.value, base_premium),
        quote_option: tier.quote_option,
    }
}

fn binary_contribution(
    key: DimensionKey,
    tier: &BinaryChoiceTier,
    base_premium: Decimal,
) -> TierContribution {
    TierContribution {
        dimension: key,
        tier: tier.choice.as_str().to_string(),
        input: serde_json::json!(tier.choice.as_str()),
        pricing_type: tier.pricing_type,
        value: tier.value,
        amount: contribution_amount(tier.pricing_type, tier.value, base_premium),
        quote_option: tier.quote_option,
    }
}
