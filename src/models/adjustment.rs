//! Adjustment result models.
//!
//! This module contains the [`AdjustmentResult`] type and its associated
//! structures that capture all outputs from one quote evaluation: the
//! per-tier contributions, aggregate totals, final premium, and quoting
//! decision.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{DimensionKey, PricingType, QuoteOption};

/// The pricing effect one resolved tier contributed to a quote.
///
/// Contributions are the audit trail of an evaluation: each records which
/// dimension and tier matched, the input that matched it, and the signed
/// premium delta it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierContribution {
    /// The dimension the tier belongs to.
    pub dimension: DimensionKey,
    /// The matched tier, as its `from..to` span, label, or choice.
    pub tier: String,
    /// The context input that resolved to this tier.
    pub input: serde_json::Value,
    /// How `value` was applied.
    pub pricing_type: PricingType,
    /// The tier's configured signed loading or discount.
    pub value: Decimal,
    /// The signed premium delta this tier produced: `base_premium * value`
    /// for percentage tiers, `value` itself for fixed tiers.
    pub amount: Decimal,
    /// The quoting outcome this tier voted for.
    pub quote_option: QuoteOption,
}

/// The composed outcome of one quote evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentResult {
    /// Sum of all percentage contributions, as a signed fraction.
    pub total_percentage: Decimal,
    /// Sum of all fixed contributions, as a signed currency amount.
    pub total_fixed: Decimal,
    /// `base_premium * (1 + total_percentage) + total_fixed`.
    pub final_premium: Decimal,
    /// Every resolved tier's contribution, for audit.
    pub contributions: Vec<TierContribution>,
    /// The strictest quoting outcome across all resolved tiers.
    pub decision: QuoteOption,
}

/// The complete, caller-facing record of one quote evaluation.
///
/// Wraps the [`AdjustmentResult`] with identifying metadata so an
/// evaluation can be traced back to the engine build and catalog version
/// that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteEvaluation {
    /// Unique identifier for this evaluation.
    pub evaluation_id: Uuid,
    /// When the evaluation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the evaluation.
    pub engine_version: String,
    /// The insurer whose catalog was evaluated.
    pub insurer_id: String,
    /// The product whose catalog was evaluated.
    pub product_id: String,
    /// The catalog version the evaluation ran against.
    pub catalog_version: u32,
    /// The base premium supplied by the quoting workflow.
    pub base_premium: Decimal,
    /// The composed adjustment.
    pub adjustment: AdjustmentResult,
    /// The evaluation duration in microseconds.
    pub duration_us: u64,
}
