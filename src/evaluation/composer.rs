//! Adjustment composition.
//!
//! Combines every resolved tier's pricing effect into one premium delta.
//! Percentage contributions are summed (not compounded) into a single
//! aggregate fraction applied once to the base premium; fixed contributions
//! are summed and added afterwards. The result is independent of the order
//! tiers were resolved in.

use rust_decimal::Decimal;

use crate::catalog::PricingType;
use crate::models::TierContribution;

/// The aggregate pricing effect of a set of tier contributions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedTotals {
    /// Sum of all percentage contributions, as a signed fraction.
    pub total_percentage: Decimal,
    /// Sum of all fixed contributions, as a signed currency amount.
    pub total_fixed: Decimal,
    /// `base_premium * (1 + total_percentage) + total_fixed`.
    pub final_premium: Decimal,
}

/// Composes tier contributions into the final premium.
///
/// # Example
///
/// The rating scenario from the product documentation: a 10,000 base
/// premium, a +10% duration loading, and a +500 experience charge compose
/// to 11,500.
pub fn compose(base_premium: Decimal, contributions: &[TierContribution]) -> ComposedTotals {
    let mut total_percentage = Decimal::ZERO;
    let mut total_fixed = Decimal::ZERO;

    for contribution in contributions {
        match contribution.pricing_type {
            PricingType::Percentage => total_percentage += contribution.value,
            PricingType::FixedAmount => total_fixed += contribution.value,
        }
    }

    let final_premium = base_premium * (Decimal::ONE + total_percentage) + total_fixed;

    ComposedTotals {
        total_percentage,
        total_fixed,
        final_premium,
    }
}
