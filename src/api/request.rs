//! Request types for the rating engine API.
//!
//! This module defines the JSON request structures for the `/evaluate`,
//! `/validate`, and `/publish` endpoints. Draft catalog bodies reuse the
//! Configuration Store wire types from [`crate::catalog`].

use serde::Deserialize;

use crate::models::QuoteContext;

/// Request body for the `/evaluate` endpoint.
///
/// Identifies which insurer/product catalog to evaluate against and carries
/// the quote's risk attributes and base premium.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    /// The insurer whose catalog to evaluate against.
    pub insurer_id: String,
    /// The product whose catalog to evaluate against.
    pub product_id: String,
    /// The quote's attributes and base premium.
    pub context: QuoteContext,
}
