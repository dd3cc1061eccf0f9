//! Core data models for the rating engine.
//!
//! This module contains the per-quote domain models: the caller-supplied
//! [`QuoteContext`] and the evaluation outputs.

mod adjustment;
mod context;

pub use adjustment::{AdjustmentResult, QuoteEvaluation, TierContribution};
pub use context::QuoteContext;
