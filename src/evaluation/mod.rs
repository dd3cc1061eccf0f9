//! Quote evaluation logic for the rating engine.
//!
//! This module contains the per-quote evaluation pipeline: range and
//! categorical/binary tier resolution, additive adjustment composition,
//! strictest-wins decision resolution, and the facade that runs them as a
//! single pass over a published catalog.

mod categorical;
mod composer;
mod decision;
mod facade;
mod range;

pub use categorical::{resolve_binary_tier, resolve_categorical_tier};
pub use composer::{compose, ComposedTotals};
pub use decision::resolve_decision;
pub use facade::evaluate_quote;
pub use range::resolve_range_tier;
