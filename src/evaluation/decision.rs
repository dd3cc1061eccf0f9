//! Quoting decision resolution.
//!
//! Every resolved tier votes for an outcome; the strictest applicable vote
//! wins. Refusing or referring an acceptable risk is recoverable,
//! auto-issuing an unacceptable one is not.

use crate::catalog::QuoteOption;

/// Resolves the per-tier outcomes into one final quoting decision.
///
/// Precedence: `NO_QUOTE` over `QUOTE_AND_REFER` over `AUTO_QUOTE`. A quote
/// that matched no decision-carrying tier auto-quotes.
///
/// # Example
///
/// ```
/// use rating_engine::catalog::QuoteOption;
/// use rating_engine::evaluation::resolve_decision;
///
/// let decision = resolve_decision([
///     QuoteOption::AutoQuote,
///     QuoteOption::QuoteAndRefer,
/// ]);
/// assert_eq!(decision, QuoteOption::QuoteAndRefer);
/// ```
pub fn resolve_decision<I>(decisions: I) -> QuoteOption
where
    I: IntoIterator<Item = QuoteOption>,
{
    decisions
        .into_iter()
        .max()
        .unwrap_or(QuoteOption::AutoQuote)
}
