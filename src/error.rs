use thiserror::Error;

use crate::parse::ParseError;
use crate::InvalidRuleSpec;

/// Unified error type covering rule text parsing, rule validation,
/// configuration decoding, and I/O.
///
/// Returned by convenience methods like
/// [`RuleBuilder::build_from_text()`](crate::RuleBuilder::build_from_text) and
/// [`Checkout::from_file()`](crate::Checkout::from_file). Visibility resolution
/// never returns it.
#[derive(Debug, Error)]
pub enum DisplayRuleError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    InvalidRule(#[from] InvalidRuleSpec),

    #[error("invalid checkout configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
