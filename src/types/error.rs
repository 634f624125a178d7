use thiserror::Error;

use super::operator::Operator;

/// Reasons a raw rule record cannot be turned into a [`Rule`](super::Rule).
///
/// This is the only error the rule builder produces. Visibility resolution
/// never lets it escape: the server-side path folds it into "hidden", the
/// client payload path drops the offending rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRuleSpec {
    #[error("rule specification must be a record, got {found}")]
    NotARecord { found: &'static str },

    #[error("rule specification is missing required key '{key}'")]
    MissingKey { key: &'static str },

    #[error("rule key '{key}' must be a string")]
    NotAString { key: &'static str },

    #[error("rule target field name is empty")]
    EmptyTarget,

    #[error("unrecognized operator token '{token}'")]
    UnknownOperator { token: String },

    #[error("rule on field '{field}' has no comparison values")]
    EmptyValues { field: String },

    #[error("comparison value at position {index} must be a string or number")]
    MalformedValue { index: usize },

    #[error("operator '{operator}' takes exactly one value, got {count}")]
    TooManyValues { operator: Operator, count: usize },
}
