use std::fmt;

use serde::Serialize;

use super::context::FieldValues;
use super::operator::Operator;

/// A validated display rule: compare the current value of `target` against
/// `expected` using `operator`.
///
/// Rules are immutable and can only be produced by a
/// [`RuleBuilder`](crate::RuleBuilder). Serializing a rule yields the
/// descriptor shipped in the client payload, which is itself a valid raw rule
/// record: `{"field": .., "condition": .., "value": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Rule {
    #[serde(rename = "field")]
    target: String,
    #[serde(rename = "condition")]
    operator: Operator,
    #[serde(rename = "value")]
    expected: Vec<String>,
}

impl Rule {
    /// Callers guarantee a non-empty target and value set that fits the
    /// operator's arity.
    pub(crate) fn new(target: String, operator: Operator, expected: Vec<String>) -> Self {
        debug_assert!(!target.is_empty());
        debug_assert!(!expected.is_empty());
        Self {
            target,
            operator,
            expected,
        }
    }

    /// Name of the field whose value this rule inspects.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub fn expected(&self) -> &[String] {
        &self.expected
    }

    /// Evaluate the rule against the current field values.
    ///
    /// An unset target compares as the empty string.
    #[must_use]
    pub fn matches<V: FieldValues + ?Sized>(&self, values: &V) -> bool {
        let current = values.current_value(&self.target).unwrap_or("");
        self.operator.apply(current, &self.expected)
    }
}

/// Renders the text form accepted by [`RuleBuilder::build_from_text`](crate::RuleBuilder::build_from_text),
/// e.g. `payment_method == "cod"` or `billing_country in ["US", "CA"]`.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.operator {
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
            Operator::In => "in",
            Operator::NotIn => "not in",
        };
        if is_bare_name(&self.target) {
            f.write_str(&self.target)?;
        } else {
            write_literal(f, &self.target)?;
        }
        write!(f, " {symbol} ")?;
        if self.operator.is_single_valued() {
            return write_literal(f, &self.expected[0]);
        }
        f.write_str("[")?;
        for (i, value) in self.expected.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_literal(f, value)?;
        }
        f.write_str("]")
    }
}

/// Targets the text grammar reads unquoted: `[A-Za-z_][A-Za-z0-9_.-]*`.
fn is_bare_name(target: &str) -> bool {
    let mut chars = target.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}
