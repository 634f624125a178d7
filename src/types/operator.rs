use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operators a display rule can apply to a field's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    In,
    NotIn,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::In,
        Operator::NotIn,
    ];

    /// The canonical token, as emitted in the client payload.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::In => "in",
            Operator::NotIn => "not_in",
        }
    }

    /// Whether the operator compares against exactly one expected value.
    #[must_use]
    pub fn is_single_valued(self) -> bool {
        matches!(self, Operator::Equals | Operator::NotEquals)
    }

    /// Apply the operator. Comparison is exact and case-sensitive.
    #[must_use]
    pub fn apply(self, current: &str, expected: &[String]) -> bool {
        match self {
            Operator::Equals => expected.first().is_some_and(|v| v == current),
            Operator::NotEquals => !Operator::Equals.apply(current, expected),
            Operator::In => expected.iter().any(|v| v == current),
            Operator::NotIn => !Operator::In.apply(current, expected),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Maps operator tokens found in raw rule records to [`Operator`]s.
///
/// The configuration layer owns the token vocabulary, so the table is open:
/// aliases can be added without touching evaluation. Tokens are matched
/// exactly; anything not in the table fails to build.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    tokens: HashMap<String, Operator>,
}

impl Default for OperatorTable {
    fn default() -> Self {
        let mut tokens: HashMap<String, Operator> = Operator::ALL
            .iter()
            .map(|op| (op.token().to_owned(), *op))
            .collect();
        tokens.insert("==".to_owned(), Operator::Equals);
        tokens.insert("!=".to_owned(), Operator::NotEquals);
        Self { tokens }
    }
}

impl OperatorTable {
    /// The default table: canonical tokens plus `==` and `!=`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with no tokens at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    /// Register `token` as an alias for `op`, replacing any previous mapping.
    #[must_use]
    pub fn with_token(mut self, token: &str, op: Operator) -> Self {
        self.insert(token, op);
        self
    }

    pub fn insert(&mut self, token: &str, op: Operator) {
        self.tokens.insert(token.to_owned(), op);
    }

    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<Operator> {
        self.tokens.get(token).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over all registered (token, operator) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Operator)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(vals: &[&str]) -> Vec<String> {
        vals.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn equals_is_exact_and_case_sensitive() {
        let expected = values(&["cod"]);
        assert!(Operator::Equals.apply("cod", &expected));
        assert!(!Operator::Equals.apply("COD", &expected));
        assert!(!Operator::Equals.apply("cod ", &expected));
        assert!(!Operator::Equals.apply("", &expected));
    }

    #[test]
    fn not_equals_negates_equals() {
        let expected = values(&["cod"]);
        assert!(!Operator::NotEquals.apply("cod", &expected));
        assert!(Operator::NotEquals.apply("card", &expected));
    }

    #[test]
    fn in_matches_any_element() {
        let expected = values(&["US", "CA"]);
        assert!(Operator::In.apply("CA", &expected));
        assert!(Operator::In.apply("US", &expected));
        assert!(!Operator::In.apply("FR", &expected));
        assert!(Operator::NotIn.apply("FR", &expected));
        assert!(!Operator::NotIn.apply("US", &expected));
    }

    #[test]
    fn empty_current_value_compares_as_empty_string() {
        assert!(Operator::Equals.apply("", &values(&[""])));
        assert!(Operator::NotEquals.apply("", &values(&["x"])));
        assert!(Operator::In.apply("", &values(&["a", ""])));
    }

    #[test]
    fn display_uses_canonical_token() {
        assert_eq!(Operator::Equals.to_string(), "equals");
        assert_eq!(Operator::NotEquals.to_string(), "not_equals");
        assert_eq!(Operator::In.to_string(), "in");
        assert_eq!(Operator::NotIn.to_string(), "not_in");
    }

    #[test]
    fn serde_uses_canonical_token() {
        for op in Operator::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.token()));
            let back: Operator = serde_json::from_str(&json).unwrap();
            assert_eq!(back, op);
        }
    }

    #[test]
    fn default_table_resolves_canonical_and_symbolic_tokens() {
        let table = OperatorTable::new();
        assert_eq!(table.len(), 6);
        assert_eq!(table.resolve("equals"), Some(Operator::Equals));
        assert_eq!(table.resolve("=="), Some(Operator::Equals));
        assert_eq!(table.resolve("!="), Some(Operator::NotEquals));
        assert_eq!(table.resolve("not_in"), Some(Operator::NotIn));
        assert_eq!(table.resolve("Equals"), None);
        assert_eq!(table.resolve("contains"), None);
    }

    #[test]
    fn aliases_extend_the_table() {
        let table = OperatorTable::empty().with_token("is", Operator::Equals);
        assert_eq!(table.resolve("is"), Some(Operator::Equals));
        assert_eq!(table.resolve("equals"), None);
        assert_eq!(table.iter().count(), 1);
    }
}
