use std::str::FromStr;

use serde_json::{Map, Value};

use crate::parse::ParsedRule;
use crate::{DisplayRuleError, InvalidRuleSpec, OperatorTable, Rule};

/// Turns one raw rule record into a validated [`Rule`].
///
/// Visibility resolution is generic over this trait so callers can supply
/// their own builder.
pub trait BuildRule {
    /// Build a rule from a raw `{"field", "condition", "value"}` record.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRuleSpec`] when the record is malformed or names an
    /// unknown operator.
    fn build_from_record(&self, raw: &Value) -> Result<Rule, InvalidRuleSpec>;
}

impl<B: BuildRule + ?Sized> BuildRule for &B {
    fn build_from_record(&self, raw: &Value) -> Result<Rule, InvalidRuleSpec> {
        (**self).build_from_record(raw)
    }
}

/// The standard rule builder.
///
/// Holds nothing but an immutable operator table, so one builder can be
/// shared across threads and reused for any number of records.
///
/// # Example
///
/// ```
/// use display_rules::{BuildRule, FormValues, RuleBuilder};
/// use serde_json::json;
///
/// let rule = RuleBuilder::new()
///     .build_from_record(&json!({"field": "payment_method", "condition": "equals", "value": "cod"}))
///     .unwrap();
///
/// assert!(rule.matches(&FormValues::new().set("payment_method", "cod")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleBuilder {
    operators: OperatorTable,
}

impl RuleBuilder {
    /// A builder using the default operator table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_operators(operators: OperatorTable) -> Self {
        Self { operators }
    }

    #[must_use]
    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    /// Parse the text form of a rule (`country in ["US", "CA"]`) and validate
    /// it like a raw record.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayRuleError`] on a syntax error or an invalid rule.
    pub fn build_from_text(&self, text: &str) -> Result<Rule, DisplayRuleError> {
        let parsed = crate::parse::parse_rule(text)?;
        Ok(self.build_from_record(&parsed.into_record())?)
    }
}

impl BuildRule for RuleBuilder {
    fn build_from_record(&self, raw: &Value) -> Result<Rule, InvalidRuleSpec> {
        let record = raw.as_object().ok_or(InvalidRuleSpec::NotARecord {
            found: kind_of(raw),
        })?;

        let target = required_str(record, "field")?;
        if target.is_empty() {
            return Err(InvalidRuleSpec::EmptyTarget);
        }

        let token = required_str(record, "condition")?;
        let operator =
            self.operators
                .resolve(token)
                .ok_or_else(|| InvalidRuleSpec::UnknownOperator {
                    token: token.to_owned(),
                })?;

        let expected = match record.get("value") {
            None | Some(Value::Null) => return Err(InvalidRuleSpec::MissingKey { key: "value" }),
            Some(value) => expected_values(value)?,
        };
        if expected.is_empty() {
            return Err(InvalidRuleSpec::EmptyValues {
                field: target.to_owned(),
            });
        }
        if operator.is_single_valued() && expected.len() > 1 {
            return Err(InvalidRuleSpec::TooManyValues {
                operator,
                count: expected.len(),
            });
        }

        Ok(Rule::new(target.to_owned(), operator, expected))
    }
}

impl FromStr for Rule {
    type Err = DisplayRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleBuilder::new().build_from_text(s)
    }
}

impl ParsedRule {
    fn into_record(self) -> Value {
        let mut record = Map::new();
        record.insert("field".to_owned(), Value::String(self.target));
        record.insert("condition".to_owned(), Value::String(self.token));
        record.insert(
            "value".to_owned(),
            Value::Array(self.values.into_iter().map(Value::String).collect()),
        );
        Value::Object(record)
    }
}

fn required_str<'a>(
    record: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, InvalidRuleSpec> {
    match record.get(key) {
        None | Some(Value::Null) => Err(InvalidRuleSpec::MissingKey { key }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(InvalidRuleSpec::NotAString { key }),
    }
}

fn expected_values(value: &Value) -> Result<Vec<String>, InvalidRuleSpec> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| scalar(item).ok_or(InvalidRuleSpec::MalformedValue { index }))
            .collect(),
        other => scalar(other)
            .map(|v| vec![v])
            .ok_or(InvalidRuleSpec::MalformedValue { index: 0 }),
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
