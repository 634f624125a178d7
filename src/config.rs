use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::{DisplayRuleError, Field, Operator, OperatorTable, SkipMap};

/// Checkout field configuration.
///
/// Accepts either a bare array of field rows, as dumped from the field
/// repository, or an object:
///
/// ```json
/// {
///   "fields": [ { "field_name": "billing_vat", "section": "billing", "display_rules": [] } ],
///   "skip_map": { "my_shipping_plugin": ["billing_city_field"] },
///   "operators": { "is": "equals", "one_of": "in" }
/// }
/// ```
///
/// `skip_map` entries are merged into [`SkipMap::with_defaults()`];
/// `operators` aliases extend the default [`OperatorTable`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutConfig {
    pub fields: Vec<Field>,
    #[serde(default)]
    pub skip_map: SkipMap,
    #[serde(default)]
    pub operators: BTreeMap<String, Operator>,
}

impl CheckoutConfig {
    /// Parse configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayRuleError::Config`] if the JSON is malformed or does
    /// not describe fields.
    pub fn from_json(input: &str) -> Result<Self, DisplayRuleError> {
        let document: Value = serde_json::from_str(input)?;
        let config = if document.is_array() {
            Self {
                fields: serde_json::from_value(document)?,
                ..Self::default()
            }
        } else {
            serde_json::from_value(document)?
        };
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayRuleError`] on I/O or parse failure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DisplayRuleError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }

    /// The default operator table extended with the configured aliases.
    #[must_use]
    pub fn operator_table(&self) -> OperatorTable {
        self.operators
            .iter()
            .fold(OperatorTable::new(), |table, (token, op)| {
                table.with_token(token, *op)
            })
    }

    /// The default skip map merged with the configured entries.
    #[must_use]
    pub fn effective_skip_map(&self) -> SkipMap {
        let mut skip_map = SkipMap::with_defaults();
        skip_map.extend(self.skip_map.clone());
        skip_map
    }
}
