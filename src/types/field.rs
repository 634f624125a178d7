use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Checkout region a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Billing,
    Shipping,
    Account,
    Order,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Billing => "billing",
            Section::Shipping => "shipping",
            Section::Account => "account",
            Section::Order => "order",
        };
        f.write_str(name)
    }
}

/// A checkout field definition as stored by the field repository.
///
/// Display rules are kept raw; they are built into [`Rule`](crate::Rule)s on
/// every evaluation pass. Deserialization accepts repository rows directly:
/// `field_name` for the name, `0`/`1` flags, `meta` either as an object or as
/// a JSON-encoded string, and `display_rules` either as an array or as a
/// JSON-encoded string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(alias = "field_name")]
    pub name: String,
    pub section: Section,
    #[serde(default = "default_active", deserialize_with = "flag")]
    pub active: bool,
    #[serde(default, deserialize_with = "flag")]
    pub native: bool,
    #[serde(default, deserialize_with = "meta_column")]
    pub meta: Map<String, Value>,
    #[serde(default, alias = "displayRules", deserialize_with = "rules_column")]
    pub display_rules: Vec<Value>,
}

fn default_active() -> bool {
    true
}

impl Field {
    /// An active, non-native field with no meta and no display rules.
    #[must_use]
    pub fn new(name: &str, section: Section) -> Self {
        Self {
            name: name.to_owned(),
            section,
            active: true,
            native: false,
            meta: Map::new(),
            display_rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    #[must_use]
    pub fn native(mut self) -> Self {
        self.native = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.meta.insert(key.to_owned(), value.into());
        self
    }

    /// Append a raw rule record.
    #[must_use]
    pub fn with_rule(mut self, raw: Value) -> Self {
        self.display_rules.push(raw);
        self
    }

    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    /// The `label` meta entry, falling back to the field name.
    #[must_use]
    pub fn label(&self) -> &str {
        match self.meta.get("label") {
            Some(Value::String(label)) if !label.is_empty() => label,
            _ => &self.name,
        }
    }

    /// DOM id of the field's row, as used by skip maps and the browser.
    #[must_use]
    pub fn wrapper_id(&self) -> String {
        format!("{}_field", self.name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredFlag {
    Bool(bool),
    Int(i64),
    Text(String),
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match StoredFlag::deserialize(deserializer)? {
        StoredFlag::Bool(b) => Ok(b),
        StoredFlag::Int(i) => Ok(i != 0),
        StoredFlag::Text(s) => match s.trim() {
            "" | "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(de::Error::custom(format!("invalid flag value '{other}'"))),
        },
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRules {
    List(Vec<Value>),
    Encoded(String),
    Null(()),
}

fn rules_column<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    match StoredRules::deserialize(deserializer)? {
        StoredRules::List(rules) => Ok(rules),
        StoredRules::Null(()) => Ok(Vec::new()),
        StoredRules::Encoded(text) if text.trim().is_empty() => Ok(Vec::new()),
        StoredRules::Encoded(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(rules)) => Ok(rules),
            Ok(Value::Null) => Ok(Vec::new()),
            Ok(_) => Err(de::Error::custom("display_rules must encode an array")),
            Err(err) => Err(de::Error::custom(format!("display_rules: {err}"))),
        },
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredMeta {
    Object(Map<String, Value>),
    Encoded(String),
    Null(()),
}

fn meta_column<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Map<String, Value>, D::Error> {
    match StoredMeta::deserialize(deserializer)? {
        StoredMeta::Object(meta) => Ok(meta),
        StoredMeta::Null(()) => Ok(Map::new()),
        StoredMeta::Encoded(text) if text.trim().is_empty() => Ok(Map::new()),
        StoredMeta::Encoded(text) => match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(meta)) => Ok(meta),
            Ok(Value::Null) => Ok(Map::new()),
            Ok(_) => Err(de::Error::custom("meta must encode an object")),
            Err(err) => Err(de::Error::custom(format!("meta: {err}"))),
        },
    }
}
