use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::field::Field;

const NOVA_POSHTA_SHIPPING: &str = "nova_poshta_shipping";

const NOVA_POSHTA_FIELDS: &[&str] = &[
    "billing_address_1_field",
    "billing_address_2_field",
    "billing_city_field",
    "billing_state_field",
    "billing_postcode_field",
    "shipping_address_1_field",
    "shipping_address_2_field",
    "shipping_city_field",
    "shipping_state_field",
    "shipping_postcode_field",
];

/// Fields exempt from display-rule evaluation, grouped by the integration
/// that controls them.
///
/// Entries are field wrapper ids (`<name>_field`). A skipped field is always
/// treated as shown; the engine is never invoked for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkipMap {
    integrations: BTreeMap<String, BTreeSet<String>>,
}

impl SkipMap {
    /// An empty skip map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in map, covering shipping plugins that manage address
    /// fields themselves.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new().with_integration(NOVA_POSHTA_SHIPPING, NOVA_POSHTA_FIELDS.iter().copied())
    }

    /// Add field ids under `integration`, merging with any existing entry.
    #[must_use]
    pub fn with_integration<I, S>(mut self, integration: &str, field_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(integration, field_ids);
        self
    }

    pub fn insert<I, S>(&mut self, integration: &str, field_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.integrations
            .entry(integration.to_owned())
            .or_default()
            .extend(field_ids.into_iter().map(Into::into));
    }

    /// Merge every entry of `other` into this map.
    pub fn extend(&mut self, other: SkipMap) {
        for (integration, ids) in other.integrations {
            self.insert(&integration, ids);
        }
    }

    pub fn remove_integration(&mut self, integration: &str) -> Option<BTreeSet<String>> {
        self.integrations.remove(integration)
    }

    /// Whether any integration lists `field_id`.
    #[must_use]
    pub fn skips(&self, field_id: &str) -> bool {
        self.integrations.values().any(|ids| ids.contains(field_id))
    }

    /// Whether the field named `name` is exempt. Only its wrapper id is
    /// looked up; a bare name in the map exempts nothing.
    #[must_use]
    pub fn skips_name(&self, name: &str) -> bool {
        self.skips(&format!("{name}_field"))
    }

    #[must_use]
    pub fn skips_field(&self, field: &Field) -> bool {
        self.skips_name(&field.name)
    }

    #[must_use]
    pub fn fields_of(&self, integration: &str) -> Option<&BTreeSet<String>> {
        self.integrations.get(integration)
    }

    pub fn integrations(&self) -> impl Iterator<Item = &str> {
        self.integrations.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.integrations.is_empty()
    }
}
