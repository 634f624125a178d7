//! Display rules exported for the browser.
//!
//! The checkout script re-evaluates visibility on every input change, so the
//! server ships the rules it was able to build as plain JSON.
//!
//! ## Format
//!
//! ```text
//! {
//!   "fieldSkipMap": { "<integration>": ["<wrapper id>", ...] },
//!   "displayRules": {
//!     "<field name>": [ {"field": "<target>", "condition": "<token>", "value": ["..."]}, ... ]
//!   }
//! }
//! ```
//!
//! - `displayRules` lists only active fields with at least one rule that
//!   built. Rules that failed to build are left out; a field whose rules all
//!   failed is left out entirely, so the browser keeps it visible.
//! - Conditions use canonical tokens and values are always arrays, so each
//!   descriptor is itself a valid raw rule record.
//! - Field names are sorted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::evaluate::{client_rules, last_rule_decides};
use crate::{BuildRule, Field, FieldValues, Rule, SkipMap};

/// The data handed to the checkout script.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    field_skip_map: SkipMap,
    display_rules: BTreeMap<String, Vec<Rule>>,
}

impl ClientPayload {
    /// Build the payload for `fields`, skipping rules that fail to build.
    pub fn from_fields<'a, I, B>(fields: I, builder: &B, skip_map: SkipMap) -> Self
    where
        I: IntoIterator<Item = &'a Field>,
        B: BuildRule + ?Sized,
    {
        let display_rules = fields
            .into_iter()
            .filter_map(|field| client_rules(field, builder).map(|rules| (field.name.clone(), rules)))
            .collect();

        Self {
            field_skip_map: skip_map,
            display_rules,
        }
    }

    #[must_use]
    pub fn display_rules(&self) -> &BTreeMap<String, Vec<Rule>> {
        &self.display_rules
    }

    #[must_use]
    pub fn rules_for(&self, field: &str) -> Option<&[Rule]> {
        self.display_rules.get(field).map(Vec::as_slice)
    }

    #[must_use]
    pub fn skip_map(&self) -> &SkipMap {
        &self.field_skip_map
    }

    /// Evaluate `field` the way the checkout script does.
    ///
    /// Skipped fields and fields absent from `displayRules` are shown; the
    /// rest follow last-write-wins over their listed rules.
    #[must_use]
    pub fn show_field<V>(&self, field: &str, values: &V) -> bool
    where
        V: FieldValues + ?Sized,
    {
        if self.field_skip_map.skips_name(field) {
            return true;
        }
        match self.display_rules.get(field) {
            Some(rules) => last_rule_decides(rules, values),
            None => true,
        }
    }

    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
