use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use crate::{
    show_field, BuildRule, CheckoutConfig, ClientPayload, DisplayRuleError, Field, FieldValues,
    RuleBuilder, Section, SkipMap,
};

/// Checkout fields as the host form hands them over: section -> name -> field
/// properties.
pub type CheckoutForm<T> = HashMap<Section, HashMap<String, T>>;

/// The set of configured checkout fields together with the builder and skip
/// map used to resolve their visibility.
///
/// Nothing is cached: every call re-builds the rules it needs. A `Checkout`
/// is immutable once configured and can be shared behind `Arc`.
///
/// # Example
///
/// ```
/// use display_rules::{Checkout, Field, FormValues, Section};
/// use serde_json::json;
///
/// let checkout = Checkout::new(vec![
///     Field::new("billing_vat", Section::Billing)
///         .with_rule(json!({"field": "billing_country", "condition": "in", "value": ["DE", "FR"]})),
/// ]);
///
/// let values = FormValues::new().set("billing_country", "US");
/// let hidden: Vec<&str> = checkout.hidden_fields(&values).iter().map(|f| f.name.as_str()).collect();
/// assert_eq!(hidden, ["billing_vat"]);
/// ```
#[derive(Debug, Clone)]
pub struct Checkout<B = RuleBuilder> {
    fields: Vec<Field>,
    skip_map: SkipMap,
    builder: B,
}

impl Checkout<RuleBuilder> {
    /// A checkout with the default builder and default skip map.
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            skip_map: SkipMap::with_defaults(),
            builder: RuleBuilder::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: CheckoutConfig) -> Self {
        let builder = RuleBuilder::with_operators(config.operator_table());
        let skip_map = config.effective_skip_map();
        info!(
            fields = config.fields.len(),
            integrations = skip_map.integrations().count(),
            "loaded checkout configuration"
        );
        Self {
            fields: config.fields,
            skip_map,
            builder,
        }
    }

    /// Parse a JSON configuration. See [`CheckoutConfig`] for the format.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayRuleError`] if the configuration is malformed.
    pub fn from_json(input: &str) -> Result<Self, DisplayRuleError> {
        Ok(Self::from_config(CheckoutConfig::from_json(input)?))
    }

    /// Read a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayRuleError`] on I/O or configuration failure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DisplayRuleError> {
        Ok(Self::from_config(CheckoutConfig::from_file(path)?))
    }
}

impl<B: BuildRule> Checkout<B> {
    /// Swap the rule builder, keeping fields and skip map.
    #[must_use]
    pub fn with_builder<C: BuildRule>(self, builder: C) -> Checkout<C> {
        Checkout {
            fields: self.fields,
            skip_map: self.skip_map,
            builder,
        }
    }

    #[must_use]
    pub fn with_skip_map(mut self, skip_map: SkipMap) -> Self {
        self.skip_map = skip_map;
        self
    }

    /// Mutable access for integrations that register their own exemptions.
    pub fn skip_map_mut(&mut self) -> &mut SkipMap {
        &mut self.skip_map
    }

    #[must_use]
    pub fn skip_map(&self) -> &SkipMap {
        &self.skip_map
    }

    #[must_use]
    pub fn builder(&self) -> &B {
        &self.builder
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields of one section, in configuration order.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(move |f| f.section == section)
    }

    /// Whether `field` must be dropped from server-side validation.
    ///
    /// Fields in the skip map are never hidden and never reach the engine.
    #[must_use]
    pub fn is_field_hidden<V>(&self, field: &Field, values: &V) -> bool
    where
        V: FieldValues + ?Sized,
    {
        if self.skip_map.skips_field(field) {
            debug!(field = %field.name, "field exempt from display rules");
            return false;
        }
        !show_field(field, &self.builder, values)
    }

    /// Every configured field that is hidden for `values`.
    #[must_use]
    pub fn hidden_fields<V>(&self, values: &V) -> Vec<&Field>
    where
        V: FieldValues + ?Sized,
    {
        self.fields
            .iter()
            .filter(|f| self.is_field_hidden(f, values))
            .collect()
    }

    /// Remove hidden fields from `form` so they are not validated.
    ///
    /// Returns the names removed, in configuration order.
    pub fn strip_hidden<T, V>(&self, form: &mut CheckoutForm<T>, values: &V) -> Vec<String>
    where
        V: FieldValues + ?Sized,
    {
        let mut removed = Vec::new();
        for field in self.hidden_fields(values) {
            let Some(section) = form.get_mut(&field.section) else {
                continue;
            };
            if section.remove(&field.name).is_some() {
                debug!(field = %field.name, section = %field.section, "stripped hidden field");
                removed.push(field.name.clone());
            }
        }
        removed
    }

    /// The rules and skip map handed to the checkout script.
    pub fn client_payload(&self) -> ClientPayload {
        ClientPayload::from_fields(&self.fields, &self.builder, self.skip_map.clone())
    }
}

impl<B> fmt::Display for Checkout<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self.fields.iter().filter(|f| f.active).count();
        let with_rules = self
            .fields
            .iter()
            .filter(|f| !f.display_rules.is_empty())
            .count();
        write!(
            f,
            "Checkout({} fields, {active} active, {with_rules} with display rules)",
            self.fields.len(),
        )
    }
}
