use std::sync::atomic::{AtomicUsize, Ordering};

use display_rules::{
    show_field, BuildRule, Checkout, ClientPayload, Field, FormValues, InvalidRuleSpec, Operator,
    Rule, RuleBuilder, Section, SkipMap,
};
use serde_json::{json, Value};

/// Delegates to [`RuleBuilder`] and counts how often it was asked to build.
#[derive(Default)]
struct CountingBuilder {
    inner: RuleBuilder,
    calls: AtomicUsize,
}

impl CountingBuilder {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl BuildRule for CountingBuilder {
    fn build_from_record(&self, raw: &Value) -> Result<Rule, InvalidRuleSpec> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.build_from_record(raw)
    }
}

fn build(raw: Value) -> Rule {
    RuleBuilder::new().build_from_record(&raw).unwrap()
}

#[test]
fn equals_matches_exact_value() {
    let rule = build(json!({"field": "payment_method", "condition": "equals", "value": ["cod"]}));
    assert_eq!(rule.operator(), Operator::Equals);

    assert!(rule.matches(&FormValues::new().set("payment_method", "cod")));
    assert!(!rule.matches(&FormValues::new().set("payment_method", "card")));
}

#[test]
fn in_matches_any_listed_value() {
    let rule = build(json!({"field": "country", "condition": "in", "value": ["US", "CA"]}));

    assert!(rule.matches(&FormValues::new().set("country", "CA")));
    assert!(!rule.matches(&FormValues::new().set("country", "FR")));
}

#[test]
fn last_rule_overrides_earlier_match() {
    let field = Field::new("billing_company", Section::Billing)
        .with_rule(json!({"field": "payment_method", "condition": "equals", "value": "cod"}))
        .with_rule(json!({"field": "country", "condition": "in", "value": ["US", "CA"]}));
    let values = FormValues::new()
        .set("payment_method", "cod")
        .set("country", "FR");

    let builder = RuleBuilder::new();
    let first = builder.build_from_record(&field.display_rules[0]).unwrap();
    assert!(first.matches(&values));

    assert!(!show_field(&field, &builder, &values));
}

#[test]
fn inactive_field_never_builds_rules() {
    let field = Field::new("billing_company", Section::Billing)
        .inactive()
        .with_rule(json!({"field": "payment_method", "condition": "equals", "value": "cod"}))
        .with_rule(json!({"field": "country", "condition": "bogus", "value": "US"}));
    let builder = CountingBuilder::default();

    assert!(!show_field(&field, &builder, &FormValues::new()));
    assert!(!show_field(
        &field,
        &builder,
        &FormValues::new().set("payment_method", "cod")
    ));
    assert_eq!(builder.calls(), 0);

    let payload = ClientPayload::from_fields([&field], &builder, SkipMap::new());
    assert!(payload.display_rules().is_empty());
    assert_eq!(builder.calls(), 0);
}

#[test]
fn active_field_builds_every_rule() {
    let field = Field::new("billing_company", Section::Billing)
        .with_rule(json!({"field": "a", "condition": "equals", "value": "1"}))
        .with_rule(json!({"field": "b", "condition": "equals", "value": "1"}));
    let builder = CountingBuilder::default();

    let _ = show_field(&field, &builder, &FormValues::new());
    assert_eq!(builder.calls(), 2);
}

#[test]
fn field_without_rules_is_shown() {
    let field = Field::new("billing_company", Section::Billing);
    assert!(field.display_rules.is_empty());
    assert!(show_field(&field, &RuleBuilder::new(), &FormValues::new()));
}

#[test]
fn broken_rule_hides_on_server_and_drops_from_payload() {
    let field = Field::new("billing_company", Section::Billing)
        .with_rule(json!({"field": "country", "condition": "contains", "value": "US"}));
    let values = FormValues::new().set("country", "US");

    let checkout = Checkout::new(vec![field]).with_skip_map(SkipMap::new());
    let field = checkout.field("billing_company").unwrap();

    assert!(!show_field(field, checkout.builder(), &values));
    assert!(checkout.is_field_hidden(field, &values));

    let payload = checkout.client_payload();
    assert!(payload.rules_for("billing_company").is_none());
    let json = serde_json::to_value(&payload).unwrap();
    assert!(json["displayRules"].get("billing_company").is_none());

    // The browser falls back to showing the field.
    assert!(payload.show_field("billing_company", &values));
}

#[test]
fn broken_rule_among_valid_ones_keeps_the_valid_ones_for_client() {
    let field = Field::new("billing_company", Section::Billing)
        .with_rule(json!({"field": "payment_method", "condition": "equals", "value": "cod"}))
        .with_rule(json!({"field": "country", "condition": "in", "value": []}));
    let values = FormValues::new().set("payment_method", "cod");

    assert!(!show_field(&field, &RuleBuilder::new(), &values));

    let payload = ClientPayload::from_fields([&field], &RuleBuilder::new(), SkipMap::new());
    let rules = payload.rules_for("billing_company").unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].target(), "payment_method");
    assert!(payload.show_field("billing_company", &values));
}
