use std::collections::HashMap;
use std::io::Write;

use display_rules::{
    Checkout, CheckoutConfig, CheckoutForm, DisplayRuleError, FormValues, Operator, Section,
};

const CONFIG: &str = r#"{
    "fields": [
        {
            "field_name": "billing_vat",
            "section": "billing",
            "active": "1",
            "native": "0",
            "meta": {"label": "VAT number"},
            "display_rules": "[{\"field\":\"billing_country\",\"condition\":\"one_of\",\"value\":[\"DE\",\"FR\"]}]"
        },
        {
            "field_name": "billing_city",
            "section": "billing",
            "active": 1,
            "native": 1,
            "display_rules": [{"field": "ship_to", "condition": "equals", "value": "door"}]
        },
        {
            "field_name": "order_gift_note",
            "section": "order",
            "display_rules": [
                {"field": "gift", "condition": "equals", "value": "yes"},
                {"field": "gift", "condition": "broken"}
            ]
        },
        {
            "field_name": "order_fax",
            "section": "order",
            "active": "0"
        }
    ],
    "skip_map": {"gift_wrap_plugin": ["order_fax_field"]},
    "operators": {"one_of": "in"}
}"#;

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();

    let checkout = Checkout::from_file(file.path()).unwrap();
    assert_eq!(checkout.fields().len(), 4);
    assert_eq!(
        checkout.to_string(),
        "Checkout(4 fields, 3 active, 3 with display rules)"
    );
    assert_eq!(
        checkout.builder().operators().resolve("one_of"),
        Some(Operator::In)
    );

    let vat = checkout.field("billing_vat").unwrap();
    assert_eq!(vat.label(), "VAT number");
    assert!(!vat.native);
    assert!(checkout.field("billing_city").unwrap().native);
}

#[test]
fn loaded_checkout_resolves_visibility() {
    let checkout = Checkout::from_json(CONFIG).unwrap();
    let values = FormValues::new()
        .set("billing_country", "FR")
        .set("ship_to", "branch")
        .set("gift", "yes");

    let hidden: Vec<&str> = checkout
        .hidden_fields(&values)
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    // billing_city is exempt through the default skip map, order_fax through
    // the configured one; the gift note has a broken rule.
    assert_eq!(hidden, ["order_gift_note"]);
}

#[test]
fn loaded_checkout_exports_payload() {
    let checkout = Checkout::from_json(CONFIG).unwrap();
    let payload = checkout.client_payload();

    let names: Vec<&str> = payload.display_rules().keys().map(String::as_str).collect();
    assert_eq!(names, ["billing_city", "billing_vat", "order_gift_note"]);
    assert_eq!(payload.rules_for("order_gift_note").unwrap().len(), 1);
    assert!(payload.skip_map().skips("order_fax_field"));
    assert!(payload.skip_map().skips("shipping_city_field"));

    let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
    assert_eq!(
        json["displayRules"]["billing_vat"][0]["condition"],
        serde_json::json!("in")
    );
}

#[test]
fn strip_hidden_from_submitted_form() {
    let checkout = Checkout::from_json(CONFIG).unwrap();
    let mut form: CheckoutForm<String> = HashMap::new();
    for (section, name) in [
        (Section::Billing, "billing_vat"),
        (Section::Billing, "billing_city"),
        (Section::Order, "order_gift_note"),
        (Section::Order, "order_fax"),
    ] {
        form.entry(section)
            .or_default()
            .insert(name.to_owned(), String::new());
    }

    let values = FormValues::new().set("billing_country", "US");
    let removed = checkout.strip_hidden(&mut form, &values);

    assert_eq!(removed, ["billing_vat", "order_gift_note"]);
    assert_eq!(form[&Section::Billing].len(), 1);
    assert!(form[&Section::Order].contains_key("order_fax"));
}

#[test]
fn bare_row_dump_uses_defaults() {
    let config = CheckoutConfig::from_json(
        r#"[{"field_name": "shipping_city", "section": "shipping", "display_rules": []}]"#,
    )
    .unwrap();
    assert!(config.effective_skip_map().skips("shipping_city_field"));

    let checkout = Checkout::from_config(config);
    assert_eq!(checkout.section(Section::Shipping).count(), 1);
}

#[test]
fn malformed_configuration() {
    for input in [
        "",
        "{",
        r#"{"skip_map": {}}"#,
        r#"[{"field_name": "x", "section": "billing", "active": "maybe"}]"#,
        r#"[{"field_name": "x", "section": "billing", "display_rules": "not json"}]"#,
    ] {
        let result = Checkout::from_json(input);
        assert!(
            matches!(result, Err(DisplayRuleError::Config(_))),
            "expected config error for {input:?}"
        );
    }
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Checkout::from_file(dir.path().join("fields.json"));
    assert!(matches!(result, Err(DisplayRuleError::Io(_))));
}
