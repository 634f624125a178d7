use display_rules::{show_field, show_field_detailed, Field, FormValues, RuleBuilder, Section};
use serde_json::json;

fn main() {
    // A field shown only to business customers outside Ukraine
    let company = Field::new("billing_company", Section::Billing)
        .with_meta("label", "Company name")
        .with_rule(json!({"field": "customer_type", "condition": "equals", "value": "b2b"}))
        .with_rule(json!({"field": "billing_country", "condition": "not_in", "value": ["UA"]}));

    let builder = RuleBuilder::new();

    // Only the last rule decides
    let values = FormValues::new()
        .set("customer_type", "b2c")
        .set("billing_country", "PL");

    println!(
        "{}: {}",
        company.label(),
        if show_field(&company, &builder, &values) {
            "shown"
        } else {
            "hidden"
        }
    );

    let report = show_field_detailed(&company, &builder, &values);
    println!("{report}");
    for (rule, result) in report.evaluated() {
        println!("  {rule} -> {result}");
    }
}
