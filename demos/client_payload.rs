use display_rules::{Checkout, Field, FormValues, Section};
use serde_json::json;

fn main() {
    let checkout = Checkout::new(vec![
        Field::new("billing_vat", Section::Billing).with_rule(
            json!({"field": "billing_country", "condition": "in", "value": ["DE", "FR"]}),
        ),
        Field::new("order_gift_note", Section::Order)
            .with_rule(json!({"field": "gift", "condition": "==", "value": "yes"})),
        // Unknown operator: hidden on the server, left out of the payload
        Field::new("order_delivery_slot", Section::Order)
            .with_rule(json!({"field": "ship_to", "condition": "contains", "value": "door"})),
    ]);

    let payload = checkout.client_payload();
    println!(
        "{}",
        payload
            .to_json_pretty()
            .expect("failed to encode client payload")
    );

    let values = FormValues::new().set("billing_country", "FR");
    for field in checkout.fields() {
        println!(
            "{:<20} server: {:<6} browser: {}",
            field.name,
            !checkout.is_field_hidden(field, &values),
            payload.show_field(&field.name, &values)
        );
    }
}
