use std::collections::HashMap;

use display_rules::{Checkout, CheckoutForm, FormValues, Section};

fn main() {
    let checkout =
        Checkout::from_file("demos/checkout_fields.json").expect("failed to load configuration");

    println!("{checkout}");

    // The submitted checkout form, as the host hands it over
    let mut form: CheckoutForm<String> = HashMap::new();
    for field in checkout.fields() {
        form.entry(field.section)
            .or_default()
            .insert(field.name.clone(), String::new());
    }

    let values = FormValues::new()
        .set("billing_country", "UA")
        .set("ship_to", "branch")
        .set("payment_method", "cod");

    let removed = checkout.strip_hidden(&mut form, &values);
    println!("Skipped validation for: {removed:?}");

    for section in [Section::Billing, Section::Shipping, Section::Order] {
        let mut kept: Vec<&String> = form.get(&section).into_iter().flat_map(|s| s.keys()).collect();
        kept.sort();
        println!("{section}: {kept:?}");
    }
}
