//! Display rules for checkout fields.
//!
//! A field carries raw rule records such as
//! `{"field": "payment_method", "condition": "equals", "value": "cod"}`.
//! [`RuleBuilder`] validates them into [`Rule`]s, [`show_field`] decides the
//! field's visibility for the current form values, and [`ClientPayload`]
//! exports the same rules for the browser to re-evaluate.
//!
//! The two paths fail differently on a broken rule: the server hides the
//! field, the browser payload drops the rule.

mod build;
mod checkout;
mod config;
mod error;
mod evaluate;
pub mod parse;
mod payload;
mod types;

pub use build::{BuildRule, RuleBuilder};
pub use checkout::{Checkout, CheckoutForm};
pub use config::CheckoutConfig;
pub use error::DisplayRuleError;
pub use evaluate::{client_rules, show_field, show_field_detailed};
pub use payload::ClientPayload;
pub use types::{
    Field, FieldValues, FormValues, InvalidRuleSpec, Layered, Operator, OperatorTable, Reason,
    Rule, Section, SkipMap, VisibilityReport,
};
