use std::time::Instant;

use tracing::{debug, trace};

use crate::{BuildRule, Field, FieldValues, InvalidRuleSpec, Reason, Rule, VisibilityReport};

/// Decide whether `field` is shown for the current `values`.
///
/// - An inactive field is hidden; its rules are never built.
/// - If any rule fails to build, the field is hidden.
/// - Otherwise rules are evaluated in declaration order and the *last* rule's
///   result is the decision. Earlier results are overwritten, not combined.
/// - A field without rules is shown.
#[must_use]
pub fn show_field<B, V>(field: &Field, builder: &B, values: &V) -> bool
where
    B: BuildRule + ?Sized,
    V: FieldValues + ?Sized,
{
    if !field.active {
        return false;
    }

    let rules = match build_all(field, builder) {
        Ok(rules) => rules,
        Err((index, error)) => {
            debug!(field = %field.name, index, %error, "display rule failed to build; hiding field");
            return false;
        }
    };

    let mut show = true;
    for rule in &rules {
        show = rule.matches(values);
        trace!(field = %field.name, %rule, result = show, "evaluated display rule");
    }
    show
}

/// Same decision as [`show_field`], with the reason and per-rule results.
pub fn show_field_detailed<B, V>(field: &Field, builder: &B, values: &V) -> VisibilityReport
where
    B: BuildRule + ?Sized,
    V: FieldValues + ?Sized,
{
    let start = Instant::now();

    if !field.active {
        return VisibilityReport::new(
            field.name.clone(),
            false,
            Reason::Inactive,
            Vec::new(),
            start.elapsed(),
        );
    }

    let rules = match build_all(field, builder) {
        Ok(rules) => rules,
        Err((index, error)) => {
            return VisibilityReport::new(
                field.name.clone(),
                false,
                Reason::InvalidRule { index, error },
                Vec::new(),
                start.elapsed(),
            );
        }
    };

    let evaluated: Vec<(Rule, bool)> = rules
        .into_iter()
        .map(|rule| {
            let result = rule.matches(values);
            (rule, result)
        })
        .collect();

    let (visible, reason) = match evaluated.last() {
        Some((_, result)) => (
            *result,
            Reason::LastRule {
                index: evaluated.len() - 1,
            },
        ),
        None => (true, Reason::NoRules),
    };

    VisibilityReport::new(
        field.name.clone(),
        visible,
        reason,
        evaluated,
        start.elapsed(),
    )
}

/// The rules of `field` that go to the browser.
///
/// Rules that fail to build are skipped. Returns `None` for inactive fields
/// and for fields left with no rule at all.
#[must_use]
pub fn client_rules<B>(field: &Field, builder: &B) -> Option<Vec<Rule>>
where
    B: BuildRule + ?Sized,
{
    if !field.active {
        return None;
    }

    let rules: Vec<Rule> = field
        .display_rules
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match builder.build_from_record(raw) {
            Ok(rule) => Some(rule),
            Err(error) => {
                debug!(field = %field.name, index, %error, "skipping display rule for client");
                None
            }
        })
        .collect();

    if rules.is_empty() {
        None
    } else {
        Some(rules)
    }
}

/// Last-write-wins over already built rules, `true` when empty.
pub(crate) fn last_rule_decides<V>(rules: &[Rule], values: &V) -> bool
where
    V: FieldValues + ?Sized,
{
    rules.iter().fold(true, |_, rule| rule.matches(values))
}

/// Build every rule in order, stopping at the first failure.
fn build_all<B>(field: &Field, builder: &B) -> Result<Vec<Rule>, (usize, InvalidRuleSpec)>
where
    B: BuildRule + ?Sized,
{
    field
        .display_rules
        .iter()
        .enumerate()
        .map(|(index, raw)| builder.build_from_record(raw).map_err(|e| (index, e)))
        .collect()
}
