use std::fmt;
use std::time::Duration;

use super::error::InvalidRuleSpec;
use super::rule::Rule;

/// What settled a field's visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// The field is inactive; rules were not looked at.
    Inactive,
    /// The rule at `index` failed to build, so the field is hidden.
    InvalidRule { index: usize, error: InvalidRuleSpec },
    /// The field has no rules and is shown.
    NoRules,
    /// The last rule, at `index`, decided.
    LastRule { index: usize },
}

/// Detailed visibility result returned by
/// [`show_field_detailed()`](crate::show_field_detailed).
#[derive(Debug, Clone)]
#[must_use]
pub struct VisibilityReport {
    field: String,
    visible: bool,
    reason: Reason,
    evaluated: Vec<(Rule, bool)>,
    duration: Duration,
}

impl VisibilityReport {
    pub(crate) fn new(
        field: String,
        visible: bool,
        reason: Reason,
        evaluated: Vec<(Rule, bool)>,
        duration: Duration,
    ) -> Self {
        Self {
            field,
            visible,
            reason,
            evaluated,
            duration,
        }
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The decision, same as [`show_field()`](crate::show_field).
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    /// Every rule evaluated, in declaration order, with its result.
    #[must_use]
    pub fn evaluated(&self) -> &[(Rule, bool)] {
        &self.evaluated
    }

    /// Wall-clock duration of building and evaluating.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for VisibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.visible { "shown" } else { "hidden" };
        write!(f, "{}: {state}", self.field)?;
        match &self.reason {
            Reason::Inactive => write!(f, " (inactive)")?,
            Reason::InvalidRule { index, error } => write!(f, " (rule {index}: {error})")?,
            Reason::NoRules => write!(f, " (no rules)")?,
            Reason::LastRule { index } => write!(f, " (decided by rule {index})")?,
        }
        write!(f, ", duration: {:?}", self.duration)
    }
}
