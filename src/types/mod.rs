mod context;
mod error;
mod field;
mod operator;
mod rule;
mod skip_map;
mod visibility_report;

pub use context::{FieldValues, FormValues, Layered};
pub use error::InvalidRuleSpec;
pub use field::{Field, Section};
pub use operator::{Operator, OperatorTable};
pub use rule::Rule;
pub use skip_map::SkipMap;
pub use visibility_report::{Reason, VisibilityReport};
