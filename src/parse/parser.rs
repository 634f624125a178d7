/// A rule in text form, split into its parts but not yet validated.
///
/// Symbolic operators are normalized to canonical tokens (`==` becomes
/// `equals`, `not in` becomes `not_in`); word tokens are kept as written and
/// resolved later against the builder's operator table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    pub target: String,
    pub token: String,
    pub values: Vec<String>,
}
