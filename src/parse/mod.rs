mod error;
mod grammar;
mod parser;

pub use error::ParseError;
pub use parser::ParsedRule;

/// Parse the text form of a single rule, e.g. `payment_method == "cod"`.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid rule syntax.
pub fn parse_rule(input: &str) -> Result<ParsedRule, ParseError> {
    use winnow::Parser;
    grammar::rule
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}
