use winnow::ascii::{digit1, multispace0, multispace1};
use winnow::combinator::{alt, cut_err, delimited, opt, separated};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::parser::ParsedRule;

fn ws(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

fn expected(what: &'static str) -> StrContext {
    StrContext::Expected(StrContextValue::Description(what))
}

// -- Identifiers ------------------------------------------------------------

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| {
            c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'
        }),
    )
        .take()
        .parse_next(input)
}

// -- Values -----------------------------------------------------------------

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = any.parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn number_literal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (opt('-'), digit1, opt(('.', digit1)))
        .take()
        .parse_next(input)
}

fn value(input: &mut &str) -> ModalResult<String> {
    alt((string_literal, number_literal.map(str::to_owned)))
        .context(expected("value"))
        .parse_next(input)
}

fn value_list(input: &mut &str) -> ModalResult<Vec<String>> {
    '['.parse_next(input)?;
    let values: Vec<String> = separated(0.., delimited(ws, value, ws), ',').parse_next(input)?;
    ws.parse_next(input)?;
    cut_err(']')
        .context(StrContext::Expected(StrContextValue::CharLiteral(']')))
        .parse_next(input)?;
    Ok(values)
}

fn values(input: &mut &str) -> ModalResult<Vec<String>> {
    alt((value_list, value.map(|v| vec![v]))).parse_next(input)
}

// -- Operators --------------------------------------------------------------

fn operator(input: &mut &str) -> ModalResult<String> {
    alt((
        "==".value("equals".to_owned()),
        "!=".value("not_equals".to_owned()),
        ("not", multispace1, "in").value("not_in".to_owned()),
        ident.map(str::to_owned),
    ))
    .parse_next(input)
}

// -- Top-level parser -------------------------------------------------------

pub fn rule(input: &mut &str) -> ModalResult<ParsedRule> {
    ws.parse_next(input)?;
    let target = alt((string_literal, ident.map(str::to_owned)))
        .context(expected("field name"))
        .parse_next(input)?;
    ws.parse_next(input)?;
    let token = cut_err(operator)
        .context(expected("operator"))
        .parse_next(input)?;
    ws.parse_next(input)?;
    let values = cut_err(values)
        .context(expected("value or value list"))
        .parse_next(input)?;
    ws.parse_next(input)?;

    Ok(ParsedRule {
        target,
        token,
        values,
    })
}
