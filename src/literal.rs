//! Restricted literal parser for persisted object values.
//!
//! The object store persists each value as literal text. Only three forms
//! are accepted: numbers (optional sign, integer or decimal), quoted
//! strings (single or double quotes, backslash escapes), and booleans
//! (`true`/`false`, plus the capitalized spellings found in stores written
//! by other tooling). Anything else is rejected; persisted text is never
//! evaluated.

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag},
    character::complete::{char, digit1, multispace0, one_of},
    combinator::{all_consuming, map, map_res, opt, recognize, value},
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::value::Value;

/// Parse one persisted literal into a [`Value`].
///
/// The whole input must be consumed; trailing garbage is an error.
pub fn parse_literal(input: &str) -> Result<Value, String> {
    match all_consuming(delimited(multispace0, literal, multispace0))(input) {
        Ok((_, v)) => Ok(v),
        Err(_) => Err(format!("not a restricted literal: {:?}", input)),
    }
}

fn literal(input: &str) -> IResult<&str, Value> {
    alt((boolean, number, single_quoted, double_quoted))(input)
}

fn boolean(input: &str) -> IResult<&str, Value> {
    alt((
        value(Value::Bool(true), alt((tag("true"), tag("True")))),
        value(Value::Bool(false), alt((tag("false"), tag("False")))),
    ))(input)
}

fn number(input: &str) -> IResult<&str, Value> {
    map_res(
        recognize(tuple((
            opt(one_of("+-")),
            digit1,
            opt(preceded(char('.'), digit1)),
        ))),
        |s: &str| s.parse::<f64>().map(Value::Num),
    )(input)
}

fn single_quoted(input: &str) -> IResult<&str, Value> {
    map(
        delimited(
            char('\''),
            opt(escaped_transform(is_not("\\'"), '\\', escape_sequence)),
            char('\''),
        ),
        |s: Option<String>| Value::Str(s.unwrap_or_default()),
    )(input)
}

fn double_quoted(input: &str) -> IResult<&str, Value> {
    map(
        delimited(
            char('"'),
            opt(escaped_transform(is_not("\\\""), '\\', escape_sequence)),
            char('"'),
        ),
        |s: Option<String>| Value::Str(s.unwrap_or_default()),
    )(input)
}

fn escape_sequence(input: &str) -> IResult<&str, &str> {
    alt((
        value("\\", char('\\')),
        value("'", char('\'')),
        value("\"", char('"')),
        value("\n", char('n')),
        value("\t", char('t')),
    ))(input)
}
