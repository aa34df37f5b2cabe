//! Tokenizer for the value of a `pragma solidity` directive.
//!
//! Parses things like `>=0.7.0 <0.9.0 || ^0.8.0` and `0.8.0 - 0.8.19`.
//! The tokenizer is total: text it cannot make sense of becomes a term
//! the evaluator will reject, never a parse error.

use winnow::{
    Parser, Result as WResult,
    ascii::{multispace0, multispace1},
    combinator::{alt, repeat, terminated},
    token::{take_till, take_while},
};

use crate::version::VersionExpr;

/// Split a constraint into its `||`-separated expression sets.
pub fn parse_version_constraint(text: &str) -> Vec<Vec<VersionExpr>> {
    text.split("||").map(parse_expression_set).collect()
}

fn parse_expression_set(text: &str) -> Vec<VersionExpr> {
    let mut input = text.trim();
    // `expressions` consumes any non-empty input, so failure is unreachable
    expressions.parse_next(&mut input).unwrap_or_default()
}

fn expressions(input: &mut &str) -> WResult<Vec<VersionExpr>> {
    repeat(0.., terminated(alt((range, term, junk)), multispace0)).parse_next(input)
}

fn literal_token<'a>(input: &mut &'a str) -> WResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '.' || c == '*').parse_next(input)
}

// `0.8.0 - 0.8.19`; the hyphen must be surrounded by whitespace
fn range(input: &mut &str) -> WResult<VersionExpr> {
    (literal_token, multispace1, '-', multispace1, literal_token)
        .map(|(from, _, _, _, to)| VersionExpr::range(from, to))
        .parse_next(input)
}

// `^0.8.0`, `>= 0.8.0`, `0.8.19`, `!=0.8.0`
fn term(input: &mut &str) -> WResult<VersionExpr> {
    (
        take_while(0.., |c: char| {
            !c.is_ascii_alphanumeric() && !c.is_whitespace() && c != '*'
        }),
        multispace0,
        take_till(1.., |c: char| c.is_whitespace()),
    )
        .map(|(op, _, version): (&str, _, &str)| VersionExpr::term(op, version))
        .parse_next(input)
}

// a dangling operator with nothing after it
fn junk(input: &mut &str) -> WResult<VersionExpr> {
    take_till(1.., |c: char| c.is_whitespace())
        .map(|text: &str| VersionExpr::term(text, ""))
        .parse_next(input)
}
