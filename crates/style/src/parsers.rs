//! nom parsers for length values found in resolved styles.
//!
//! Indentation properties arrive as strings such as `"36pt"`, `"0.5in"` or the
//! bare `"0"`. Everything is normalized to points.

use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit1, space0};
use nom::combinator::{all_consuming, map_res, opt, recognize, value};
use nom::sequence::delimited;
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur while parsing a style value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(alt((char('+'), char('-')))),
            alt((
                recognize((digit1, opt((char('.'), digit1)))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        value(1.0, tag_no_case("pt")),
        value(1.0, tag_no_case("px")), // Treat px as pt
        value(72.0, tag_no_case("in")),
        value(28.35, tag_no_case("cm")),
        value(2.835, tag_no_case("mm")),
        value(0.05, tag_no_case("tw")),
    ))
    .parse(input)
}

/// Parses a length with an optional unit (e.g. "12pt", "1in", "10mm", "0").
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    let (input, magnitude) = parse_f32(input)?;
    let (input, unit) = opt(parse_unit).parse(input)?;
    Ok((input, magnitude * unit.unwrap_or(1.0)))
}

/// Parses a complete property value as a length in points.
pub fn parse_points(property: &str, input: &str) -> Result<f32, StyleParseError> {
    all_consuming(delimited(space0, parse_length, space0))
        .parse(input)
        .map(|(_, points)| points)
        .map_err(|_| StyleParseError::InvalidValue {
            property: property.to_string(),
            value: input.to_string(),
        })
}
