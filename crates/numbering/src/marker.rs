//! Marker templates, counter formatting and literal marker recognition.

use crate::definitions::NumberFormat;
use crate::resolver::ResolvedLevel;
use crate::NumberingError;
use nom::branch::alt;
use nom::bytes::complete::{take_till1, take_while1};
use nom::character::complete::{char, digit0, one_of, satisfy};
use nom::combinator::{all_consuming, eof, map, opt, recognize, value};
use nom::multi::many0;
use nom::{IResult, Parser};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// Zero-based level index.
    Placeholder(usize),
}

/// A parsed marker template such as `"%1.%2."`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerTemplate {
    source: String,
    segments: Vec<Segment>,
}

fn placeholder(input: &str) -> IResult<&str, Segment> {
    map((char('%'), one_of("123456789")), |(_, d)| {
        Segment::Placeholder(d as usize - '1' as usize)
    })
    .parse(input)
}

fn segment(input: &str) -> IResult<&str, Segment> {
    alt((
        placeholder,
        map(take_till1(|c: char| c == '%'), |s: &str| Segment::Literal(s.to_string())),
        // A lone percent sign is plain text.
        map(char('%'), |_| Segment::Literal("%".to_string())),
    ))
    .parse(input)
}

impl MarkerTemplate {
    pub fn parse(source: &str) -> Result<Self, NumberingError> {
        let (_, segments) = all_consuming(many0(segment))
            .parse(source)
            .map_err(|_| NumberingError::InvalidTemplate(source.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Highest level index referenced by a placeholder.
    pub fn deepest_placeholder(&self) -> Option<usize> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(i) => Some(*i),
                Segment::Literal(_) => None,
            })
            .max()
    }
}

/// Formats a counter value in the given style.
///
/// Bullet and none levels have no visible number. Letters double after `z`
/// (`aa`, `bb`, ...); roman numerals outside 1..=3999 fall back to decimal.
pub fn format_counter(format: NumberFormat, n: u32) -> String {
    match format {
        NumberFormat::Decimal => n.to_string(),
        NumberFormat::LowerLetter => int_to_lower_alpha(n),
        NumberFormat::UpperLetter => int_to_lower_alpha(n).to_uppercase(),
        NumberFormat::LowerRoman => int_to_lower_roman(n),
        NumberFormat::UpperRoman => int_to_lower_roman(n).to_uppercase(),
        NumberFormat::Bullet | NumberFormat::None => String::new(),
    }
}

fn int_to_lower_alpha(n: u32) -> String {
    if n == 0 {
        return n.to_string();
    }
    let letter = (b'a' + ((n - 1) % 26) as u8) as char;
    let repeat = ((n - 1) / 26 + 1) as usize;
    std::iter::repeat_n(letter, repeat).collect()
}

fn int_to_lower_roman(n: u32) -> String {
    if n == 0 || n > 3999 {
        return n.to_string();
    }
    let mut num = n;
    let values = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut result = String::new();
    for &(val, sym) in &values {
        while num >= val {
            result.push_str(sym);
            num -= val;
        }
    }
    result
}

/// Renders the marker for the deepest level in `counters`.
///
/// `counters[k]` is the current value at level `k`. Placeholders pointing at
/// levels the stack does not reach use that level's start value. Returns
/// `None` when the level itself is undefined.
pub fn render_marker(levels: &[Option<Arc<ResolvedLevel>>], counters: &[u32]) -> Option<String> {
    let index = counters.len().checked_sub(1)?;
    let level = levels.get(index)?.as_ref()?;

    let mut out = String::new();
    for segment in &level.template.segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(k) => {
                let referenced = levels.get(*k).and_then(Option::as_ref);
                let format = referenced.map(|l| l.format).unwrap_or_default();
                let n = counters
                    .get(*k)
                    .copied()
                    .or_else(|| referenced.map(|l| l.start))
                    .unwrap_or(1);
                out.push_str(&format_counter(format, n));
            }
        }
    }
    out.push_str(level.suffix.as_str());
    Some(out)
}

fn ordinal_marker(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(one_of("\u{f0b7}\u{2022}")),
        recognize((satisfy(|c| ('1'..='9').contains(&c)), digit0, char('.'))),
        recognize((take_while1(|c: char| "ivxlcdm".contains(c)), char('.'))),
        recognize((satisfy(|c: char| c.is_ascii_lowercase()), opt(char('.')))),
    ))
    .parse(input)
}

/// True if `text` is a literal marker the list engine understands: a bullet
/// glyph, `N.`, a lowercase letter with an optional period, or a lowercase
/// roman numeral with a period, always followed by exactly one tab.
pub fn is_recognized_marker(text: &str) -> bool {
    value((), (ordinal_marker, char('\t'), eof))
        .parse(text)
        .is_ok()
}
