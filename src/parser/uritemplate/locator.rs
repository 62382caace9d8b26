//! Locates the offending run inside an invalid template fragment
//!
//! The locator skips the longest valid prefix (a varspec for variables, a literal run for
//! top-level fragments) and classifies what follows: a malformed percent triplet, a run of
//! two or more dots, or a single disallowed character. It only explains a failure that the
//! template grammar already recorded.

use super::{literal_run, varspec};
use crate::parser::{char_stream, ParserError};
use chumsky::prelude::*;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Character(char),
    NestedExpressionBracket,
    ContinuousDots(String),
    PercentEncoded(String),
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Character(c) => write!(f, "character '{}'", c),
            Reason::NestedExpressionBracket => write!(f, "nested expression bracket '{{'"),
            Reason::ContinuousDots(dots) => write!(f, "continuous dots '{}'", dots),
            Reason::PercentEncoded(triplet) => write!(f, "percent encoded character '{}'", triplet),
        }
    }
}

/// Offending run found in an invalid fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locus {
    pub reason: Reason,
    /// Byte offset within the fragment
    pub position: usize,
    pub length: usize,
}

/// Explain an invalid expression variable.
pub fn locate_in_variable(content: &str) -> Option<Locus> {
    locate(varspec(), content)
}

/// Explain an invalid top-level fragment.
pub fn locate_in_literals(content: &str) -> Option<Locus> {
    locate(literal_run(), content)
}

fn locate<O, P>(valid_prefix: P, content: &str) -> Option<Locus>
where
    P: Parser<char, O, Error = ParserError> + Clone,
{
    valid_prefix
        .or_not()
        .ignore_then(offender())
        .parse(char_stream(content))
        .ok()
}

fn offender() -> impl Parser<char, Locus, Error = ParserError> + Clone {
    let pct_triplet = just('%')
        .chain(any())
        .chain(any())
        .collect::<String>()
        .map(Reason::PercentEncoded);

    let continuous_dots = just('.')
        .chain(just('.').repeated().at_least(1))
        .collect::<String>()
        .map(Reason::ContinuousDots);

    let invalid_char = any().map(|c| match c {
        '{' => Reason::NestedExpressionBracket,
        other => Reason::Character(other),
    });

    choice((pct_triplet, continuous_dots, invalid_char)).map_with_span(
        |reason, span: Range<usize>| Locus {
            reason,
            position: span.start,
            length: span.end - span.start,
        },
    )
}
