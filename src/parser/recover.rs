//! Recovering list and ensure combinators
//!
//! Both combinators turn a local failure of an item grammar into data instead of aborting
//! the surrounding parse:
//!
//! - [`list`] parses `item (separator item)*` up to a terminator. Each slot is either the
//!   parsed item or the text that had to be skipped to reach the next separator or the
//!   terminator. The skipped text may be empty, so `n` separators always give `n + 1` slots.
//! - [`ensure`] parses a single item that must be followed by the terminator. On failure at
//!   least one character is skipped up to the terminator.
//!
//! Neither consumes the terminator. The combinators fail only when the terminator cannot be
//! reached at all.

use super::ParserError;
use chumsky::prelude::*;
use serde::Serialize;
use std::ops::Range;

/// Input skipped while recovering from a failed item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invalid {
    pub content: String,
    /// Byte offset of the skipped text within the parsed input
    pub position: usize,
}

impl Invalid {
    pub fn new(content: impl Into<String>, position: usize) -> Self {
        Self {
            content: content.into(),
            position,
        }
    }
}

/// One slot produced by a recovering combinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "slot", rename_all = "snake_case")]
pub enum Recovered<T> {
    Valid(T),
    Invalid(Invalid),
}

impl<T> Recovered<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Recovered::Valid(_))
    }

    pub fn valid(&self) -> Option<&T> {
        match self {
            Recovered::Valid(item) => Some(item),
            Recovered::Invalid(_) => None,
        }
    }

    pub fn invalid(&self) -> Option<&Invalid> {
        match self {
            Recovered::Valid(_) => None,
            Recovered::Invalid(invalid) => Some(invalid),
        }
    }
}

/// `item (separator item)*`, stopping in front of `terminator`
pub fn list<T, R, S, SO, E, EO>(
    item: R,
    separator: S,
    terminator: E,
) -> impl Parser<char, Vec<Recovered<T>>, Error = ParserError> + Clone
where
    R: Parser<char, T, Error = ParserError> + Clone,
    S: Parser<char, SO, Error = ParserError> + Clone,
    E: Parser<char, EO, Error = ParserError> + Clone,
{
    let boundary = separator
        .clone()
        .ignored()
        .or(terminator.clone().ignored());
    let slot = recover_until(item, boundary, 0);

    slot.clone()
        .then(separator.ignore_then(slot).repeated())
        .then_ignore(terminator.rewind())
        .map(|(head, tail)| {
            let mut slots = Vec::with_capacity(tail.len() + 1);
            slots.push(head);
            slots.extend(tail);
            slots
        })
}

/// A single `item` that must be immediately followed by `terminator`
pub fn ensure<T, R, E, EO>(
    item: R,
    terminator: E,
) -> impl Parser<char, Recovered<T>, Error = ParserError> + Clone
where
    R: Parser<char, T, Error = ParserError> + Clone,
    E: Parser<char, EO, Error = ParserError> + Clone,
{
    recover_until(item, terminator.ignored(), 1)
}

/// Parse `item` in front of `boundary`, or skip at least `min_skip` characters up to it.
fn recover_until<T, R, B>(
    item: R,
    boundary: B,
    min_skip: usize,
) -> impl Parser<char, Recovered<T>, Error = ParserError> + Clone
where
    R: Parser<char, T, Error = ParserError> + Clone,
    B: Parser<char, (), Error = ParserError> + Clone,
{
    let valid = item
        .then_ignore(boundary.clone().rewind())
        .map(Recovered::Valid);

    let skipped = boundary
        .clone()
        .not()
        .repeated()
        .at_least(min_skip)
        .collect::<String>()
        .map_with_span(|content, span: Range<usize>| {
            Recovered::Invalid(Invalid::new(content, span.start))
        })
        .then_ignore(boundary.rewind());

    valid.or(skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::char_stream;
    use rstest::rstest;

    fn name() -> impl Parser<char, String, Error = ParserError> + Clone {
        filter(|c: &char| c.is_ascii_lowercase())
            .repeated()
            .at_least(1)
            .collect::<String>()
    }

    fn parse_list(input: &str) -> Vec<Recovered<String>> {
        list(name(), just(','), end())
            .parse(char_stream(input))
            .expect("list reaches end of input")
    }

    fn describe(slots: &[Recovered<String>]) -> Vec<(String, bool)> {
        slots
            .iter()
            .map(|slot| match slot {
                Recovered::Valid(name) => (name.clone(), true),
                Recovered::Invalid(invalid) => (invalid.content.clone(), false),
            })
            .collect()
    }

    #[rstest]
    #[case("a", vec![("a", true)])]
    #[case("A,b", vec![("A", false), ("b", true)])]
    #[case("Aa,b", vec![("Aa", false), ("b", true)])]
    #[case("aA,b", vec![("aA", false), ("b", true)])]
    #[case("a,", vec![("a", true), ("", false)])]
    #[case("a,,b", vec![("a", true), ("", false), ("b", true)])]
    #[case(",a", vec![("", false), ("a", true)])]
    #[case("", vec![("", false)])]
    #[case(",", vec![("", false), ("", false)])]
    fn list_recovers_each_slot(#[case] input: &str, #[case] expected: Vec<(&str, bool)>) {
        let expected: Vec<(String, bool)> = expected
            .into_iter()
            .map(|(text, valid)| (text.to_string(), valid))
            .collect();
        assert_eq!(describe(&parse_list(input)), expected);
    }

    #[test]
    fn trailing_separator_adds_a_slot() {
        let slots = parse_list("a,b,c,");
        assert_eq!(slots.len(), 4);
        assert!(!slots[3].is_valid());
    }

    #[test]
    fn invalid_slot_records_byte_position() {
        let slots = parse_list("ab,ŽZ,c");
        assert_eq!(slots[1].invalid(), Some(&Invalid::new("ŽZ", 3)));
        assert_eq!(slots[2].valid().map(String::as_str), Some("c"));
    }

    #[test]
    fn list_stops_in_front_of_terminator() {
        let parser = list(name(), just(','), just('}')).then(just('}'));
        let (slots, close) = parser
            .parse(char_stream("a,B}"))
            .expect("terminator present");
        assert_eq!(close, '}');
        assert_eq!(describe(&slots), vec![("a".into(), true), ("B".into(), false)]);
    }

    #[test]
    fn list_fails_without_terminator() {
        let parser = list(name(), just(','), just('}'));
        assert!(parser.parse(char_stream("a,b")).is_err());
    }

    #[test]
    fn ensure_accepts_item_before_terminator() {
        let parser = ensure(name(), just('{').ignored().or(end()));
        let slot = parser.parse(char_stream("abc{")).expect("item parses");
        assert_eq!(slot, Recovered::Valid("abc".to_string()));
    }

    #[test]
    fn ensure_skips_whole_span_on_failure() {
        let parser = ensure(name(), just('{').ignored().or(end()));
        let slot = parser.parse(char_stream("ab cd{")).expect("skip reaches terminator");
        assert_eq!(slot, Recovered::Invalid(Invalid::new("ab cd", 0)));
    }

    #[test]
    fn ensure_never_yields_empty_invalid() {
        let parser = ensure(name(), just('{').ignored().or(end()));
        assert!(parser.parse(char_stream("{")).is_err());
    }
}
