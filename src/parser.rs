//! Character level grammars
//!
//! Grammars here are chumsky parsers over `char` input. Spans are byte offsets into the
//! parsed string so that positions reported by invalid fragments can be used to slice the
//! original source directly.

pub mod recover;
pub mod uritemplate;

use chumsky::prelude::Simple;
use chumsky::Stream;
use std::ops::Range;

/// Error type shared by all character grammars
pub type ParserError = Simple<char>;

/// Stream the characters of `source` paired with their byte spans
pub(crate) fn char_stream(
    source: &str,
) -> Stream<'_, char, Range<usize>, impl Iterator<Item = (char, Range<usize>)> + '_> {
    let eoi = source.len()..source.len();
    Stream::from_iter(
        eoi,
        source
            .char_indices()
            .map(|(offset, c)| (c, offset..offset + c.len_utf8())),
    )
}
