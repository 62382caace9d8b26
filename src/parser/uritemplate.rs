//! URI template grammar
//!
//! Decomposes a URI template into literal runs, `{...}` expressions and invalid fragments,
//! following RFC 6570 syntax while tolerating the mistakes real templates contain.
//!
//! Grammar
//!
//!     template    = ( literals | expression )+ EOF
//!     literals    = ensure< literal+ , "{" | EOF >
//!     literal     = pct-encoded | ascii-allowed | ucschar | iprivate
//!     expression  = "{" operator? list< varspec , "," , "}" | EOF > "}"?
//!     varspec     = varname ( ":" DIGIT{0,3} | "*" )?
//!     varname     = varchar ( "." !"." | varchar )*
//!     varchar     = pct-encoded | ALPHA | DIGIT | "_"
//!
//! `ascii-allowed` is the RFC 6570 literal set without `~`, `[` and `]`, keeping templates
//! compatible with RFC 1738. A missing closing bracket is recorded on the expression rather
//! than failing the parse.

pub mod locator;

use super::recover::{ensure, list, Invalid, Recovered};
use super::{char_stream, ParserError};
use chumsky::prelude::*;
use serde::Serialize;
use std::fmt;

/// Operator of a template expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionKind {
    Noop,
    ReservedChars,
    Fragment,
    Label,
    Path,
    PathParam,
    QueryParam,
    QueryContinue,
    /// One of the operators RFC 6570 reserves for future extensions: `= , ! @ |`
    Reserved(char),
}

impl ExpressionKind {
    pub fn operator(self) -> Option<char> {
        match self {
            ExpressionKind::Noop => None,
            ExpressionKind::ReservedChars => Some('+'),
            ExpressionKind::Fragment => Some('#'),
            ExpressionKind::Label => Some('.'),
            ExpressionKind::Path => Some('/'),
            ExpressionKind::PathParam => Some(';'),
            ExpressionKind::QueryParam => Some('?'),
            ExpressionKind::QueryContinue => Some('&'),
            ExpressionKind::Reserved(op) => Some(op),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    /// Digits of a `:N` modifier as written; `v:` yields `Some("")`
    pub prefix: Option<String>,
    pub explode: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            explode: false,
        }
    }

    /// Length of the prefix modifier, with `v:` counting as zero
    pub fn prefix_length(&self) -> Option<usize> {
        self.prefix
            .as_deref()
            .map(|digits| digits.parse().unwrap_or(0))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(prefix) = &self.prefix {
            write!(f, ":{}", prefix)?;
        }
        if self.explode {
            f.write_str("*")?;
        }
        Ok(())
    }
}

pub type VariableSlot = Recovered<Variable>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub variables: Vec<VariableSlot>,
    pub missing_expression_close: bool,
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        if let Some(op) = self.kind.operator() {
            write!(f, "{}", op)?;
        }
        for (index, slot) in self.variables.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            match slot {
                Recovered::Valid(variable) => write!(f, "{}", variable)?,
                Recovered::Invalid(invalid) => f.write_str(&invalid.content)?,
            }
        }
        if !self.missing_expression_close {
            f.write_str("}")?;
        }
        Ok(())
    }
}

/// One top-level piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Literals(String),
    Expression(Expression),
    Invalid(Invalid),
}

impl From<Recovered<String>> for Part {
    fn from(literals: Recovered<String>) -> Self {
        match literals {
            Recovered::Valid(text) => Part::Literals(text),
            Recovered::Invalid(invalid) => Part::Invalid(invalid),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Literals(text) => f.write_str(text),
            Part::Expression(expression) => write!(f, "{}", expression),
            Part::Invalid(invalid) => f.write_str(&invalid.content),
        }
    }
}

/// The template could not be decomposed at all (only empty input triggers this)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarError {
    pub position: usize,
    pub message: String,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.position, self.message)
    }
}

impl std::error::Error for GrammarError {}

/// Parse a URI template into its parts.
pub fn parse(template: &str) -> Result<Vec<Part>, GrammarError> {
    grammar().parse(char_stream(template)).map_err(|errors| {
        errors
            .into_iter()
            .next()
            .map(|error| GrammarError {
                position: error.span().start,
                message: error.to_string(),
            })
            .unwrap_or_else(|| GrammarError {
                position: 0,
                message: "unexpected end of template".to_string(),
            })
    })
}

fn grammar() -> impl Parser<char, Vec<Part>, Error = ParserError> + Clone {
    choice((literals().map(Part::from), expression().map(Part::Expression)))
        .repeated()
        .at_least(1)
        .then_ignore(end())
}

fn literals() -> impl Parser<char, Recovered<String>, Error = ParserError> + Clone {
    ensure(literal_run(), just('{').ignored().or(end()))
}

/// One or more literal characters, without the recovering wrapper
pub(crate) fn literal_run() -> impl Parser<char, String, Error = ParserError> + Clone {
    pct_encoded()
        .or(filter(|c: &char| is_literal_char(*c)).map(String::from))
        .repeated()
        .at_least(1)
        .map(|pieces: Vec<String>| pieces.concat())
}

fn expression() -> impl Parser<char, Expression, Error = ParserError> + Clone {
    just('{')
        .ignore_then(operator().or_not())
        .then(list(varspec(), just(','), just('}').ignored().or(end())))
        .then(just('}').or_not())
        .map(|((kind, variables), close)| Expression {
            kind: kind.unwrap_or(ExpressionKind::Noop),
            variables,
            missing_expression_close: close.is_none(),
        })
}

fn operator() -> impl Parser<char, ExpressionKind, Error = ParserError> + Clone {
    choice((
        just('+').to(ExpressionKind::ReservedChars),
        just('#').to(ExpressionKind::Fragment),
        just('.').to(ExpressionKind::Label),
        just('/').to(ExpressionKind::Path),
        just(';').to(ExpressionKind::PathParam),
        just('?').to(ExpressionKind::QueryParam),
        just('&').to(ExpressionKind::QueryContinue),
        one_of("=,!@|").map(ExpressionKind::Reserved),
    ))
}

#[derive(Clone)]
enum Modifier {
    Prefix(String),
    Explode,
}

pub(crate) fn varspec() -> impl Parser<char, Variable, Error = ParserError> + Clone {
    let prefix = just(':')
        .ignore_then(filter(|c: &char| c.is_ascii_digit()).repeated().at_most(3))
        .collect::<String>()
        .map(Modifier::Prefix);
    let explode = just('*').to(Modifier::Explode);

    varname()
        .then(prefix.or(explode).or_not())
        .map(|(name, modifier)| match modifier {
            Some(Modifier::Prefix(digits)) => Variable {
                name,
                prefix: Some(digits),
                explode: false,
            },
            Some(Modifier::Explode) => Variable {
                name,
                prefix: None,
                explode: true,
            },
            None => Variable::new(name),
        })
}

fn varname() -> impl Parser<char, String, Error = ParserError> + Clone {
    let dot = just('.')
        .then(just('.').rewind().or_not())
        .try_map(|(dot, next), span| match next {
            Some(_) => Err(Simple::custom(span, "continuous dots in variable name")),
            None => Ok(String::from(dot)),
        });

    varchar()
        .then(dot.or(varchar()).repeated())
        .map(|(head, tail)| {
            let mut name = head;
            name.extend(tail);
            name
        })
}

fn varchar() -> impl Parser<char, String, Error = ParserError> + Clone {
    pct_encoded().or(filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_').map(String::from))
}

fn pct_encoded() -> impl Parser<char, String, Error = ParserError> + Clone {
    let hex = filter(|c: &char| c.is_ascii_hexdigit());
    just('%')
        .then(hex.clone())
        .then(hex)
        .map(|((percent, high), low)| [percent, high, low].iter().collect::<String>())
}

fn is_literal_char(c: char) -> bool {
    is_ascii_allowed(c) || is_ucschar(c) || is_iprivate(c)
}

fn is_ascii_allowed(c: char) -> bool {
    matches!(c,
        '\u{21}'
        | '\u{23}'..='\u{24}'
        | '\u{26}'
        | '\u{28}'..='\u{3B}'
        | '\u{3D}'
        | '\u{3F}'..='\u{5A}'
        | '\u{5F}'
        | '\u{61}'..='\u{7A}')
}

fn is_ucschar(c: char) -> bool {
    let code = c as u32;
    match code {
        0xA0..=0xD7FF | 0xF900..=0xFDCF | 0xFDF0..=0xFFEF => true,
        0xE_0000..=0xE_0FFF => false,
        // planes 1 to 14, excluding the last two code points of each plane
        0x1_0000..=0xE_FFFF => code & 0xFFFF <= 0xFFFD,
        _ => false,
    }
}

fn is_iprivate(c: char) -> bool {
    matches!(c as u32, 0xE000..=0xF8FF | 0xF_0000..=0xF_FFFD | 0x10_0000..=0x10_FFFD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parts(template: &str) -> Vec<Part> {
        parse(template).expect("template parses")
    }

    #[test]
    fn single_expression() {
        let parsed = parts("{val}");
        assert_eq!(
            parsed,
            vec![Part::Expression(Expression {
                kind: ExpressionKind::Noop,
                variables: vec![Recovered::Valid(Variable::new("val"))],
                missing_expression_close: false,
            })]
        );
    }

    #[test]
    fn literal_only() {
        assert_eq!(parts("/simple/path"), vec![Part::Literals("/simple/path".into())]);
    }

    #[test]
    fn empty_template_is_a_grammar_error() {
        assert!(parse("").is_err());
    }

    #[rstest]
    #[case('+', ExpressionKind::ReservedChars)]
    #[case('#', ExpressionKind::Fragment)]
    #[case('.', ExpressionKind::Label)]
    #[case('/', ExpressionKind::Path)]
    #[case(';', ExpressionKind::PathParam)]
    #[case('?', ExpressionKind::QueryParam)]
    #[case('&', ExpressionKind::QueryContinue)]
    #[case('=', ExpressionKind::Reserved('='))]
    #[case('|', ExpressionKind::Reserved('|'))]
    fn operator_is_classified(#[case] op: char, #[case] kind: ExpressionKind) {
        let parsed = parts(&format!("{{{}var}}", op));
        match parsed.as_slice() {
            [Part::Expression(expression)] => {
                assert_eq!(expression.kind, kind);
                assert_eq!(expression.variables, vec![Recovered::Valid(Variable::new("var"))]);
            }
            other => panic!("expected a single expression, got {:?}", other),
        }
    }

    #[rstest]
    #[case("v:", Some(0), false)]
    #[case("v:7", Some(7), false)]
    #[case("v:007", Some(7), false)]
    #[case("v:333", Some(333), false)]
    #[case("v*", None, true)]
    fn modifiers(#[case] varspec: &str, #[case] prefix: Option<usize>, #[case] explode: bool) {
        let parsed = parts(&format!("{{{}}}", varspec));
        let Some(Part::Expression(expression)) = parsed.first() else {
            panic!("expected expression");
        };
        let variable = expression.variables[0].valid().expect("valid variable");
        assert_eq!(variable.name, "v");
        assert_eq!(variable.prefix_length(), prefix);
        assert_eq!(variable.explode, explode);
        assert_eq!(variable.to_string(), varspec);
    }

    #[test]
    fn four_digit_prefix_is_invalid() {
        let parsed = parts("{v:1234}");
        let Some(Part::Expression(expression)) = parsed.first() else {
            panic!("expected expression");
        };
        assert_eq!(
            expression.variables,
            vec![Recovered::Invalid(Invalid::new("v:1234", 1))]
        );
    }

    #[test]
    fn invalid_positions_are_byte_offsets() {
        let parsed = parts("/é{a,b-c}");
        let Some(Part::Expression(expression)) = parsed.get(1) else {
            panic!("expected expression");
        };
        assert_eq!(expression.variables[1], Recovered::Invalid(Invalid::new("b-c", 6)));
    }

    #[rstest]
    #[case("/a%20b")]
    #[case("/ž/€")]
    #[case("/\u{E000}")]
    #[case("/\u{10000}")]
    fn unicode_and_percent_literals(#[case] template: &str) {
        assert_eq!(parts(template), vec![Part::Literals(template.into())]);
    }

    #[rstest]
    #[case("/a~b")]
    #[case("/a[b")]
    #[case("/a]b")]
    #[case("/a b")]
    #[case("/a\"b")]
    #[case("/a%zzb")]
    #[case("/\u{FFFE}")]
    fn disallowed_literals(#[case] template: &str) {
        assert_eq!(parts(template), vec![Part::Invalid(Invalid::new(template, 0))]);
    }

    #[test]
    fn display_reconstructs_template() {
        let template = "http://example.com/xxyy/{x}?abc=def{&par,q:3,r*}";
        let rendered: String = parts(template).iter().map(Part::to_string).collect();
        assert_eq!(rendered, template);
    }
}
