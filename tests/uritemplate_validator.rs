//! Integration tests for URI template validation
//!
//! Templates are taken from resource and action definitions, so every warning is
//! attached to the source block the template came from.

use drafter::report::{SourceRange, SourceRangeSet, WarningCode};
use drafter::testing::assert_report;
use drafter::uritemplate::UriTemplateParser;
use rstest::rstest;

const ALLOWED_IN_EXPRESSIONS: &str =
    "Allowed characters for expressions are A-Z a-z 0-9 _ and percent encoded characters";
const PERCENT_ENCODE_HINT: &str =
    "You probably will need to replace invalid chars by percent encoded character.";

fn block() -> SourceRangeSet {
    vec![SourceRange::new(10, 42)]
}

fn variable_warning(content: &str, reason: &str) -> String {
    format!(
        "URI template variable '{}' contains invalid {}. {}",
        content, reason, ALLOWED_IN_EXPRESSIONS
    )
}

fn literal_warning(reason: &str) -> String {
    format!("URI template contains invalid {}. {}", reason, PERCENT_ENCODE_HINT)
}

#[rstest]
#[case("/resource")]
#[case("/resource/{id}")]
#[case("/resource{?page,limit}")]
#[case("/resource/{id}{&fields*}")]
#[case("http://example.com/xxyy/{x}?abc=def{&par}")]
#[case("{+path:10}/here{#section}")]
#[case("/caf%C3%A9/{name}")]
fn test_clean_templates(#[case] uri: &str) {
    let parsed = UriTemplateParser::parse(uri, &block());

    assert_report(&parsed.report).no_error().warning_count(0);
}

#[test]
fn test_components_of_absolute_uri() {
    let parsed = UriTemplateParser::parse("https://api.example.com/users/{id}", &block());

    assert_eq!(parsed.scheme, "https");
    assert_eq!(parsed.host, "api.example.com");
    assert_eq!(parsed.path, "/users/{id}");
}

#[test]
fn test_invalid_variable_character() {
    let parsed = UriTemplateParser::parse("/{v1,v^2,v3}", &block());

    assert_report(&parsed.report)
        .no_error()
        .warning_count(1)
        .warning(0, |w| {
            w.message(&variable_warning("v^2", "character '^'"))
                .code(WarningCode::Uri)
                .located_at(10, 42);
        });
}

#[test]
fn test_invalid_literals_and_variable() {
    let parsed = UriTemplateParser::parse("xx yy/{x-2}", &block());

    assert_report(&parsed.report)
        .warning_count(2)
        .warning(0, |w| {
            w.message(&literal_warning("character ' '"));
        })
        .warning(1, |w| {
            w.message(&variable_warning("x-2", "character '-'"));
        });
}

#[test]
fn test_square_brackets_are_not_allowed() {
    let parsed = UriTemplateParser::parse("/a[2]", &block());

    assert_report(&parsed.report).warning_count(1).warning(0, |w| {
        w.message(&literal_warning("character '['"));
    });
}

#[test]
fn test_unsupported_expansion_and_missing_close() {
    let parsed = UriTemplateParser::parse("/path{.format", &block());

    assert_report(&parsed.report)
        .no_error()
        .warning_count(2)
        .warning(0, |w| {
            w.message("URI template 'label' expansion is not supported");
        })
        .warning(1, |w| {
            w.message("URI Template expression is missing closing bracket '}'");
        });
}

#[test]
fn test_repeated_problems_are_reported_once() {
    let parsed = UriTemplateParser::parse("/{;a}/{;b}/{;c}", &block());

    assert_report(&parsed.report).warning_count(1).warning(0, |w| {
        w.message("URI template 'path segment parameter' expansion is not supported");
    });
}

#[test]
fn test_empty_template_is_silent() {
    let parsed = UriTemplateParser::parse("", &block());

    assert_report(&parsed.report).no_error().warning_count(0);
    assert!(parsed.path.is_empty());
}

#[test]
fn test_line_break_fails_the_split() {
    let parsed = UriTemplateParser::parse("/one\n/two", &block());

    assert_report(&parsed.report)
        .error_message("Failed to parse URI Template")
        .warning_count(0);
}
