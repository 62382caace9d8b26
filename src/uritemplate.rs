//! URI template validation
//!
//! Resource and action URIs in a blueprint are RFC 6570 templates. [`UriTemplateParser`]
//! splits a template into scheme, host and path and turns everything the template grammar
//! could not make sense of into warnings. Templates are never rejected: even a template
//! that is all invalid still yields its components.

use crate::parser::recover::{Invalid, Recovered};
use crate::parser::uritemplate::locator::{locate_in_literals, locate_in_variable, Locus};
use crate::parser::uritemplate::{self, Expression, ExpressionKind, Part, Variable};
use crate::report::{Error, ErrorCode, Report, SourceRangeSet, Warning, WarningCode};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static URI_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(http|https|ftp|file)?(://)?([^/]*)?(.*)$").ok());

/// Outcome of parsing a single URI template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedUriTemplate {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub report: Report,
}

pub struct UriTemplateParser;

impl UriTemplateParser {
    /// Parse `uri`, attaching every diagnostic to `source_block`.
    pub fn parse(uri: &str, source_block: &SourceRangeSet) -> ParsedUriTemplate {
        let mut result = ParsedUriTemplate::default();
        if uri.is_empty() {
            return result;
        }

        let captures = URI_REGEX.as_ref().and_then(|regex| regex.captures(uri));
        let Some(captures) = captures else {
            result.report.error = Some(
                Error::new("Failed to parse URI Template", ErrorCode::Application)
                    .with_location(source_block.clone()),
            );
            return result;
        };
        let group = |index: usize| {
            captures
                .get(index)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };
        result.scheme = group(1);
        result.host = group(3);
        result.path = group(4);

        let mut validator = Validator {
            report: &mut result.report,
            source_block,
        };
        match uritemplate::parse(uri) {
            Ok(parts) => parts.iter().for_each(|part| validator.check_part(part)),
            Err(error) => {
                tracing::debug!(%error, uri, "URI template grammar failed");
                validator.warn(error.to_string());
            }
        }
        result
    }
}

struct Validator<'a> {
    report: &'a mut Report,
    source_block: &'a SourceRangeSet,
}

impl Validator<'_> {
    fn warn(&mut self, message: String) {
        self.report.warn(Warning::new(
            message,
            WarningCode::Uri,
            self.source_block.clone(),
        ));
    }

    fn check_part(&mut self, part: &Part) {
        match part {
            Part::Literals(_) => {}
            Part::Invalid(invalid) => self.check_invalid_literals(invalid),
            Part::Expression(expression) => self.check_expression(expression),
        }
    }

    fn check_invalid_literals(&mut self, invalid: &Invalid) {
        let reason = describe(locate_in_literals(&invalid.content), "content");
        self.warn(format!(
            "URI template contains invalid {}. You probably will need to replace invalid chars by percent encoded character.",
            reason
        ));
    }

    fn check_expression(&mut self, expression: &Expression) {
        if !is_supported(expression.kind) {
            self.warn(format!(
                "URI template '{}' expansion is not supported",
                operator_to_text(expression.kind)
            ));
        }

        for variable in &expression.variables {
            self.check_variable(variable);
        }

        if expression.missing_expression_close {
            self.warn("URI Template expression is missing closing bracket '}'".to_string());
        }
    }

    fn check_variable(&mut self, variable: &Recovered<Variable>) {
        let Recovered::Invalid(invalid) = variable else {
            return;
        };
        let reason = describe(locate_in_variable(&invalid.content), "variable name");
        self.warn(format!(
            "URI template variable '{}' contains invalid {}. Allowed characters for expressions are A-Z a-z 0-9 _ and percent encoded characters",
            invalid.content, reason
        ));
    }
}

fn describe(locus: Option<Locus>, fallback: &str) -> String {
    locus
        .map(|locus| locus.reason.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

fn is_supported(kind: ExpressionKind) -> bool {
    matches!(
        kind,
        ExpressionKind::Noop
            | ExpressionKind::ReservedChars
            | ExpressionKind::Fragment
            | ExpressionKind::QueryParam
            | ExpressionKind::QueryContinue
    )
}

fn operator_to_text(kind: ExpressionKind) -> &'static str {
    match kind {
        ExpressionKind::Label => "label",
        ExpressionKind::Path => "path segment",
        ExpressionKind::PathParam => "path segment parameter",
        _ => "reserved operator",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SourceRange;

    fn block() -> SourceRangeSet {
        vec![SourceRange::new(4, 20)]
    }

    fn messages(uri: &str) -> Vec<String> {
        UriTemplateParser::parse(uri, &block())
            .report
            .warnings
            .into_iter()
            .map(|w| w.message)
            .collect()
    }

    #[test]
    fn empty_uri_yields_empty_result() {
        assert_eq!(UriTemplateParser::parse("", &block()), ParsedUriTemplate::default());
    }

    #[test]
    fn splits_scheme_host_and_path() {
        let parsed = UriTemplateParser::parse("http://example.com/path/{id}", &block());
        assert_eq!(parsed.scheme, "http");
        assert_eq!(parsed.host, "example.com");
        assert_eq!(parsed.path, "/path/{id}");
        assert!(parsed.report.warnings.is_empty());
        assert!(parsed.report.error.is_none());
    }

    #[test]
    fn relative_path_has_no_scheme_or_host() {
        let parsed = UriTemplateParser::parse("/resource/{id}", &block());
        assert_eq!(parsed.scheme, "");
        assert_eq!(parsed.host, "");
        assert_eq!(parsed.path, "/resource/{id}");
    }

    #[test]
    fn regex_failure_is_an_application_error() {
        let parsed = UriTemplateParser::parse("/a\n/b", &block());
        let error = parsed.report.error.expect("regex rejects line breaks");
        assert_eq!(error.message, "Failed to parse URI Template");
        assert_eq!(error.code, ErrorCode::Application);
        assert!(parsed.report.warnings.is_empty());
    }

    #[test]
    fn unsupported_operators_are_named() {
        assert_eq!(
            messages("{.label}{/path}{;param}{=eq}"),
            vec![
                "URI template 'label' expansion is not supported",
                "URI template 'path segment' expansion is not supported",
                "URI template 'path segment parameter' expansion is not supported",
                "URI template 'reserved operator' expansion is not supported",
            ]
        );
    }

    #[test]
    fn supported_operators_are_silent() {
        assert!(messages("{var}{+reserved}{#fragment}{?query}{&continue}").is_empty());
    }

    #[test]
    fn invalid_variable_message() {
        assert_eq!(
            messages("/{v^2}"),
            vec!["URI template variable 'v^2' contains invalid character '^'. Allowed characters for expressions are A-Z a-z 0-9 _ and percent encoded characters"]
        );
    }

    #[test]
    fn invalid_literal_message() {
        assert_eq!(
            messages("/a b"),
            vec!["URI template contains invalid character ' '. You probably will need to replace invalid chars by percent encoded character."]
        );
    }

    #[test]
    fn missing_close_is_reported() {
        assert_eq!(
            messages("/{id"),
            vec!["URI Template expression is missing closing bracket '}'"]
        );
    }

    #[test]
    fn empty_variable_uses_fallback_reason() {
        assert_eq!(
            messages("/{a,}"),
            vec!["URI template variable '' contains invalid variable name. Allowed characters for expressions are A-Z a-z 0-9 _ and percent encoded characters"]
        );
    }

    #[test]
    fn identical_warnings_are_reported_once() {
        assert_eq!(messages("/{.a}/{.b}").len(), 1);
    }

    #[test]
    fn warnings_reference_the_whole_block() {
        let parsed = UriTemplateParser::parse("/a b/{x-y}", &block());
        assert_eq!(parsed.report.warnings.len(), 2);
        for warning in parsed.report.warnings {
            assert_eq!(warning.code, WarningCode::Uri);
            assert_eq!(warning.location, block());
        }
    }
}
