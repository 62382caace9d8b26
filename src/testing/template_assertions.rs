//! Fluent assertion API for parsed templates and reports

use crate::parser::recover::{Invalid, Recovered};
use crate::parser::uritemplate::{Expression, ExpressionKind, Part, Variable, VariableSlot};
use crate::report::{Report, Warning, WarningCode};

// ============================================================================
// Entry Points
// ============================================================================

/// Create an assertion builder for the parts of a parsed template
pub fn assert_template(parts: &[Part]) -> TemplateAssertion<'_> {
    TemplateAssertion { parts }
}

/// Create an assertion builder for a validator report
pub fn assert_report(report: &Report) -> ReportAssertion<'_> {
    ReportAssertion { report }
}

// ============================================================================
// Template Assertions
// ============================================================================

pub struct TemplateAssertion<'a> {
    parts: &'a [Part],
}

impl<'a> TemplateAssertion<'a> {
    pub fn part_count(self, expected: usize) -> Self {
        let actual = self.parts.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} parts, found {} parts: [{}]",
            expected,
            actual,
            summarize_parts(self.parts)
        );
        self
    }

    pub fn part<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(PartAssertion<'a>),
    {
        assert!(
            index < self.parts.len(),
            "Part index {} out of bounds (template has {} parts)",
            index,
            self.parts.len()
        );
        assertion(PartAssertion {
            part: &self.parts[index],
            context: format!("parts[{}]", index),
        });
        self
    }

    /// Assert the parts print back as `expected`
    pub fn renders(self, expected: &str) -> Self {
        let actual: String = self.parts.iter().map(ToString::to_string).collect();
        assert_eq!(actual, expected, "Template renders differently");
        self
    }
}

fn summarize_parts(parts: &[Part]) -> String {
    parts
        .iter()
        .map(|part| match part {
            Part::Literals(text) => format!("Literals({:?})", text),
            Part::Expression(expression) => format!("Expression({})", expression),
            Part::Invalid(invalid) => format!("Invalid({:?})", invalid.content),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Part Assertions
// ============================================================================

pub struct PartAssertion<'a> {
    part: &'a Part,
    context: String,
}

impl<'a> PartAssertion<'a> {
    pub fn assert_literals(self) -> LiteralsAssertion<'a> {
        match self.part {
            Part::Literals(text) => LiteralsAssertion {
                text,
                context: self.context,
            },
            other => panic!("{}: Expected Literals, found {:?}", self.context, other),
        }
    }

    pub fn assert_expression(self) -> ExpressionAssertion<'a> {
        match self.part {
            Part::Expression(expression) => ExpressionAssertion {
                expression,
                context: self.context,
            },
            other => panic!("{}: Expected Expression, found {:?}", self.context, other),
        }
    }

    pub fn assert_invalid(self) -> InvalidAssertion<'a> {
        match self.part {
            Part::Invalid(invalid) => InvalidAssertion {
                invalid,
                context: self.context,
            },
            other => panic!("{}: Expected Invalid, found {:?}", self.context, other),
        }
    }
}

pub struct LiteralsAssertion<'a> {
    text: &'a str,
    context: String,
}

impl LiteralsAssertion<'_> {
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(self.text, expected, "{}: Literals differ", self.context);
        self
    }
}

pub struct InvalidAssertion<'a> {
    invalid: &'a Invalid,
    context: String,
}

impl InvalidAssertion<'_> {
    pub fn content(self, expected: &str) -> Self {
        assert_eq!(
            self.invalid.content, expected,
            "{}: Invalid content differs",
            self.context
        );
        self
    }

    pub fn position(self, expected: usize) -> Self {
        assert_eq!(
            self.invalid.position, expected,
            "{}: Invalid position differs",
            self.context
        );
        self
    }
}

// ============================================================================
// Expression Assertions
// ============================================================================

pub struct ExpressionAssertion<'a> {
    expression: &'a Expression,
    context: String,
}

impl<'a> ExpressionAssertion<'a> {
    pub fn kind(self, expected: ExpressionKind) -> Self {
        assert_eq!(
            self.expression.kind, expected,
            "{}: Expected {:?} expression",
            self.context, expected
        );
        self
    }

    pub fn closed(self) -> Self {
        assert!(
            !self.expression.missing_expression_close,
            "{}: Expected a closing bracket",
            self.context
        );
        self
    }

    pub fn missing_close(self) -> Self {
        assert!(
            self.expression.missing_expression_close,
            "{}: Expected the closing bracket to be missing",
            self.context
        );
        self
    }

    pub fn variable_count(self, expected: usize) -> Self {
        let actual = self.expression.variables.len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} variables, found {} variables: {}",
            self.context, expected, actual, self.expression
        );
        self
    }

    pub fn variable<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SlotAssertion<'a>),
    {
        let variables = &self.expression.variables;
        assert!(
            index < variables.len(),
            "{}: Variable index {} out of bounds (expression has {} variables)",
            self.context,
            index,
            variables.len()
        );
        assertion(SlotAssertion {
            slot: &variables[index],
            context: format!("{}:variables[{}]", self.context, index),
        });
        self
    }

    /// Assert every variable slot parsed, with the given names in order
    pub fn variable_names(self, expected: &[&str]) -> Self {
        let actual: Vec<Option<&str>> = self
            .expression
            .variables
            .iter()
            .map(|slot| slot.valid().map(|v| v.name.as_str()))
            .collect();
        let expected: Vec<Option<&str>> = expected.iter().copied().map(Some).collect();
        assert_eq!(actual, expected, "{}: Variable names differ", self.context);
        self
    }
}

pub struct SlotAssertion<'a> {
    slot: &'a VariableSlot,
    context: String,
}

impl<'a> SlotAssertion<'a> {
    pub fn assert_valid(self) -> VariableAssertion<'a> {
        match self.slot {
            Recovered::Valid(variable) => VariableAssertion {
                variable,
                context: self.context,
            },
            Recovered::Invalid(invalid) => panic!(
                "{}: Expected a valid variable, found invalid {:?}",
                self.context, invalid.content
            ),
        }
    }

    pub fn assert_invalid(self) -> InvalidAssertion<'a> {
        match self.slot {
            Recovered::Invalid(invalid) => InvalidAssertion {
                invalid,
                context: self.context,
            },
            Recovered::Valid(variable) => panic!(
                "{}: Expected an invalid variable, found {}",
                self.context, variable
            ),
        }
    }
}

pub struct VariableAssertion<'a> {
    variable: &'a Variable,
    context: String,
}

impl VariableAssertion<'_> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.variable.name, expected,
            "{}: Variable name differs",
            self.context
        );
        self
    }

    pub fn prefix(self, expected: Option<usize>) -> Self {
        assert_eq!(
            self.variable.prefix_length(),
            expected,
            "{}: Prefix modifier differs",
            self.context
        );
        self
    }

    pub fn explode(self, expected: bool) -> Self {
        assert_eq!(
            self.variable.explode, expected,
            "{}: Explode modifier differs",
            self.context
        );
        self
    }
}

// ============================================================================
// Report Assertions
// ============================================================================

pub struct ReportAssertion<'a> {
    report: &'a Report,
}

impl<'a> ReportAssertion<'a> {
    pub fn no_error(self) -> Self {
        assert!(
            self.report.error.is_none(),
            "Expected no error, found {:?}",
            self.report.error
        );
        self
    }

    pub fn error_message(self, expected: &str) -> Self {
        let actual = self.report.error.as_ref().map(|e| e.message.as_str());
        assert_eq!(actual, Some(expected), "Report error differs");
        self
    }

    pub fn warning_count(self, expected: usize) -> Self {
        let actual = self.report.warnings.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} warnings, found {}: {:#?}",
            expected,
            actual,
            self.report
                .warnings
                .iter()
                .map(|w| w.message.as_str())
                .collect::<Vec<_>>()
        );
        self
    }

    pub fn warning<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(WarningAssertion<'a>),
    {
        let warnings = &self.report.warnings;
        assert!(
            index < warnings.len(),
            "Warning index {} out of bounds (report has {} warnings)",
            index,
            warnings.len()
        );
        assertion(WarningAssertion {
            warning: &warnings[index],
            context: format!("warnings[{}]", index),
        });
        self
    }
}

pub struct WarningAssertion<'a> {
    warning: &'a Warning,
    context: String,
}

impl WarningAssertion<'_> {
    pub fn message(self, expected: &str) -> Self {
        assert_eq!(
            self.warning.message, expected,
            "{}: Warning message differs",
            self.context
        );
        self
    }

    pub fn code(self, expected: WarningCode) -> Self {
        assert_eq!(
            self.warning.code, expected,
            "{}: Warning code differs",
            self.context
        );
        self
    }

    pub fn located_at(self, location: usize, length: usize) -> Self {
        let actual: Vec<(usize, usize)> = self
            .warning
            .location
            .iter()
            .map(|range| (range.location, range.length))
            .collect();
        assert_eq!(
            actual,
            vec![(location, length)],
            "{}: Warning location differs",
            self.context
        );
        self
    }
}
