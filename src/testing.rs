//! Testing utilities for URI template parse results
//!
//! Checking a parsed template by matching on nested enums gets long fast:
//!
//! ```rust-example
//! match &parts[0] {
//!     Part::Expression(e) => {
//!         assert_eq!(e.kind, ExpressionKind::Noop);
//!         match &e.variables[1] {
//!             Recovered::Invalid(i) => assert_eq!(i.content, "v^2"),
//!             _ => panic!("Expected invalid variable"),
//!         }
//!     }
//!     _ => panic!("Expected expression"),
//! }
//! ```
//!
//! [`assert_template`] walks the same structure fluently and reports the path to the
//! failing node (`parts[0]:variables[1]`):
//!
//! ```rust-example
//! use drafter::testing::assert_template;
//!
//! let parts = parse("{v1,v^2,v3}").unwrap();
//! assert_template(&parts)
//!     .part_count(1)
//!     .part(0, |p| {
//!         p.assert_expression()
//!             .kind(ExpressionKind::Noop)
//!             .variable_count(3)
//!             .variable(0, |v| { v.assert_valid().name("v1"); })
//!             .variable(1, |v| { v.assert_invalid().content("v^2"); });
//!     });
//! ```
//!
//! Validator output is checked the same way with [`assert_report`].

mod template_assertions;

pub use template_assertions::{
    assert_report, assert_template, ExpressionAssertion, InvalidAssertion, LiteralsAssertion,
    PartAssertion, ReportAssertion, SlotAssertion, TemplateAssertion, VariableAssertion,
    WarningAssertion,
};
