//! # drafter
//!
//! URI template parsing and the Refract element model for API Blueprint.
//!
//! - [`uritemplate`] validates resource URI templates and reports what is wrong with them,
//!   built on the recovering grammar in [`parser`]
//! - [`refract`] is the element tree blueprints are transformed into, with merging of
//!   inherited definitions and rendering into [`so`] values for JSON or YAML output
//! - [`config`] selects how rendered elements become text
//!
//! ## Testing
//!
//! Template parse results are checked with the fluent API in the
//! [testing module](crate::testing).

pub mod config;
pub mod parser;
pub mod refract;
pub mod report;
pub mod so;
pub mod testing;
pub mod uritemplate;
