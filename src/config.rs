//! Configuration loader
//!
//! `defaults/drafter.default.toml` is embedded into the library so the documented defaults
//! and runtime behavior stay in sync. Callers layer their own files and overrides on top
//! via [`Loader`] before deserializing into [`DrafterConfig`].

use crate::refract::serialize::render_so;
use crate::refract::Element;
use crate::so::{json, yaml, SerializeError};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/drafter.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct DrafterConfig {
    pub serialize: SerializeConfig,
}

/// How rendered elements are turned into text
#[derive(Debug, Clone, Deserialize)]
pub struct SerializeConfig {
    pub format: OutputFormat,
    pub sourcemaps: bool,
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl DrafterConfig {
    /// Serialize `element` in the configured format.
    pub fn render(&self, element: &Element) -> Result<String, SerializeError> {
        let value = render_so(element, self.serialize.sourcemaps);
        match self.serialize.format {
            OutputFormat::Yaml => Ok(yaml::to_string(&value)),
            OutputFormat::Json if self.serialize.pretty => json::to_string_pretty(&value),
            OutputFormat::Json => json::to_string(&value),
        }
    }
}

/// Layers user settings over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. A missing file fails the build.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file if it exists.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Deserialize the layered sources into a [`DrafterConfig`], whose
    /// [`render`](DrafterConfig::render) picks the output format and source map handling.
    pub fn build(self) -> Result<DrafterConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<DrafterConfig, ConfigError> {
    Loader::new().build()
}
