//! Template descriptor handling.
//! A descriptor is the `template.toml` file at the root of every template. It
//! declares display metadata, the variables a template understands and a set
//! of file-selection rules.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::TEMPLATE_CONFIG_FILE;
use crate::error::{Error, Result};
use crate::value::Value;

/// A parsed `template.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub variables: IndexMap<String, Variable>,

    #[serde(default, skip_serializing_if = "Rules::is_empty")]
    pub rules: Rules,
}

/// Display-only information about a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
}

/// A variable declared by a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Declared type, kept as written so that unknown names surface as
    /// validation errors rather than parse errors. `None` means untyped.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// File-selection rules. Stored for callers; the tree processor does not
/// apply them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<String>,

    /// Takes precedence over `ignores` when both match.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub renames: IndexMap<String, String>,
}

impl Rules {
    pub fn is_empty(&self) -> bool {
        self.ignores.is_empty() && self.includes.is_empty() && self.renames.is_empty()
    }
}

/// The types a variable may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    String,
    Number,
    Boolean,
    Array,
}

impl VariableType {
    /// Whether `value` has the runtime shape this type requires.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (VariableType::String, Value::String(_))
                | (VariableType::Number, Value::Integer(_) | Value::Float(_))
                | (VariableType::Boolean, Value::Boolean(_))
                | (VariableType::Array, Value::Array(_))
        )
    }
}

impl FromStr for VariableType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "string" => Ok(VariableType::String),
            "number" => Ok(VariableType::Number),
            "boolean" => Ok(VariableType::Boolean),
            "array" => Ok(VariableType::Array),
            other => Err(format!("invalid type '{other}'")),
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VariableType::String => "string",
            VariableType::Number => "number",
            VariableType::Boolean => "boolean",
            VariableType::Array => "array",
        })
    }
}

impl Variable {
    /// Parses the declared type. An absent or empty `type` yields `None`.
    pub fn declared_type(&self) -> std::result::Result<Option<VariableType>, String> {
        match self.kind.as_deref() {
            None | Some("") => Ok(None),
            Some(kind) => kind.parse().map(Some),
        }
    }
}

impl Template {
    /// Checks the descriptor's invariants.
    ///
    /// # Errors
    /// * `Error::Validation` if the name is empty, a variable declares an
    ///   unknown type, or a default does not match its declared type
    pub fn validate(&self) -> Result<()> {
        if self.metadata.name.is_empty() {
            return Err(Error::Validation("template name is required".to_string()));
        }

        for (name, variable) in &self.variables {
            validate_variable(name, variable)?;
        }

        if !self.rules.includes.is_empty() && !self.rules.ignores.is_empty() {
            debug!("Template '{}' has both includes and ignores", self.metadata.name);
        }

        Ok(())
    }
}

fn validate_variable(name: &str, variable: &Variable) -> Result<()> {
    let declared = variable
        .declared_type()
        .map_err(|e| Error::Validation(format!("variable '{name}': {e}")))?;

    if let (Some(kind), Some(default)) = (declared, &variable.default) {
        if !kind.accepts(default) {
            return Err(Error::Validation(format!(
                "variable '{name}': default value error: expected {kind}, got {}",
                default.kind()
            )));
        }
    }

    Ok(())
}

/// Loads `template.toml` from a template directory.
///
/// A missing `metadata.name` is filled with the directory's base name.
///
/// # Errors
/// * `Error::Io` if the descriptor cannot be read
/// * `Error::Config` if it is not valid TOML for a descriptor
pub fn load_template<P: AsRef<Path>>(template_dir: P) -> Result<Template> {
    let template_dir = template_dir.as_ref();
    let config_path = template_dir.join(TEMPLATE_CONFIG_FILE);
    debug!("Loading template descriptor from {}", config_path.display());

    let content = fs::read_to_string(&config_path).map_err(|e| Error::io(&config_path, e))?;
    let mut template: Template = toml::from_str(&content).map_err(|e| {
        Error::Config(format!("failed to parse '{}': {}", config_path.display(), e))
    })?;

    if template.metadata.name.is_empty() {
        template.metadata.name = dir_base_name(template_dir);
    }

    Ok(template)
}

/// Writes `template` as `template.toml` inside `template_dir`, creating the
/// directory when needed.
pub fn save_template<P: AsRef<Path>>(template_dir: P, template: &Template) -> Result<()> {
    let template_dir = template_dir.as_ref();
    fs::create_dir_all(template_dir).map_err(|e| Error::io(template_dir, e))?;

    let content = toml::to_string_pretty(template)
        .map_err(|e| Error::Config(format!("failed to serialize template: {e}")))?;

    let config_path = template_dir.join(TEMPLATE_CONFIG_FILE);
    fs::write(&config_path, content).map_err(|e| Error::io(&config_path, e))
}

fn dir_base_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .or_else(|| {
            dir.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|name| name.to_string_lossy().into_owned()))
        })
        .unwrap_or_default()
}
