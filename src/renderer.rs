//! Template renderers for tg.
//! Every path and every file body of a template goes through a
//! [`TemplateRenderer`]. Two dialects are available: Go `text/template`
//! (`{{.name}}`, the default) and Jinja (`{{ name }}`).
//!
//! Both renderers are strict: a reference to a variable that is not bound
//! fails with [`Error::TemplateExecution`] instead of rendering as empty text.

use std::collections::HashMap;

use cruet::Inflector;
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde::{Deserialize, Serialize};

use crate::bindings::Bindings;
use crate::error::{Error, Result};
use crate::value::Value;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string against the given bindings.
    ///
    /// # Errors
    /// * `Error::TemplateSyntax` if `template` cannot be parsed
    /// * `Error::TemplateExecution` if rendering fails, e.g. on an unbound
    ///   variable or iterating over a non-sequence
    fn render(&self, template: &str, bindings: &Bindings) -> Result<String>;
}

/// Selects the template dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Go `text/template` syntax: `{{.name}}`
    #[default]
    Go,
    /// Jinja syntax: `{{ name }}`
    Jinja,
}

impl EngineKind {
    pub fn renderer(self) -> Box<dyn TemplateRenderer> {
        match self {
            EngineKind::Go => Box::new(GoTemplateRenderer::new()),
            EngineKind::Jinja => Box::new(MiniJinjaRenderer::new()),
        }
    }

    /// A placeholder for `variable` in this dialect.
    pub fn placeholder(self, variable: &str) -> String {
        match self {
            EngineKind::Go => format!("{{{{.{variable}}}}}"),
            EngineKind::Jinja => format!("{{{{ {variable} }}}}"),
        }
    }
}

/// Go `text/template` renderer backed by `gtmpl`.
///
/// Besides the Go builtins, templates may call `join`, which renders an
/// array as text: `{{join ", " .items}}` or `{{.items | join " "}}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoTemplateRenderer;

impl GoTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for GoTemplateRenderer {
    fn render(&self, template: &str, bindings: &Bindings) -> Result<String> {
        let mut parsed = gtmpl::Template::default();
        parsed.add_func("join", join);
        parsed
            .parse(template)
            .map_err(|e| Error::TemplateSyntax(e.to_string()))?;

        // Bindings are exposed as an object, not a map: looking up an absent
        // field on an object is an execution error.
        let context: HashMap<String, gtmpl::Value> = bindings
            .iter()
            .map(|(name, value)| (name.clone(), to_gtmpl(value)))
            .collect();

        parsed
            .render(&gtmpl::Context::from(gtmpl::Value::Object(context)))
            .map_err(|e| go_execution_error(e.to_string()))
    }
}

fn to_gtmpl(value: &Value) -> gtmpl::Value {
    match value {
        Value::Boolean(b) => gtmpl::Value::Bool(*b),
        Value::Integer(i) => gtmpl::Value::from(*i),
        Value::Float(n) => gtmpl::Value::from(*n),
        Value::String(s) => gtmpl::Value::String(s.clone()),
        Value::Array(items) => gtmpl::Value::Array(items.iter().map(to_gtmpl).collect()),
    }
}

/// `join SEP ARRAY`: the array's items as text, separated by `SEP`.
fn join(args: &[gtmpl::Value]) -> std::result::Result<gtmpl::Value, gtmpl::FuncError> {
    match args {
        [gtmpl::Value::String(separator), gtmpl::Value::Array(items)] => {
            let parts: Vec<String> = items.iter().map(go_text).collect();
            Ok(gtmpl::Value::String(parts.join(separator)))
        }
        _ => Err(gtmpl::FuncError::Generic(
            "join expects a separator and an array".to_string(),
        )),
    }
}

/// Text of one array item. Nested arrays print like Go's `fmt`: `[a b]`.
fn go_text(value: &gtmpl::Value) -> String {
    match value {
        gtmpl::Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(go_text).collect();
            format!("[{}]", parts.join(" "))
        }
        other => other.to_string(),
    }
}

/// gtmpl reports a missing field together with a dump of every binding;
/// keep only the field name.
fn go_execution_error(message: String) -> Error {
    const NO_FIELD: &str = "no field ";
    let missing = message
        .find(NO_FIELD)
        .and_then(|start| message[start + NO_FIELD.len()..].split_whitespace().next());

    match missing {
        Some(name) => Error::TemplateExecution(format!("variable '{name}' is not bound")),
        None => Error::TemplateExecution(message),
    }
}

/// MiniJinja-based renderer with case-conversion filters.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_filter("snake_case", snake_case);
        env.add_filter("kebab_case", kebab_case);
        env.add_filter("camel_case", camel_case);
        env.add_filter("pascal_case", pascal_case);
        env.add_filter("screaming_snake_case", screaming_snake_case);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, bindings: &Bindings) -> Result<String> {
        let tmpl = self.env.template_from_str(template).map_err(jinja_error)?;
        tmpl.render(bindings).map_err(jinja_error)
    }
}

fn jinja_error(err: minijinja::Error) -> Error {
    match err.kind() {
        ErrorKind::SyntaxError => Error::TemplateSyntax(err.to_string()),
        _ => Error::TemplateExecution(err.to_string()),
    }
}

fn snake_case(value: String) -> String {
    value.to_snake_case()
}

fn kebab_case(value: String) -> String {
    value.to_kebab_case()
}

fn camel_case(value: String) -> String {
    value.to_camel_case()
}

fn pascal_case(value: String) -> String {
    value.to_pascal_case()
}

fn screaming_snake_case(value: String) -> String {
    value.to_screaming_snake_case()
}
