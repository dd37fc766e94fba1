//! tg is a template generator for project scaffolding.
//! It copies a template directory into an output directory, rendering
//! variables into both file paths and file contents.

/// Variable bindings resolved for one apply
pub mod bindings;

/// Template discovery and lookup
pub mod catalog;

/// Command-line interface module for the tg application
pub mod cli;

/// Subcommand implementations
pub mod commands;

/// Project configuration (`tg.config.toml`)
pub mod config;

/// Common constants
pub mod constants;

/// Template descriptor model (`template.toml`)
pub mod descriptor;

/// Error types and handling for the tg application
pub mod error;

/// Logger setup
pub mod logger;

/// Core template processing
/// Walks a template tree and writes the rendered output
pub mod processor;

/// Template rendering engines
pub mod renderer;

/// Variable values
pub mod value;

pub use bindings::Bindings;
pub use error::{Error, Result};
pub use processor::{ProcessResult, Processor};
pub use renderer::{GoTemplateRenderer, MiniJinjaRenderer, TemplateRenderer};
pub use value::Value;
