//! Command-line interface implementation for tg.
//! Provides argument parsing and help text formatting using clap.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::constants::{DEFAULT_CONFIG_FILE, DEFAULT_TEMPLATES_DIR};
use crate::renderer::EngineKind;

/// Command-line arguments structure for tg.
#[derive(Parser, Debug)]
#[command(
    name = "tg",
    author,
    version,
    about = "Template Generator: a CLI tool for project scaffolding",
    long_about = "Template Generator (tg) scaffolds projects from templates.\n\n\
Templates are directories described by a template.toml file and may use\n\
variable substitution in both file names and file contents.",
    arg_required_else_help = true
)]
pub struct Args {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(short, long, global = true, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize tg configuration in current directory
    Init(InitArgs),

    /// List available templates
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Apply a template to generate files
    Apply(ApplyArgs),

    /// Create a new template skeleton
    New(NewArgs),

    /// Validate a template's descriptor
    Validate(ValidateArgs),
}

#[derive(ClapArgs, Debug)]
pub struct InitArgs {
    /// Force initialization (overwrite existing config)
    #[arg(short, long)]
    pub force: bool,

    /// Template directory name
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_TEMPLATES_DIR)]
    pub templates_dir: String,
}

#[derive(ClapArgs, Debug)]
pub struct ListArgs {
    /// Show detailed template information
    #[arg(short, long)]
    pub details: bool,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value_t = ListFormat::List)]
    pub format: ListFormat,

    /// Filter templates by name or description (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub filter: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    List,
    Table,
    Json,
}

#[derive(ClapArgs, Debug)]
pub struct ApplyArgs {
    /// Template directory name or metadata name
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Output directory; takes precedence over --output
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Set a variable value, e.g. --var name=John (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Template dialect, overriding the configuration
    #[arg(long, value_enum)]
    pub engine: Option<EngineKind>,
}

impl ApplyArgs {
    pub fn output_dir(&self) -> &PathBuf {
        self.output_dir.as_ref().unwrap_or(&self.output)
    }
}

#[derive(ClapArgs, Debug)]
pub struct NewArgs {
    /// Name of the template directory to create
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Template description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Template author
    #[arg(short, long)]
    pub author: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct ValidateArgs {
    /// Template directory name or metadata name
    #[arg(value_name = "TEMPLATE")]
    pub template: String,
}

/// Parses a `KEY=VALUE` pair. The value may itself contain `=`.
pub fn parse_var(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
