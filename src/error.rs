//! Error handling for the tg application.
//! Defines custom error types and results used throughout the application.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;
use thiserror::Error;

/// Custom error types for tg operations.
///
/// This enum represents all possible errors that can occur within tg.
/// It implements the standard Error trait through thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// A filesystem operation failed. Always carries the offending path.
    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Template text could not be parsed.
    #[error("Template syntax error: {0}")]
    TemplateSyntax(String),

    /// Template text parsed but failed while executing against the bindings.
    #[error("Template execution error: {0}")]
    TemplateExecution(String),

    /// A template descriptor is invalid.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A configuration or descriptor file could not be read as TOML, or a
    /// command line value is malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template '{name}' not found in '{}'", .templates_dir.display())]
    TemplateNotFound { name: String, templates_dir: PathBuf },

    #[error("Path '{}' is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),

    /// Wraps an error raised while processing one entry of a template tree.
    #[error("Failed to {phase} '{}': {source}", .path.display())]
    Process {
        path: PathBuf,
        phase: Phase,
        #[source]
        source: Box<Error>,
    },
}

/// The step of the tree walk during which an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Walk,
    RenderPath,
    CreateDir,
    Read,
    RenderContent,
    Write,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            Phase::Walk => "walk",
            Phase::RenderPath => "render output path of",
            Phase::CreateDir => "create directory for",
            Phase::Read => "read",
            Phase::RenderContent => "render content of",
            Phase::Write => "write output of",
        };
        f.write_str(phase)
    }
}

impl Error {
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    /// Wraps `self` with the template-relative path and phase it came from.
    pub fn within<P: AsRef<Path>>(self, path: P, phase: Phase) -> Self {
        Error::Process { path: path.as_ref().to_path_buf(), phase, source: Box::new(self) }
    }

    /// Returns the innermost error, looking through `Process` wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Process { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self.root_cause(), Error::TemplateSyntax(_))
    }

    pub fn is_execution(&self) -> bool {
        matches!(self.root_cause(), Error::TemplateExecution(_))
    }

    /// The phase of the outermost `Process` wrapper, if any.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Error::Process { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

/// Convenience type alias for Results with tg's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Partial output already written to disk is left in place.
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err.to_string().red());
    std::process::exit(1);
}
