//! Project configuration handling.
//! The project configuration lives in `tg.config.toml` and tells tg where
//! templates are kept, which template dialect to use and which variable
//! defaults apply to every template.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TEMPLATES_DIR;
use crate::error::{Error, Result};
use crate::renderer::EngineKind;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory containing templates. Relative paths are resolved against
    /// the directory of the configuration file on load.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    #[serde(default)]
    pub engine: EngineKind,

    /// Variable defaults shared by all templates. Template defaults win.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub defaults: IndexMap<String, Value>,
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATES_DIR)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            engine: EngineKind::default(),
            defaults: IndexMap::new(),
        }
    }
}

impl Config {
    /// Loads and normalizes a configuration file.
    ///
    /// An empty `templates_dir` falls back to `.tg`.
    ///
    /// # Errors
    /// * `Error::Io` if the file cannot be read
    /// * `Error::Config` if it is not valid TOML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse '{}': {}", path.display(), e)))?;

        if config.templates_dir.as_os_str().is_empty() {
            config.templates_dir = default_templates_dir();
        }

        if config.templates_dir.is_relative() {
            if let Some(base) = path.parent() {
                config.templates_dir = base.join(&config.templates_dir);
            }
        }

        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;
        fs::write(path, content).map_err(|e| Error::io(path, e))
    }

    /// Checks that the templates directory is set and exists.
    pub fn validate(&self) -> Result<()> {
        if self.templates_dir.as_os_str().is_empty() {
            return Err(Error::Validation("templates_dir cannot be empty".to_string()));
        }

        match fs::metadata(&self.templates_dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(Error::Validation(format!(
                "'{}' is not a directory",
                self.templates_dir.display()
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::Validation(format!(
                "templates directory '{}' does not exist",
                self.templates_dir.display()
            ))),
            Err(e) => Err(Error::io(&self.templates_dir, e)),
        }
    }
}

/// Content written by `tg init`.
pub fn initial_config(templates_dir: &str) -> String {
    let templates_dir = toml::Value::String(templates_dir.to_string());
    format!(
        r#"# Template Generator Configuration

# Directory containing templates
templates_dir = {templates_dir}

# Template dialect: "go" ({{{{.name}}}}) or "jinja" ({{{{ name }}}})
engine = "go"

# Default variables for all templates (optional)
# [defaults]
# author = "Your Name"
# license = "MIT"
"#
    )
}
