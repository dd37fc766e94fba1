//! Common constants used throughout the tg application.

/// Project configuration file looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "tg.config.toml";

/// Directory holding templates when the configuration does not name one.
pub const DEFAULT_TEMPLATES_DIR: &str = ".tg";

/// Descriptor file of a template. Never copied into the output.
pub const TEMPLATE_CONFIG_FILE: &str = "template.toml";
