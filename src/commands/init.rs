//! `tg init`: writes a starter configuration and creates the templates directory.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::cli::InitArgs;
use crate::commands::Context;
use crate::config::initial_config;
use crate::error::{Error, Result};

pub fn run(ctx: &Context, args: InitArgs) -> Result<()> {
    println!("{}", "Initializing tg configuration...".cyan());

    let config_path = &ctx.config_path;
    if !args.force && config_path.exists() {
        return Err(Error::Config(format!(
            "config file '{}' already exists, use --force to overwrite",
            config_path.display()
        )));
    }

    fs::write(config_path, initial_config(&args.templates_dir))
        .map_err(|e| Error::io(config_path, e))?;
    ctx.detail(format!("Created config file: {}", config_path.display()));

    let templates_dir = templates_dir_for(config_path, &args.templates_dir);
    fs::create_dir_all(&templates_dir).map_err(|e| Error::io(&templates_dir, e))?;
    ctx.detail(format!("Created templates directory: {}", templates_dir.display()));

    println!("{}", "✓ Configuration initialized successfully!".green());
    println!("  Config file:    {}", config_path.display().to_string().bold());
    println!("  Templates dir:  {}", templates_dir.display().to_string().bold());

    Ok(())
}

/// The templates directory is resolved like `Config::load` resolves it:
/// relative to the configuration file.
fn templates_dir_for(config_path: &Path, templates_dir: &str) -> PathBuf {
    match config_path.parent() {
        Some(base) => base.join(templates_dir),
        None => PathBuf::from(templates_dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> Context {
        Context { verbose: false, config_path: dir.path().join("tg.config.toml") }
    }

    #[test]
    fn test_init_creates_config_and_templates_dir() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);

        run(&ctx, InitArgs { force: false, templates_dir: "templates".to_string() }).unwrap();

        assert!(temp_dir.path().join("templates").is_dir());
        let config = Config::load(&ctx.config_path).unwrap();
        assert_eq!(config.templates_dir, temp_dir.path().join("templates"));
    }

    #[test]
    fn test_init_refuses_existing_config_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        fs::write(&ctx.config_path, "templates_dir = 'custom'\n").unwrap();

        let err = run(&ctx, InitArgs { force: false, templates_dir: ".tg".to_string() });
        assert!(matches!(err, Err(Error::Config(_))));
        assert_eq!(fs::read_to_string(&ctx.config_path).unwrap(), "templates_dir = 'custom'\n");

        run(&ctx, InitArgs { force: true, templates_dir: ".tg".to_string() }).unwrap();
        assert!(fs::read_to_string(&ctx.config_path).unwrap().contains("'.tg'"));
    }
}
