//! `tg new`: creates a template skeleton in the templates directory.

use std::fs;

use colored::Colorize;
use indexmap::IndexMap;

use crate::cli::NewArgs;
use crate::commands::Context;
use crate::config::Config;
use crate::constants::TEMPLATE_CONFIG_FILE;
use crate::descriptor::{save_template, Metadata, Template, Variable};
use crate::error::{Error, Result};
use crate::value::Value;

const SAMPLE_VARIABLE: &str = "project_name";

pub fn run(ctx: &Context, args: NewArgs) -> Result<()> {
    let config = Config::load(&ctx.config_path)?;
    let template_dir = config.templates_dir.join(&args.name);

    if template_dir.join(TEMPLATE_CONFIG_FILE).exists() {
        return Err(Error::Config(format!(
            "template '{}' already exists at '{}'",
            args.name,
            template_dir.display()
        )));
    }

    let mut variables = IndexMap::new();
    variables.insert(
        SAMPLE_VARIABLE.to_string(),
        Variable {
            default: Some(Value::String(args.name.clone())),
            description: "Name of the generated project".to_string(),
            kind: Some("string".to_string()),
        },
    );

    let template = Template {
        version: Some("1.0.0".to_string()),
        metadata: Metadata {
            name: args.name.clone(),
            description: args.description.unwrap_or_default(),
            author: args.author.unwrap_or_default(),
        },
        variables,
        ..Template::default()
    };
    save_template(&template_dir, &template)?;

    let readme = template_dir.join("README.md");
    let content = format!("# {}\n", config.engine.placeholder(SAMPLE_VARIABLE));
    fs::write(&readme, content).map_err(|e| Error::io(&readme, e))?;

    println!("{}", "✓ Template created successfully!".green());
    println!("  Template dir:  {}", template_dir.display().to_string().bold());
    ctx.detail(format!("  Descriptor:    {}", template_dir.join(TEMPLATE_CONFIG_FILE).display()));

    Ok(())
}
