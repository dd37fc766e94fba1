//! `tg apply`: renders a template into an output directory.

use std::fs;

use colored::Colorize;
use log::warn;

use crate::bindings::build_bindings;
use crate::catalog::resolve_template;
use crate::cli::ApplyArgs;
use crate::commands::Context;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::processor::{ProcessResult, Processor};

pub fn run(ctx: &Context, args: ApplyArgs) -> Result<ProcessResult> {
    println!("{} {}", "Applying template:".cyan(), args.template.bold());

    let config = Config::load(&ctx.config_path)?;
    config.validate()?;
    let (template_dir, template) = resolve_template(&config.templates_dir, &args.template)?;
    template.validate()?;

    ctx.detail(format!("Template loaded: {}", template.metadata.name));
    ctx.detail(format!("Description: {}", template.metadata.description));

    if !template.rules.is_empty() {
        warn!(
            "Template '{}' declares ignore/include/rename rules; they are not applied",
            template.metadata.name
        );
    }

    let bindings = build_bindings(&template, &config.defaults, &args.vars);

    let output_dir = args.output_dir();
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;

    let renderer = args.engine.unwrap_or(config.engine).renderer();
    let processor = Processor::new(&template, &bindings, renderer.as_ref());
    let result = processor.process(&template_dir, output_dir)?;

    println!("{}", "✓ Template applied successfully!".green());
    ctx.detail(format!("  Output directory: {}", output_dir.display().to_string().bold()));
    ctx.detail(format!("  Processed files: {}", result.files_created));
    ctx.detail(format!("  Created directories: {}", result.dirs_created));
    ctx.detail(format!("  Created files: {}", result.created_files.len()));
    for file in &result.created_files {
        ctx.detail(format!("    {}", file.display()));
    }

    Ok(result)
}
