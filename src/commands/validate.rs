//! `tg validate`: loads a template descriptor and checks it.

use colored::Colorize;

use crate::catalog::resolve_template;
use crate::cli::ValidateArgs;
use crate::commands::Context;
use crate::config::Config;
use crate::error::Result;

pub fn run(ctx: &Context, args: ValidateArgs) -> Result<()> {
    let config = Config::load(&ctx.config_path)?;
    config.validate()?;
    let (template_dir, template) = resolve_template(&config.templates_dir, &args.template)?;
    template.validate()?;

    println!(
        "{} {} ({} variable(s))",
        "✓ Template is valid:".green(),
        template.metadata.name.bold(),
        template.variables.len()
    );
    ctx.detail(format!("  Path: {}", template_dir.display()));
    if !template.rules.is_empty() {
        ctx.detail("  Note: ignore/include/rename rules are stored but not applied");
    }

    Ok(())
}
